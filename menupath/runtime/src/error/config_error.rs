//! Transport configuration errors.

use thiserror::Error;

/// Errors raised while configuring a transport.
///
/// These occur before any command is sent and usually indicate invalid
/// configuration rather than a remote failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required environment variable is not set.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// Name of the variable that was checked.
        var: &'static str,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv {
        /// Name of the variable.
        var: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A default header name or value is invalid.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The HTTP client could not be built.
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),
}
