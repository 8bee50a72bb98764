//! Error types for the menupath generator.

use thiserror::Error;

/// Errors that can occur during code generation.
///
/// Every variant is fatal to the run: nothing is written once one occurs.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read a schema dump
    #[error("Failed to read schema '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a schema dump
    #[error("Failed to parse schema: {0}")]
    ParseError(String),

    /// The schema file extension is not one of json, yaml or yml
    #[error("Unsupported schema format '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// An entry has an empty remote name
    #[error("Entry {index} under '{parent}' has an empty name")]
    EmptyName { parent: String, index: usize },

    /// Two siblings share a remote name, so their paths would be identical
    #[error("Duplicate remote name '{remote_name}' under '{parent}'")]
    DuplicateRemoteName { parent: String, remote_name: String },

    /// No legal identifier survives sanitization
    #[error("Cannot derive an identifier from remote name '{remote_name}' at '{location}'")]
    UnsanitizableIdentifier {
        location: String,
        remote_name: String,
    },

    /// Sibling identifiers cannot be made unique
    #[error(
        "Identifier '{identifier}' for remote name '{remote_name}' at '{location}' could not be made unique"
    )]
    UnresolvableCollision {
        location: String,
        remote_name: String,
        identifier: String,
    },

    /// The declared kind contradicts the entry's structure
    #[error("Contradictory kind for '{location}': {reason}")]
    ContradictoryKind {
        location: String,
        reason: &'static str,
    },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
