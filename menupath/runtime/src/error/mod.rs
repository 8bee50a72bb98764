//! Layered error types for the runtime crate.
//!
//! The error hierarchy separates what the caller must act on differently:
//! - [`CallError`] - Top-level error returned by a leaf invocation
//! - [`RemoteError`] - The remote engine rejected the command
//! - [`TransportError`] - What a [`Transport`](crate::Transport) reports
//! - [`PathIntegrityError`] - A path could not be encoded or decoded
//! - [`ConfigError`] - Transport construction and configuration errors

mod call_error;
mod config_error;
mod path_error;
mod remote_error;
mod transport_error;

pub use call_error::CallError;
pub use config_error::ConfigError;
pub use path_error::PathIntegrityError;
pub use remote_error::RemoteError;
pub use transport_error::TransportError;
