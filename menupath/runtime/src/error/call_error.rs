//! Top-level error returned by leaf invocations.

use thiserror::Error;

use super::{PathIntegrityError, RemoteError, TransportError};

/// Error returned by [`Command::invoke`](crate::Command::invoke).
///
/// Nothing is retried or swallowed on the way up: the caller sees exactly
/// what the transport reported, classified so a lost session can be told
/// apart from a rejected command.
///
/// ## Examples
///
/// ```rust,ignore
/// use menupath_runtime::CallError;
///
/// match mesh.check().invoke(()).await {
///     Ok(report) => println!("{report:?}"),
///     Err(CallError::Disconnected { .. }) => reconnect_session(),
///     Err(CallError::Remote(err)) => eprintln!("{err}"),
///     Err(CallError::PathIntegrity(err)) => panic!("navigation bug: {err}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// The remote engine rejected the command.
    #[error(transparent)]
    Remote(RemoteError),

    /// The remote engine is gone.
    #[error("disconnected from remote engine: {reason}")]
    Disconnected {
        /// Reason reported by the transport.
        reason: String,
    },

    /// The path could not be encoded; nothing was sent.
    #[error(transparent)]
    PathIntegrity(#[from] PathIntegrityError),
}

impl CallError {
    /// Returns `true` if the session itself was lost.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, Self::Disconnected { .. })
    }

    /// The remote engine's diagnostic text, for command-level rejections.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote(err) => Some(err.message()),
            _ => None,
        }
    }
}

impl From<TransportError> for CallError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Remote(remote) => Self::Remote(remote),
            TransportError::Disconnected { reason } => Self::Disconnected { reason },
        }
    }
}

impl From<RemoteError> for CallError {
    fn from(err: RemoteError) -> Self {
        Self::Remote(err)
    }
}
