//! Outcomes a transport can report instead of a result.

use thiserror::Error;

use super::RemoteError;

/// Failure reported by a [`Transport`](crate::Transport).
///
/// Transports must keep the two cases apart: a command the engine refused
/// is not a lost connection, and callers decide differently on each.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The engine received and rejected the command, or the call timed out.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The engine could not be reached at all.
    #[error("remote engine unreachable: {reason}")]
    Disconnected {
        /// Why the transport considers the session gone.
        reason: String,
    },
}

impl TransportError {
    /// Creates a rejection with the engine's diagnostic text.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(RemoteError::new(message))
    }

    /// Creates a connection-loss error.
    pub fn disconnected(reason: impl Into<String>) -> Self {
        Self::Disconnected {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_display_is_transparent() {
        let err = TransportError::remote("bad argument");
        assert_eq!(err.to_string(), "bad argument");
    }

    #[test]
    fn disconnected_display_names_reason() {
        let err = TransportError::disconnected("connection refused");
        assert_eq!(err.to_string(), "remote engine unreachable: connection refused");
    }
}
