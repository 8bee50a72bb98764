//! Command-level rejections reported by the remote engine.

use std::time::Duration;

use thiserror::Error;

use crate::value::Value;

/// The remote engine received the command and rejected it.
///
/// The message is the engine's own diagnostic text and is displayed
/// unchanged. Any structured payload the transport supplies is carried
/// alongside it without interpretation.
///
/// ## Examples
///
/// ```
/// use menupath_runtime::RemoteError;
///
/// let err = RemoteError::new("Error: invalid zone name 'inlet-3'");
/// assert_eq!(err.to_string(), "Error: invalid zone name 'inlet-3'");
/// assert!(!err.is_timeout());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct RemoteError {
    message: String,
    payload: Option<Value>,
    timed_out: bool,
}

impl RemoteError {
    /// Creates a rejection carrying the engine's diagnostic text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            payload: None,
            timed_out: false,
        }
    }

    /// Creates the error a transport reports when a call outlives its deadline.
    pub fn timeout(after: Duration) -> Self {
        Self {
            message: format!("remote call timed out after {}ms", after.as_millis()),
            payload: None,
            timed_out: true,
        }
    }

    /// Attaches a structured diagnostic payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// The diagnostic text, verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured payload supplied by the transport, if any.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Returns `true` if the transport gave up waiting for the reply.
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_displayed_unchanged() {
        let text = "  Warning: 3 faces skipped\nError: operation failed  ";
        assert_eq!(RemoteError::new(text).to_string(), text);
    }

    #[test]
    fn timeout_is_flagged() {
        let err = RemoteError::timeout(Duration::from_secs(2));
        assert!(err.is_timeout());
        assert!(err.message().contains("2000ms"));
    }

    #[test]
    fn payload_is_carried() {
        let err = RemoteError::new("rejected").with_payload(Value::from("E042"));
        assert_eq!(err.payload(), Some(&Value::from("E042")));
    }
}
