//! Path encoding errors.
//!
//! Generated code never builds the paths these errors describe; seeing one
//! at runtime points at a bug in hand-written navigation or in the runtime.

use thiserror::Error;

/// A path could not be flattened into, or parsed from, a transport address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathIntegrityError {
    /// The root path addresses the session, not a command.
    #[error("cannot address the empty path")]
    EmptyPath,

    /// A segment has an empty remote name.
    #[error("segment {position} has an empty remote name")]
    EmptySegmentName {
        /// Zero-based position of the segment.
        position: usize,
    },

    /// A named-object segment carries an empty instance key.
    #[error("named-object segment '{remote_name}' at position {position} is missing its instance key")]
    MissingInstanceKey {
        /// Remote name of the collection segment.
        remote_name: String,
        /// Zero-based position of the segment.
        position: usize,
    },

    /// An address string does not follow the wire form.
    #[error("malformed address '{address}': {reason}")]
    MalformedAddress {
        /// The offending address.
        address: String,
        /// What the parser tripped over.
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_message_names_segment() {
        let err = PathIntegrityError::MissingInstanceKey {
            remote_name: "controls".to_string(),
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "named-object segment 'controls' at position 2 is missing its instance key"
        );
    }
}
