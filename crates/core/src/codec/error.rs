//! Codec errors.

/// Decoding failures.
///
/// Encoding is total over [`KeyPart`](crate::KeyPart) and never fails, so
/// every variant here describes a malformed input string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Input ended in the middle of a part.
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    /// First character of a part is not a known type tag.
    #[error("Unknown type tag {0:?}")]
    UnknownTag(char),

    /// Length prefix is missing, non-canonical, or too large.
    #[error("Invalid length prefix after tag {0:?}")]
    InvalidLength(char),

    /// Payload does not parse as the tagged type.
    #[error("Invalid payload for tag {tag:?}: {reason}")]
    InvalidPayload {
        /// Tag of the offending part
        tag: char,
        /// What was wrong with it
        reason: String,
    },

    /// A complete part was decoded but input remains.
    #[error("{0} bytes of trailing data")]
    TrailingData(usize),
}
