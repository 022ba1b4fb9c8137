use naia_serde::SerdeErr;
use thiserror::Error;

/// Errors that can occur while decoding a `PoseBundle` from wire bytes
///
/// A failed decode never yields a partially populated bundle; callers treat
/// the delivery as if nothing had arrived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer is shorter than one encoded bundle
    #[error("Truncated pose bundle: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Buffer is longer than one encoded bundle
    #[error("Trailing bytes after pose bundle: expected {expected} bytes, got {actual}")]
    TrailingBytes { expected: usize, actual: usize },

    /// Reader ran out of bits mid-field even though the length matched
    #[error("Malformed pose bundle payload")]
    Malformed,
}

impl From<SerdeErr> for DecodeError {
    fn from(_: SerdeErr) -> Self {
        DecodeError::Malformed
    }
}
