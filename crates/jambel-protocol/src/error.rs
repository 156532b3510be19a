//! Error types for the Jambel protocol.

use thiserror::Error;

/// Errors that can occur when encoding commands or parsing responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Timed "on" requested for longer than the device supports.
    #[error("duration exceeds 65000 ms (got {ms} ms)")]
    DurationOutOfRange { ms: u32 },

    /// A status response did not match `status=N,N,N[,...]`.
    #[error("could not parse jambel status {raw:?}")]
    StatusParse {
        /// The full response as received.
        raw: String,
    },

    /// A status response carried a code outside the known set.
    #[error("unknown status code {code} in jambel status {raw:?}")]
    UnknownStatusCode {
        code: u32,
        /// The full response as received.
        raw: String,
    },

    /// A response line exceeded the maximum length.
    #[error("response line too long: max {max} bytes, got {actual}")]
    LineTooLong { max: usize, actual: usize },

    /// Module position outside `1..=3`.
    #[error("invalid module position {0} (must be 1-3)")]
    InvalidPosition(u8),

    /// Unrecognized color name.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// Unrecognized orientation name.
    #[error("unknown orientation: {0}")]
    UnknownOrientation(String),
}

impl ProtocolError {
    /// The raw device response, for errors caused by one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ProtocolError::StatusParse { raw } | ProtocolError::UnknownStatusCode { raw, .. } => {
                Some(raw)
            }
            _ => None,
        }
    }
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
