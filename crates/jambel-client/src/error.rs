//! Error types for the Jambel client.

use jambel_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur when talking to a Jambel.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid construction input.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Command rejected before sending, or response not understood.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Transport failure, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The raw device response, for errors caused by one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ClientError::Protocol(e) => e.raw_response(),
            _ => None,
        }
    }
}

/// A malformed `HOST[:PORT]` address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The address has no host part.
    #[error("host must not be empty in {0:?}")]
    EmptyHost(String),

    /// The port is not an integer in range.
    #[error("port needs to be an integer between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    /// More than one `:` in the address.
    #[error("address format: HOST[:PORT], got {0:?}")]
    Format(String),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
