//! Error types for the command-line tool.

use jambel_client::{AddressError, ClientError};
use thiserror::Error;

/// A malformed address or command token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The device address does not match `HOST[:PORT]`.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Token is neither a simple nor a colored command.
    #[error("command not found: {0:?}")]
    UnknownCommand(String),

    /// A simple command was given a value.
    #[error("command {0} takes no value")]
    UnexpectedValue(String),

    /// A colored command without `=VALUE`.
    #[error("command needs format {0}=VALUE")]
    MissingValue(String),

    /// A colored command with an unsupported value.
    #[error("value {value:?} for command {command} needs to be one of {allowed:?}", allowed = crate::args::ALLOWED_VALUES)]
    InvalidValue { command: String, value: String },
}

/// Errors that end a run after argument parsing succeeded.
#[derive(Debug, Error)]
pub enum CliError {
    /// A device command failed. Remaining commands are skipped.
    #[error("command {command} failed: {source}")]
    Command {
        command: String,
        #[source]
        source: ClientError,
    },

    /// Writing results to the output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Encoding JSON output failed.
    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
