//! Jambel command-line tool.
//!
//! ```text
//! jambel HOST[:PORT] CMD [CMD ...] [--debug] [--red-on-top] [--json]
//! ```
//!
//! All arguments are validated before the first command is sent. Commands
//! then run strictly in the order given; `status`, `version` and `test`
//! print their results to stdout.

pub mod args;
pub mod dispatch;
pub mod error;
pub mod logging;

pub use args::{parse_address, parse_command, Cli, CliCommand, LightAction};
pub use dispatch::{run, Dispatcher};
pub use error::{ArgumentError, CliError, CliResult};
