//! Command-line model.
//!
//! Every positional argument is validated by a value parser before
//! [`Cli`] exists, so a bad address or command aborts the run before any
//! connection is opened.

use std::fmt;

use clap::Parser;
use jambel_client::{Color, Endpoint, Orientation};

use crate::error::ArgumentError;

/// Values accepted by colored commands.
pub const ALLOWED_VALUES: [&str; 5] = ["on", "off", "blink", "blink_inverse", "flash"];

/// Remote control a Jambel.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jambel",
    version,
    about = "Remote control a Jambel.",
    after_help = "Example: jambel traffic.example.com --debug green=on yellow=blink red=off"
)]
pub struct Cli {
    /// Jambel address (format: <host>[:<port>])
    #[arg(value_name = "HOST[:PORT]", value_parser = parse_address)]
    pub address: Endpoint,

    /// A command for the Jambel to execute. Multiple commands are executed in order.
    /// One of: status, reset, version, test, green=VALUE, yellow=VALUE, red=VALUE
    /// where VALUE is on, off, blink, blink_inverse or flash.
    #[arg(value_name = "CMD", required = true, num_args = 1.., value_parser = parse_command)]
    pub commands: Vec<CliCommand>,

    /// Turn debugging on
    #[arg(long)]
    pub debug: bool,

    /// Red light is on top (default: green on top)
    #[arg(long)]
    pub red_on_top: bool,

    /// Print status, version and test results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Mounting orientation selected by `--red-on-top`.
    pub fn orientation(&self) -> Orientation {
        if self.red_on_top {
            Orientation::GreenOnBottom
        } else {
            Orientation::GreenOnTop
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

/// What to do with a single light module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightAction {
    On,
    Off,
    Blink,
    BlinkInverse,
    Flash,
}

impl LightAction {
    /// Get the string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            LightAction::On => "on",
            LightAction::Off => "off",
            LightAction::Blink => "blink",
            LightAction::BlinkInverse => "blink_inverse",
            LightAction::Flash => "flash",
        }
    }

    fn from_value(value: &str) -> Option<LightAction> {
        match value {
            "on" => Some(LightAction::On),
            "off" => Some(LightAction::Off),
            "blink" => Some(LightAction::Blink),
            "blink_inverse" => Some(LightAction::BlinkInverse),
            "flash" => Some(LightAction::Flash),
            _ => None,
        }
    }
}

/// One positional command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Status,
    Reset,
    Version,
    Test,
    /// `COLOR=VALUE`
    Light { color: Color, action: LightAction },
}

impl CliCommand {
    /// Whether the command's result is printed.
    pub fn is_chatty(&self) -> bool {
        matches!(self, CliCommand::Status | CliCommand::Version | CliCommand::Test)
    }
}

impl fmt::Display for CliCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliCommand::Status => f.write_str("status"),
            CliCommand::Reset => f.write_str("reset"),
            CliCommand::Version => f.write_str("version"),
            CliCommand::Test => f.write_str("test"),
            CliCommand::Light { color, action } => write!(f, "{}={}", color, action.as_str()),
        }
    }
}

// ============================================================================
// Parsers
// ============================================================================

/// Parse `HOST[:PORT]`.
pub fn parse_address(s: &str) -> Result<Endpoint, ArgumentError> {
    Ok(s.parse::<Endpoint>()?)
}

/// Parse one command token. Command names are case-insensitive, values are not.
pub fn parse_command(s: &str) -> Result<CliCommand, ArgumentError> {
    let (name, value) = match s.split_once('=') {
        Some((name, value)) => (name.to_lowercase(), Some(value)),
        None => (s.to_lowercase(), None),
    };

    let simple = match name.as_str() {
        "status" => Some(CliCommand::Status),
        "reset" => Some(CliCommand::Reset),
        "version" => Some(CliCommand::Version),
        "test" => Some(CliCommand::Test),
        _ => None,
    };
    if let Some(cmd) = simple {
        return match value {
            None => Ok(cmd),
            Some(_) => Err(ArgumentError::UnexpectedValue(name)),
        };
    }

    let color: Color = name
        .parse()
        .map_err(|_| ArgumentError::UnknownCommand(s.to_string()))?;
    let value = value.ok_or_else(|| ArgumentError::MissingValue(name.clone()))?;
    let action = LightAction::from_value(value).ok_or_else(|| ArgumentError::InvalidValue {
        command: name.clone(),
        value: value.to_string(),
    })?;
    Ok(CliCommand::Light { color, action })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jambel_client::{AddressError, DEFAULT_PORT};

    #[test]
    fn test_parse_address() {
        let endpoint = parse_address("my.host").unwrap();
        assert_eq!(endpoint.host(), "my.host");
        assert_eq!(endpoint.port(), DEFAULT_PORT);

        let endpoint = parse_address("my.host:8118").unwrap();
        assert_eq!(endpoint.port(), 8118);
    }

    #[test]
    fn test_parse_address_failures() {
        use AddressError::*;

        let address_error = |s: &str| match parse_address(s) {
            Err(ArgumentError::Address(e)) => e,
            other => panic!("Expected address error for {:?}, got {:?}", s, other),
        };
        assert!(matches!(address_error(""), EmptyHost(_)));
        assert!(matches!(address_error(":1025"), EmptyHost(_)));
        assert!(matches!(address_error(":bork"), EmptyHost(_)));
        assert!(matches!(address_error("my.host:"), InvalidPort(_)));
        assert!(matches!(address_error("my.host:bork"), InvalidPort(_)));
        assert!(matches!(address_error("my.host:99999"), InvalidPort(_)));
        assert!(matches!(address_error("my.host:bork:"), Format(_)));
    }

    #[test]
    fn test_parse_address_error_message() {
        let err = parse_address("my.host:bork").unwrap_err();
        assert_eq!(
            err.to_string(),
            "port needs to be an integer between 0 and 65535, got \"bork\""
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("status").unwrap(), CliCommand::Status);
        assert_eq!(parse_command("reset").unwrap(), CliCommand::Reset);
        assert_eq!(parse_command("VERSION").unwrap(), CliCommand::Version);
        assert_eq!(parse_command("test").unwrap(), CliCommand::Test);
    }

    #[test]
    fn test_parse_light_commands() {
        assert_eq!(
            parse_command("green=blink_inverse").unwrap(),
            CliCommand::Light {
                color: Color::Green,
                action: LightAction::BlinkInverse
            }
        );
        assert_eq!(
            parse_command("Red=flash").unwrap(),
            CliCommand::Light {
                color: Color::Red,
                action: LightAction::Flash
            }
        );
    }

    #[test]
    fn test_parse_command_failures() {
        assert!(matches!(
            parse_command("version=on"),
            Err(ArgumentError::UnexpectedValue(_))
        ));
        assert!(matches!(parse_command("unknown"), Err(ArgumentError::UnknownCommand(_))));
        assert!(matches!(
            parse_command("unknown=command"),
            Err(ArgumentError::UnknownCommand(_))
        ));
        assert!(matches!(parse_command("red"), Err(ArgumentError::MissingValue(_))));
        assert!(matches!(parse_command("red="), Err(ArgumentError::InvalidValue { .. })));
        assert!(matches!(
            parse_command("green=scream"),
            Err(ArgumentError::InvalidValue { .. })
        ));
        assert!(matches!(parse_command("yellow=="), Err(ArgumentError::InvalidValue { .. })));
        assert!(matches!(parse_command("green=ON"), Err(ArgumentError::InvalidValue { .. })));
    }

    #[test]
    fn test_chatty_commands() {
        for token in ["status", "reset", "version", "test"] {
            let cmd = parse_command(token).unwrap();
            assert_eq!(cmd.is_chatty(), token != "reset");
            assert_eq!(cmd.to_string(), token);
        }
        for value in ALLOWED_VALUES {
            let token = format!("yellow={}", value);
            let cmd = parse_command(&token).unwrap();
            assert!(!cmd.is_chatty());
            assert_eq!(cmd.to_string(), token);
        }
    }
}
