//! Commands that can be sent to a Jambel.
//!
//! Every command is a single line of comma-separated fields. Module
//! commands address the device by [`Position`]; translating colors is the
//! caller's job (see [`SlotMap`](crate::SlotMap)).

use crate::codec::LineCodec;
use crate::error::{ProtocolError, ProtocolResult};
use crate::types::{Position, StatusCode};

/// Longest duration accepted by a timed "on" command.
pub const MAX_ON_DURATION_MS: u32 = 65_000;

/// Commands understood by the Jambel firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ========== Module Commands ==========
    /// Switch a module on indefinitely.
    On { position: Position },

    /// Switch a module on for a limited time. Build with [`Command::on`].
    OnFor { position: Position, ms: u32 },

    /// Switch a module off.
    Off { position: Position },

    /// Let a module blink, optionally in inverse phase.
    Blink { position: Position, inverse: bool },

    /// Let a module flash.
    Flash { position: Position },

    /// Set all three modules. Codes are in device position order.
    SetAll { codes: [StatusCode; 3] },

    // ========== Timing Commands ==========
    /// Set the global blink-on duration.
    BlinkTimeOn { ms: u32 },

    /// Set the global blink-off duration.
    BlinkTimeOff { ms: u32 },

    /// Set blink timing for one module.
    BlinkTime {
        position: Position,
        on_ms: u32,
        off_ms: u32,
    },

    // ========== Device Commands ==========
    /// Switch everything off and restore default blink timing.
    Reset,

    /// Query the state of all modules.
    Status,

    /// Run the device self-test.
    Test,

    /// Query the firmware version.
    Version,
}

impl Command {
    /// Build an "on" command with an optional duration.
    ///
    /// A missing or zero duration means "on indefinitely". Durations above
    /// [`MAX_ON_DURATION_MS`] are rejected.
    pub fn on(position: Position, duration_ms: Option<u32>) -> ProtocolResult<Command> {
        match duration_ms {
            None | Some(0) => Ok(Command::On { position }),
            Some(ms) if ms > MAX_ON_DURATION_MS => Err(ProtocolError::DurationOutOfRange { ms }),
            Some(ms) => Ok(Command::OnFor { position, ms }),
        }
    }

    /// Encode the command as a line to send to the device.
    /// Returns the bytes to send (including the `\n` terminator).
    pub fn encode(&self) -> Vec<u8> {
        LineCodec::encode_command(&self.to_command_string())
    }

    /// Get the command string without the terminator.
    pub fn to_command_string(&self) -> String {
        match self {
            Command::On { position } => format!("set={},on", position),
            Command::OnFor { position, ms } => format!("set={},{}", position, ms),
            Command::Off { position } => format!("set={},off", position),
            Command::Blink { position, inverse: false } => format!("set={},blink", position),
            // The firmware spells it without the trailing "e".
            Command::Blink { position, inverse: true } => format!("set={},blink_invers", position),
            Command::Flash { position } => format!("set={},flash", position),
            Command::SetAll { codes: [c1, c2, c3] } => {
                format!("set_all={},{},{},0", c1.code(), c2.code(), c3.code())
            }

            Command::BlinkTimeOn { ms } => format!("blink_time_on={}", ms),
            Command::BlinkTimeOff { ms } => format!("blink_time_off={}", ms),
            Command::BlinkTime {
                position,
                on_ms,
                off_ms,
            } => format!("blink_time={},{},{}", position, on_ms, off_ms),

            Command::Reset => "reset".to_string(),
            Command::Status => "status".to_string(),
            Command::Test => "test".to_string(),
            Command::Version => "version".to_string(),
        }
    }
}
