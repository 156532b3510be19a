//! Data model shared by the client and the CLI.
//!
//! A Jambel has three light modules. The device addresses them by
//! [`Position`] (1, 2, 3 from bottom to top); users address them by
//! [`Color`]. Which color sits at which position depends on how the unit
//! is mounted, captured by [`Orientation`] and resolved once into a
//! [`SlotMap`].

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ProtocolError, ProtocolResult};

// ============================================================================
// Status Codes
// ============================================================================

/// Light state as reported by the device. The discriminants are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StatusCode {
    /// Module is dark.
    Off = 0,
    /// Module is lit.
    On = 1,
    /// Module blinks with the configured on/off timing.
    Blink = 2,
    /// Module flashes rapidly.
    Flash = 3,
    /// Module blinks in opposite phase to [`StatusCode::Blink`].
    BlinkInverse = 4,
}

impl StatusCode {
    /// Get the wire value.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a status code from its wire value.
    pub fn from_code(code: u8) -> Option<StatusCode> {
        match code {
            0 => Some(StatusCode::Off),
            1 => Some(StatusCode::On),
            2 => Some(StatusCode::Blink),
            3 => Some(StatusCode::Flash),
            4 => Some(StatusCode::BlinkInverse),
            _ => None,
        }
    }

    /// Lower-case name, as used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Off => "off",
            StatusCode::On => "on",
            StatusCode::Blink => "blink",
            StatusCode::Flash => "flash",
            StatusCode::BlinkInverse => "blink_inverse",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All modules off.
pub const ALL_OFF: [StatusCode; 3] = [StatusCode::Off, StatusCode::Off, StatusCode::Off];

/// All modules flashing.
pub const PANIC: [StatusCode; 3] = [StatusCode::Flash, StatusCode::Flash, StatusCode::Flash];

// ============================================================================
// Colors and Positions
// ============================================================================

/// Logical identity of a light module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Green,
    Yellow,
    Red,
}

impl Color {
    /// All colors in logical order: green, yellow, red.
    pub const ALL: [Color; 3] = [Color::Green, Color::Yellow, Color::Red];

    fn index(self) -> usize {
        match self {
            Color::Green => 0,
            Color::Yellow => 1,
            Color::Red => 2,
        }
    }

    /// Lower-case name, as used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Red => "red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "red" => Ok(Color::Red),
            _ => Err(ProtocolError::UnknownColor(s.to_string())),
        }
    }
}

/// Device-side slot address of a light module, always in `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(u8);

impl Position {
    /// All positions in device order.
    pub const ALL: [Position; 3] = [Position(1), Position(2), Position(3)];

    /// Create a position, failing for anything outside `1..=3`.
    pub fn new(no: u8) -> ProtocolResult<Position> {
        if (1..=3).contains(&no) {
            Ok(Position(no))
        } else {
            Err(ProtocolError::InvalidPosition(no))
        }
    }

    /// Get the 1-based slot number.
    pub fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Orientation
// ============================================================================

/// How the unit is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Green at the top: red is position 1, green is position 3.
    #[default]
    GreenOnTop,
    /// Red at the top: green is position 1, red is position 3.
    GreenOnBottom,
}

impl Orientation {
    /// Get the string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::GreenOnTop => "green-on-top",
            Orientation::GreenOnBottom => "green-on-bottom",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green-on-top" | "top" => Ok(Orientation::GreenOnTop),
            "green-on-bottom" | "bottom" | "red-on-top" => Ok(Orientation::GreenOnBottom),
            _ => Err(ProtocolError::UnknownOrientation(s.to_string())),
        }
    }
}

// ============================================================================
// Slot Map
// ============================================================================

/// Fixed bijection between colors and positions for one orientation.
///
/// Both directions are stored as lookup tables so no translation is
/// recomputed per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotMap {
    orientation: Orientation,
    /// Indexed by [`Color::index`].
    positions: [Position; 3],
    /// Indexed by [`Position::index`].
    colors: [Color; 3],
}

impl SlotMap {
    /// Build the mapping for an orientation.
    pub fn new(orientation: Orientation) -> SlotMap {
        let colors = match orientation {
            Orientation::GreenOnTop => [Color::Red, Color::Yellow, Color::Green],
            Orientation::GreenOnBottom => [Color::Green, Color::Yellow, Color::Red],
        };
        let mut positions = Position::ALL;
        for position in Position::ALL {
            positions[colors[position.index()].index()] = position;
        }
        SlotMap {
            orientation,
            positions,
            colors,
        }
    }

    /// Get the orientation this map was built for.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Get the device position of a color.
    pub fn position_of(&self, color: Color) -> Position {
        self.positions[color.index()]
    }

    /// Get the color mounted at a position.
    pub fn color_of(&self, position: Position) -> Color {
        self.colors[position.index()]
    }

    /// Reorder green/yellow/red values into device position order.
    pub fn to_positions<T: Copy>(&self, by_color: [T; 3]) -> [T; 3] {
        self.colors.map(|color| by_color[color.index()])
    }

    /// Attach colors to position-ordered status codes.
    pub fn snapshot(&self, by_position: [StatusCode; 3]) -> StatusSnapshot {
        let mut by_color = ALL_OFF;
        for position in Position::ALL {
            by_color[self.color_of(position).index()] = by_position[position.index()];
        }
        StatusSnapshot {
            green: by_color[0],
            yellow: by_color[1],
            red: by_color[2],
        }
    }
}

impl Default for SlotMap {
    fn default() -> Self {
        SlotMap::new(Orientation::default())
    }
}

// ============================================================================
// Status Snapshot
// ============================================================================

/// State of all three modules, taken from a single status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub green: StatusCode,
    pub yellow: StatusCode,
    pub red: StatusCode,
}

impl StatusSnapshot {
    /// Get the state of one module.
    pub fn get(&self, color: Color) -> StatusCode {
        match color {
            Color::Green => self.green,
            Color::Yellow => self.yellow,
            Color::Red => self.red,
        }
    }

    /// Codes in logical order: green, yellow, red.
    pub fn to_array(&self) -> [StatusCode; 3] {
        [self.green, self.yellow, self.red]
    }
}

impl Index<Color> for StatusSnapshot {
    type Output = StatusCode;

    fn index(&self, color: Color) -> &StatusCode {
        match color {
            Color::Green => &self.green,
            Color::Yellow => &self.yellow,
            Color::Red => &self.red,
        }
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "green={} yellow={} red={}",
            self.green, self.yellow, self.red
        )
    }
}
