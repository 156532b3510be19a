//! Per-color view of a client.

use std::fmt;

use jambel_protocol::{Color, Position, StatusCode};

use crate::client::JambelClient;
use crate::error::ClientResult;
use crate::transport::Transport;

/// One light module of a Jambel.
///
/// Borrowed from the client and stateless; every call goes through the
/// client using its color/position mapping.
pub struct LightModule<'a, T: Transport> {
    client: &'a JambelClient<T>,
    color: Color,
}

impl<'a, T: Transport> LightModule<'a, T> {
    pub(crate) fn new(client: &'a JambelClient<T>, color: Color) -> Self {
        LightModule { client, color }
    }

    /// Get the module's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Get the module's device position.
    pub fn position(&self) -> Position {
        self.client.slots().position_of(self.color)
    }

    /// Switch on, optionally for `duration_ms` milliseconds.
    pub fn on(&self, duration_ms: Option<u32>) -> ClientResult<()> {
        self.client.on(self.color, duration_ms)
    }

    pub fn off(&self) -> ClientResult<()> {
        self.client.off(self.color)
    }

    pub fn blink(&self, inverse: bool) -> ClientResult<()> {
        self.client.blink(self.color, inverse)
    }

    pub fn flash(&self) -> ClientResult<()> {
        self.client.flash(self.color)
    }

    /// Query this module's state. Fetches the full status.
    pub fn status(&self) -> ClientResult<StatusCode> {
        Ok(self.client.status()?.get(self.color))
    }

    pub fn blink_time(&self, on_ms: u32, off_ms: u32) -> ClientResult<()> {
        self.client.set_blink_time(self.color, on_ms, off_ms)
    }
}

impl<T: Transport> fmt::Debug for LightModule<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightModule")
            .field("color", &self.color)
            .field("position", &self.position())
            .finish()
    }
}
