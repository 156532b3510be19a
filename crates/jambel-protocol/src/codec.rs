//! Line-based codec for Jambel communication.
//!
//! Commands are terminated with a single `\n`. The device answers each
//! command with one line, usually terminated with `\r\n`.

use bytes::BytesMut;
use tracing::trace;

use crate::error::{ProtocolError, ProtocolResult};

/// Command line terminator.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Maximum response line length, terminator included.
pub const MAX_LINE_LENGTH: usize = 1024;

/// Initial receive buffer capacity. Responses are a few dozen bytes at most.
const INITIAL_CAPACITY: usize = 64;

/// A codec for writing command lines and reading response lines.
#[derive(Debug)]
pub struct LineCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
    /// Number of leading buffered bytes already known to hold no terminator.
    scanned: usize,
}

impl Default for LineCodec {
    fn default() -> Self {
        LineCodec::new()
    }
}

impl LineCodec {
    /// Create a new line codec.
    pub fn new() -> Self {
        LineCodec {
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY),
            scanned: 0,
        }
    }

    /// Encode a command for transmission, appending the `\n` terminator.
    pub fn encode_command(cmd: &str) -> Vec<u8> {
        let mut buf = Vec::with_capacity(cmd.len() + 1);
        buf.extend_from_slice(cmd.as_bytes());
        buf.push(LINE_TERMINATOR);
        buf
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        trace!(len = data.len(), "codec received bytes");
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a complete line from the buffer.
    ///
    /// The returned line includes everything up to and including the `\n`,
    /// so callers see the response exactly as the device sent it.
    /// Returns `Ok(None)` if no terminator has arrived yet. Each byte is
    /// searched once, however many times this is called.
    ///
    /// Fails once a line grows past [`MAX_LINE_LENGTH`]; the buffer is
    /// discarded in that case.
    pub fn decode_line(&mut self) -> ProtocolResult<Option<String>> {
        let found = self.buffer[self.scanned..]
            .iter()
            .position(|&b| b == LINE_TERMINATOR)
            .map(|i| self.scanned + i);

        let len = match found {
            Some(end) => end + 1,
            None => self.buffer.len(),
        };
        if len > MAX_LINE_LENGTH {
            self.buffer.clear();
            self.scanned = 0;
            return Err(ProtocolError::LineTooLong {
                max: MAX_LINE_LENGTH,
                actual: len,
            });
        }

        match found {
            Some(end) => {
                let line = self.buffer.split_to(end + 1);
                self.scanned = 0;
                Ok(Some(String::from_utf8_lossy(&line).into_owned()))
            }
            None => {
                self.scanned = self.buffer.len();
                Ok(None)
            }
        }
    }

    /// Take whatever is buffered, terminated or not.
    ///
    /// Used when the peer closes the connection before sending `\n`.
    pub fn take_remaining(&mut self) -> String {
        let rest = self.buffer.split();
        self.scanned = 0;
        String::from_utf8_lossy(&rest).into_owned()
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}
