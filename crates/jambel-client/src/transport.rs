//! Byte-stream transports.
//!
//! The client opens one connection per command through a [`Transport`].
//! [`TcpTransport`] is what real devices use; [`RecordingTransport`] keeps
//! everything in memory and records what was sent.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::endpoint::Endpoint;

/// Opens connections to a device.
pub trait Transport {
    /// A single open connection. Dropping it closes it.
    type Connection: Read + Write;

    /// Open a new connection to the endpoint.
    fn connect(&self, endpoint: &Endpoint) -> io::Result<Self::Connection>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Connection = T::Connection;

    fn connect(&self, endpoint: &Endpoint) -> io::Result<Self::Connection> {
        (**self).connect(endpoint)
    }
}

// ============================================================================
// TCP
// ============================================================================

/// Plain blocking TCP with the operating system's default timeouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport;

impl Transport for TcpTransport {
    type Connection = TcpStream;

    fn connect(&self, endpoint: &Endpoint) -> io::Result<TcpStream> {
        TcpStream::connect((endpoint.host(), endpoint.port()))
    }
}

// ============================================================================
// Recording
// ============================================================================

/// Response used when nothing has been queued.
pub const DEFAULT_RESPONSE: &str = "OK\r\n";

#[derive(Debug, Default)]
struct Recording {
    responses: VecDeque<String>,
    default_response: Option<String>,
    commands: Vec<String>,
    addresses: Vec<(String, u16)>,
    connections: usize,
    open: usize,
    refuse: bool,
}

/// In-memory transport that records every command it receives.
///
/// Clones share the same recording, so a test can keep one handle and
/// give another to the client.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingTransport {
    /// Create a transport that answers every command with `OK\r\n`.
    pub fn new() -> Self {
        RecordingTransport::default()
    }

    /// Queue a response for the next connection. Queued responses are
    /// used in order; once exhausted the default response applies.
    pub fn push_response(&self, response: impl Into<String>) {
        self.inner.lock().responses.push_back(response.into());
    }

    /// Replace the response used when the queue is empty.
    pub fn set_default_response(&self, response: impl Into<String>) {
        self.inner.lock().default_response = Some(response.into());
    }

    /// Make every following connection attempt fail.
    pub fn refuse_connections(&self) {
        self.inner.lock().refuse = true;
    }

    /// Commands received so far, oldest first, without the final `\n`.
    pub fn commands(&self) -> Vec<String> {
        self.inner
            .lock()
            .commands
            .iter()
            .map(|cmd| strip_terminator(cmd).to_string())
            .collect()
    }

    /// The most recent command, without the final `\n`.
    pub fn last_command(&self) -> Option<String> {
        self.inner
            .lock()
            .commands
            .last()
            .map(|cmd| strip_terminator(cmd).to_string())
    }

    /// Everything written on each connection, exactly as written.
    pub fn raw_commands(&self) -> Vec<String> {
        self.inner.lock().commands.clone()
    }

    /// Host and port of every connection opened, oldest first.
    pub fn addresses(&self) -> Vec<(String, u16)> {
        self.inner.lock().addresses.clone()
    }

    /// Number of connections opened so far.
    pub fn connection_count(&self) -> usize {
        self.inner.lock().connections
    }

    /// Number of connections not yet dropped.
    pub fn open_connections(&self) -> usize {
        self.inner.lock().open
    }
}

fn strip_terminator(cmd: &str) -> &str {
    cmd.strip_suffix('\n').unwrap_or(cmd)
}

impl Transport for RecordingTransport {
    type Connection = RecordedConnection;

    fn connect(&self, endpoint: &Endpoint) -> io::Result<RecordedConnection> {
        let mut recording = self.inner.lock();
        if recording.refuse {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("connection to {} refused", endpoint),
            ));
        }
        let response = match recording.responses.pop_front() {
            Some(response) => response,
            None => recording
                .default_response
                .clone()
                .unwrap_or_else(|| DEFAULT_RESPONSE.to_string()),
        };
        recording
            .addresses
            .push((endpoint.host().to_string(), endpoint.port()));
        recording.connections += 1;
        recording.open += 1;

        Ok(RecordedConnection {
            recording: Arc::clone(&self.inner),
            written: Vec::new(),
            response: io::Cursor::new(response.into_bytes()),
        })
    }
}

/// One connection handed out by [`RecordingTransport`].
#[derive(Debug)]
pub struct RecordedConnection {
    recording: Arc<Mutex<Recording>>,
    written: Vec<u8>,
    response: io::Cursor<Vec<u8>>,
}

impl Read for RecordedConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

impl Write for RecordedConnection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for RecordedConnection {
    fn drop(&mut self) {
        let mut recording = self.recording.lock();
        recording.open -= 1;
        if !self.written.is_empty() {
            let text = String::from_utf8_lossy(&self.written).into_owned();
            recording.commands.push(text);
        }
    }
}
