//! Protocol client.
//!
//! [`JambelClient`] turns typed operations into command lines, sends each
//! one over its own connection and interprets the response. No connection
//! outlives the call that opened it.

use std::io::{Read, Write};

use jambel_protocol::{
    parse_status, parse_test, Color, Command, LineCodec, Orientation, SlotMap, StatusCode,
    StatusSnapshot,
};
use tracing::debug;

use crate::endpoint::{Endpoint, DEFAULT_PORT};
use crate::error::ClientResult;
use crate::module::LightModule;
use crate::transport::{TcpTransport, Transport};

/// Size of a single read from the connection.
const READ_CHUNK: usize = 256;

/// Client for one Jambel.
///
/// ```no_run
/// use jambel_client::{JambelClient, Orientation, ALL_OFF};
///
/// let jambel = JambelClient::new("traffic.example.com", 10001, Orientation::GreenOnTop)?;
/// jambel.green().on(None)?;
/// jambel.yellow().blink(false)?;
/// jambel.red().flash()?;
/// println!("{}", jambel.status()?);
/// jambel.set_all(ALL_OFF)?;
/// # Ok::<(), jambel_client::ClientError>(())
/// ```
///
/// Calls are sequential. The client holds no locks; share it across
/// threads only with external synchronization.
#[derive(Debug, Clone)]
pub struct JambelClient<T: Transport = TcpTransport> {
    endpoint: Endpoint,
    slots: SlotMap,
    transport: T,
}

impl JambelClient<TcpTransport> {
    /// Create a TCP client.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        orientation: Orientation,
    ) -> ClientResult<JambelClient<TcpTransport>> {
        Ok(JambelClient::with_transport(
            Endpoint::new(host, port)?,
            orientation,
            TcpTransport,
        ))
    }

    /// Create a TCP client on the default port with green on top.
    pub fn with_defaults(host: impl Into<String>) -> ClientResult<JambelClient<TcpTransport>> {
        JambelClient::new(host, DEFAULT_PORT, Orientation::default())
    }
}

impl<T: Transport> JambelClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(endpoint: Endpoint, orientation: Orientation, transport: T) -> Self {
        JambelClient {
            endpoint,
            slots: SlotMap::new(orientation),
            transport,
        }
    }

    /// Get the device address.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Get the mounting orientation.
    pub fn orientation(&self) -> Orientation {
        self.slots.orientation()
    }

    /// Get the color/position mapping.
    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========== Modules ==========

    /// Get a view of one light module.
    pub fn module(&self, color: Color) -> LightModule<'_, T> {
        LightModule::new(self, color)
    }

    /// The green module.
    pub fn green(&self) -> LightModule<'_, T> {
        self.module(Color::Green)
    }

    /// The yellow module.
    pub fn yellow(&self) -> LightModule<'_, T> {
        self.module(Color::Yellow)
    }

    /// The red module.
    pub fn red(&self) -> LightModule<'_, T> {
        self.module(Color::Red)
    }

    // ========== Module Commands ==========

    /// Switch a module on, optionally for `duration_ms` milliseconds.
    ///
    /// `None` and `Some(0)` both mean "on until told otherwise". Durations
    /// above 65000 ms fail before anything is sent.
    pub fn on(&self, color: Color, duration_ms: Option<u32>) -> ClientResult<()> {
        let cmd = Command::on(self.slots.position_of(color), duration_ms)?;
        self.send(&cmd).map(drop)
    }

    /// Switch a module off.
    pub fn off(&self, color: Color) -> ClientResult<()> {
        let position = self.slots.position_of(color);
        self.send(&Command::Off { position }).map(drop)
    }

    /// Let a module blink. With `inverse`, it is dark while the others are lit.
    pub fn blink(&self, color: Color, inverse: bool) -> ClientResult<()> {
        let position = self.slots.position_of(color);
        self.send(&Command::Blink { position, inverse }).map(drop)
    }

    /// Let a module flash.
    pub fn flash(&self, color: Color) -> ClientResult<()> {
        let position = self.slots.position_of(color);
        self.send(&Command::Flash { position }).map(drop)
    }

    /// Set all modules at once. `codes` are in green, yellow, red order.
    pub fn set_all(&self, codes: [StatusCode; 3]) -> ClientResult<()> {
        let codes = self.slots.to_positions(codes);
        self.send(&Command::SetAll { codes }).map(drop)
    }

    // ========== Timing ==========

    /// Set the blink-on time of all modules.
    pub fn set_blink_time_on(&self, ms: u32) -> ClientResult<()> {
        self.send(&Command::BlinkTimeOn { ms }).map(drop)
    }

    /// Set the blink-off time of all modules.
    pub fn set_blink_time_off(&self, ms: u32) -> ClientResult<()> {
        self.send(&Command::BlinkTimeOff { ms }).map(drop)
    }

    /// Set blink timing for one module.
    pub fn set_blink_time(&self, color: Color, on_ms: u32, off_ms: u32) -> ClientResult<()> {
        let position = self.slots.position_of(color);
        self.send(&Command::BlinkTime {
            position,
            on_ms,
            off_ms,
        })
        .map(drop)
    }

    // ========== Device ==========

    /// Switch all modules off and restore the default blink timing.
    pub fn reset(&self) -> ClientResult<()> {
        self.send(&Command::Reset).map(drop)
    }

    /// Query the state of all modules.
    pub fn status(&self) -> ClientResult<StatusSnapshot> {
        Ok(self.slots.snapshot(self.status_raw()?))
    }

    /// Query the state of all modules in device position order.
    pub fn status_raw(&self) -> ClientResult<[StatusCode; 3]> {
        let response = self.send(&Command::Status)?;
        Ok(parse_status(&response)?)
    }

    /// Run the device self-test. True if the device answered `OK`.
    pub fn test(&self) -> ClientResult<bool> {
        let response = self.send(&Command::Test)?;
        Ok(parse_test(&response))
    }

    /// Query the firmware version string.
    ///
    /// The response is returned as received, line terminator included.
    pub fn version(&self) -> ClientResult<String> {
        self.send(&Command::Version)
    }

    // ========== Transport ==========

    /// Send one command over a fresh connection and return the response line.
    ///
    /// The connection is dropped when this returns, on success or error.
    pub fn send(&self, cmd: &Command) -> ClientResult<String> {
        debug!("Connecting to {}...", self.endpoint);
        let mut conn = self.transport.connect(&self.endpoint)?;

        let line = cmd.encode();
        debug!("Send command {:?}.", String::from_utf8_lossy(&line));
        conn.write_all(&line)?;
        conn.flush()?;

        let response = read_line(&mut conn)?;
        debug!("Received response {:?}.", response);
        Ok(response)
    }
}

/// Read up to and including the next `\n`, or until the peer closes.
///
/// Gives up with [`ProtocolError::LineTooLong`](jambel_protocol::ProtocolError::LineTooLong)
/// if the peer keeps sending without a terminator.
fn read_line<R: Read>(conn: &mut R) -> ClientResult<String> {
    let mut codec = LineCodec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        if let Some(line) = codec.decode_line()? {
            return Ok(line);
        }
        let n = conn.read(&mut chunk)?;
        if n == 0 {
            return Ok(codec.take_remaining());
        }
        codec.push(&chunk[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::transport::RecordingTransport;
    use jambel_protocol::{ProtocolError, MAX_LINE_LENGTH, PANIC};

    fn client(orientation: Orientation) -> (JambelClient<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::new();
        let endpoint = Endpoint::with_default_port("my.host").unwrap();
        let client = JambelClient::with_transport(endpoint, orientation, transport.clone());
        (client, transport)
    }

    #[test]
    fn test_new_client() {
        let jambel = JambelClient::with_defaults("my.host").unwrap();
        assert_eq!(jambel.endpoint().host(), "my.host");
        assert_eq!(jambel.endpoint().port(), DEFAULT_PORT);
        assert_eq!(jambel.orientation(), Orientation::GreenOnTop);

        let jambel = JambelClient::new("my.host", 8000, Orientation::GreenOnTop).unwrap();
        assert_eq!(jambel.endpoint().port(), 8000);
    }

    #[test]
    fn test_new_client_empty_host() {
        let err = JambelClient::new("", DEFAULT_PORT, Orientation::GreenOnTop).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_status() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.push_response("status=0,0,0,1\r\n");

        let snapshot = jambel.status().unwrap();
        assert_eq!(snapshot.to_array(), [StatusCode::Off; 3]);
        assert_eq!(transport.raw_commands(), vec!["status\n"]);
    }

    #[test]
    fn test_status_green_on_top() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.push_response("status=2,3,4,1\r\n");

        let snapshot = jambel.status().unwrap();
        assert_eq!(snapshot.red, StatusCode::Blink);
        assert_eq!(snapshot.yellow, StatusCode::Flash);
        assert_eq!(snapshot.green, StatusCode::BlinkInverse);
    }

    #[test]
    fn test_status_raw_keeps_position_order() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.push_response("status=2,3,4\r\n");

        assert_eq!(
            jambel.status_raw().unwrap(),
            [StatusCode::Blink, StatusCode::Flash, StatusCode::BlinkInverse]
        );
    }

    #[test]
    fn test_status_incomplete_response_is_error() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.push_response(",0,0\r\n");

        let err = jambel.status().unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol(ProtocolError::StatusParse { .. })
        ));
        assert_eq!(err.raw_response(), Some(",0,0\r\n"));
        assert_eq!(transport.open_connections(), 0);
    }

    #[test]
    fn test_on_with_duration() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        jambel.on(Color::Red, Some(1000)).unwrap();
        assert_eq!(transport.raw_commands(), vec!["set=1,1000\n"]);
    }

    #[test]
    fn test_on_with_zero_duration() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        jambel.on(Color::Red, Some(0)).unwrap();
        assert_eq!(transport.last_command().as_deref(), Some("set=1,on"));
    }

    #[test]
    fn test_on_with_excessive_duration_sends_nothing() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        let err = jambel.on(Color::Red, Some(70_000)).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol(ProtocolError::DurationOutOfRange { ms: 70_000 })
        ));
        assert_eq!(transport.connection_count(), 0);
    }

    #[test]
    fn test_blink_inverse_wire_token() {
        let (jambel, transport) = client(Orientation::GreenOnBottom);
        jambel.blink(Color::Green, true).unwrap();
        assert_eq!(transport.raw_commands(), vec!["set=1,blink_invers\n"]);
    }

    #[test]
    fn test_set_blink_time() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        jambel.set_blink_time(Color::Red, 234, 567).unwrap();
        jambel.set_blink_time_on(123).unwrap();
        jambel.set_blink_time_off(567).unwrap();
        assert_eq!(
            transport.commands(),
            vec!["blink_time=1,234,567", "blink_time_on=123", "blink_time_off=567"]
        );
    }

    #[test]
    fn test_set_all_green_on_top_reverses() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        jambel
            .set_all([StatusCode::On, StatusCode::Blink, StatusCode::Flash])
            .unwrap();
        assert_eq!(transport.raw_commands(), vec!["set_all=3,2,1,0\n"]);
    }

    #[test]
    fn test_set_all_green_on_bottom_keeps_order() {
        let (jambel, transport) = client(Orientation::GreenOnBottom);
        jambel
            .set_all([StatusCode::On, StatusCode::Blink, StatusCode::Flash])
            .unwrap();
        assert_eq!(transport.raw_commands(), vec!["set_all=1,2,3,0\n"]);
    }

    #[test]
    fn test_set_all_panic() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        jambel.set_all(PANIC).unwrap();
        assert_eq!(transport.last_command().as_deref(), Some("set_all=3,3,3,0"));
    }

    #[test]
    fn test_reset_and_version() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.push_response("OK\r\n");
        transport.push_response("Jambel v2.1\r\n");

        jambel.reset().unwrap();
        assert_eq!(jambel.version().unwrap(), "Jambel v2.1\r\n");
        assert_eq!(transport.commands(), vec!["reset", "version"]);
    }

    #[test]
    fn test_self_test() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.push_response("OK\r\n");
        transport.push_response("OK then\r\n");
        transport.push_response("ERROR\r\n");

        assert!(jambel.test().unwrap());
        assert!(!jambel.test().unwrap());
        assert!(!jambel.test().unwrap());
    }

    #[test]
    fn test_every_call_opens_its_own_connection() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        jambel.reset().unwrap();
        jambel.reset().unwrap();
        assert_eq!(transport.connection_count(), 2);
        assert_eq!(transport.open_connections(), 0);
    }

    #[test]
    fn test_transport_errors_pass_through() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.refuse_connections();

        match jambel.reset().unwrap_err() {
            ClientError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionRefused),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_line_without_terminator() {
        let mut input = std::io::Cursor::new(b"status=1,1".to_vec());
        assert_eq!(read_line(&mut input).unwrap(), "status=1,1");
    }

    #[test]
    fn test_version_is_passed_through() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.push_response("  Jambel 2.0 \r\n");
        transport.push_response("Jambel 2.0");

        assert_eq!(jambel.version().unwrap(), "  Jambel 2.0 \r\n");
        assert_eq!(jambel.version().unwrap(), "Jambel 2.0");
    }

    #[test]
    fn test_endless_response_is_rejected() {
        let (jambel, transport) = client(Orientation::GreenOnTop);
        transport.push_response("x".repeat(MAX_LINE_LENGTH * 4));

        match jambel.version().unwrap_err() {
            ClientError::Protocol(ProtocolError::LineTooLong { max, actual }) => {
                assert_eq!(max, MAX_LINE_LENGTH);
                assert!(actual > MAX_LINE_LENGTH);
            }
            other => panic!("Expected LineTooLong, got {:?}", other),
        }
        assert_eq!(transport.open_connections(), 0);
    }

    #[test]
    fn test_read_line_in_small_chunks() {
        // Trickles one byte per read.
        struct Trickle(std::io::Cursor<Vec<u8>>);

        impl Read for Trickle {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                let n = buf.len().min(1);
                self.0.read(&mut buf[..n])
            }
        }

        let mut input = Trickle(std::io::Cursor::new(b"status=1,2,3\r\nrest".to_vec()));
        assert_eq!(read_line(&mut input).unwrap(), "status=1,2,3\r\n");
    }
}
