//! Jambel Client
//!
//! Remote control for a Jambel signal light. Every operation opens a new
//! connection, sends one command line, reads one response line and closes
//! the connection again.
//!
//! ```no_run
//! use jambel_client::{JambelClient, Orientation, StatusCode};
//!
//! // Red on top: green is the bottom module.
//! let jambel = JambelClient::new("traffic.example.com", 10001, Orientation::GreenOnBottom)?;
//! jambel.green().on(Some(5000))?;
//! if jambel.red().status()? == StatusCode::Blink {
//!     println!("red light is blinking!");
//! }
//! # Ok::<(), jambel_client::ClientError>(())
//! ```

mod client;
mod endpoint;
mod error;
mod module;
mod transport;

pub use client::JambelClient;
pub use endpoint::{Endpoint, DEFAULT_PORT};
pub use error::{AddressError, ClientError, ClientResult};
pub use module::LightModule;
pub use transport::{
    RecordedConnection, RecordingTransport, TcpTransport, Transport, DEFAULT_RESPONSE,
};

pub use jambel_protocol::{
    strip_line_end, Color, Command, Orientation, Position, ProtocolError, SlotMap, StatusCode,
    StatusSnapshot, ALL_OFF, PANIC,
};
