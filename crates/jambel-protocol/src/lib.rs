//! Jambel Line Protocol
//!
//! This crate provides types and utilities for talking to a Jambel, a
//! three-module signal light (green, yellow, red) controlled over a
//! line-based text protocol.
//!
//! # Protocol Overview
//!
//! - **Commands** (host → device): one line, fields separated by commas,
//!   terminated with `\n`
//! - **Responses** (device → host): one line per command
//!
//! Modules are addressed by position (1 to 3, bottom to top). Which color
//! sits at which position depends on how the unit is mounted; see
//! [`SlotMap`].
//!
//! This crate does no I/O.
//!
//! # Example
//!
//! ```rust
//! use jambel_protocol::{parse_status, Color, Command, Orientation, SlotMap};
//!
//! let map = SlotMap::new(Orientation::GreenOnTop);
//! let cmd = Command::on(map.position_of(Color::Green), None)?;
//! assert_eq!(cmd.encode(), b"set=3,on\n");
//!
//! let snapshot = map.snapshot(parse_status("status=0,0,1\r\n")?);
//! assert_eq!(snapshot.green, jambel_protocol::StatusCode::On);
//! # Ok::<(), jambel_protocol::ProtocolError>(())
//! ```

mod codec;
mod commands;
mod error;
mod responses;
mod types;

pub use codec::*;
pub use commands::*;
pub use error::*;
pub use responses::*;
pub use types::*;
