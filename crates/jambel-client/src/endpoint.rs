//! Device address.

use std::fmt;
use std::str::FromStr;

use crate::error::{AddressError, ClientError, ClientResult};

/// Port a Jambel listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 10001;

/// Host and port of a Jambel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint. The host must not be empty.
    pub fn new(host: impl Into<String>, port: u16) -> ClientResult<Endpoint> {
        let host = host.into();
        if host.is_empty() {
            return Err(ClientError::Config("host must not be empty".to_string()));
        }
        Ok(Endpoint { host, port })
    }

    /// Create an endpoint on [`DEFAULT_PORT`].
    pub fn with_default_port(host: impl Into<String>) -> ClientResult<Endpoint> {
        Endpoint::new(host, DEFAULT_PORT)
    }

    /// Get the host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = AddressError;

    /// Parse `HOST[:PORT]`. The port defaults to [`DEFAULT_PORT`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let host = parts.next().unwrap_or_default();
        let port = parts.next();
        if parts.next().is_some() {
            return Err(AddressError::Format(s.to_string()));
        }
        if host.is_empty() {
            return Err(AddressError::EmptyHost(s.to_string()));
        }

        let port = match port {
            None => DEFAULT_PORT,
            Some(port) => port
                .parse()
                .map_err(|_| AddressError::InvalidPort(port.to_string()))?,
        };
        Ok(Endpoint {
            host: host.to_string(),
            port,
        })
    }
}
