//! Message-oriented transport boundary.
//!
//! The session layer only needs five primitives: connect, bind, send,
//! receive and close. [`Transport`] and [`MessageChannel`] capture exactly
//! those, so the protocol code runs unchanged over WebSockets ([`ws`]) or the
//! scripted channels used in tests.
//!
//! Every channel the session uses is wrapped in a [`Channel`], which enforces
//! the request/reply alternation the server relies on.

mod channel;
pub mod ws;

pub use channel::{Channel, Role};
pub use ws::{WsChannel, WsTransport};

use crate::WS_URL_PREFIX;
use crate::error::transport::TransportError;

use std::fmt::{Display, Formatter, Result as FormatResult};

use url::Url;

/// One end of a message channel.
///
/// `receive` copies at most `buffer.len()` bytes of the next message and
/// returns how many it copied. A peer that has gone away is reported as
/// `Ok(0)`, never as an error, so callers can treat a zero-length receive as
/// the dead-server signal.
pub trait MessageChannel {
    fn send(&mut self, message: &[u8]) -> Result<(), TransportError>;

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError>;

    fn close(&mut self) -> Result<(), TransportError>;
}

/// Factory for channels.
pub trait Transport {
    type Channel: MessageChannel;

    /// Open a channel to a listening peer (initiator role).
    fn connect(&self, endpoint: &Endpoint) -> Result<Self::Channel, TransportError>;

    /// Listen for a peer (responder role).
    fn bind(&self, endpoint: &Endpoint) -> Result<Self::Channel, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `ws://host:port/`
    #[track_caller]
    pub fn url(&self) -> Result<Url, TransportError> {
        Ok(Url::parse(&format!(
            "{WS_URL_PREFIX}{}:{}/",
            self.host, self.port
        ))?)
    }

    /// `host:port`, suitable for socket binding.
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Display for Endpoint {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}:{}", self.host, self.port)
    }
}
