//! Client-side connector for the remote window server.
//!
//! A [`Connector`] performs the registration handshake and yields a
//! [`Session`], which splits into a [`WindowClient`] for window commands and an
//! [`EventDispatcher`] for input and window events.

pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod transport;
pub mod window;

#[cfg(test)]
mod tests;

pub use config::ConnectorConfig;
pub use error::{ConfigError, ConnectorError, SessionError, TransportError};
pub use events::{EventDispatcher, Events};
pub use session::{Connector, Session};
pub use transport::{Channel, Endpoint, MessageChannel, Transport, WsChannel, WsTransport};
pub use window::{WindowClient, WindowRegistry};

pub const DEFAULT_SERVER_HOST: &str = "localhost";
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const WS_SCHEME: &str = "ws";
pub const WS_URL_PREFIX: &str = const_format::concatcp!(WS_SCHEME, "://");
