pub mod config;
pub mod session;
pub mod transport;

pub use config::ConfigError;
pub use session::SessionError;
pub use transport::TransportError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error(transparent)]
    Session(#[from] session::SessionError),

    #[error(transparent)]
    Transport(#[from] transport::TransportError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
