use connector::{ConfigError, ConnectorError, SessionError};

use protocol::{ErrorLocation, WireError};

use thiserror::Error;

/// Errors that end a probe run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Error from this app (directories, logging, output)
    #[error("Probe Error: {message} {location}")]
    Probe {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The window description was rejected before anything was sent.
    #[error(transparent)]
    Window(#[from] WireError),
}

impl ProbeError {
    /// True when the window server went away; the process exits with status 1.
    pub fn is_fatal(&self) -> bool {
        match self {
            ProbeError::Session(e) => e.is_fatal(),
            ProbeError::Connector(ConnectorError::Session(e)) => e.is_fatal(),
            _ => false,
        }
    }
}
