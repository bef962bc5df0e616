use crate::error::transport::TransportError;

use protocol::{ErrorLocation, WireError};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures of the session protocol.
///
/// `Fatal` means the session cannot continue: the handshake failed or the
/// server vanished mid-exchange (zero-length receive, or a send to a
/// disconnected peer). Everything else aborts the current operation only.
#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Fatal Session Error: {message} {location}")]
    Fatal {
        message: String,
        location: ErrorLocation,
    },

    #[error("Protocol Error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Transport(TransportError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl From<TransportError> for SessionError {
    #[track_caller]
    fn from(error: TransportError) -> Self {
        if error.is_disconnect() {
            return SessionError::Fatal {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }
        SessionError::Transport(error)
    }
}

impl SessionError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Fatal { .. })
    }
}
