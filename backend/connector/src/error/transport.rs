use protocol::ErrorLocation;

use std::error::Error as StdError;
use std::io::Error as IoError;
use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("Connect Error: {message} {location}")]
    Connect {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Bind Error: {message} {location}")]
    Bind {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Send Error: {message} {location}")]
    Send {
        message: String,
        location: ErrorLocation,
    },

    /// The peer is gone; nothing more can be sent on this channel.
    #[error("Disconnected: {message} {location}")]
    Disconnected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Receive Error: {message} {location}")]
    Receive {
        message: String,
        location: ErrorLocation,
    },

    #[error("Close Error: {message} {location}")]
    Close {
        message: String,
        location: ErrorLocation,
    },

    #[error("Discipline Error: {message} {location}")]
    Discipline {
        message: String,
        location: ErrorLocation,
    },

    #[error("Address Error: {message} {location}")]
    Address {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
    },
}

impl TransportError {
    pub fn is_disconnect(&self) -> bool {
        matches!(self, TransportError::Disconnected { .. })
    }
}

impl From<IoError> for TransportError {
    #[track_caller]
    fn from(error: IoError) -> Self {
        TransportError::Io {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for TransportError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        TransportError::Address {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
