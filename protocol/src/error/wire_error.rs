use crate::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum WireError {
    #[error("Truncated Record Error: {message} {location}")]
    Truncated {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown Opcode Error: {message} {location}")]
    UnknownOpcode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Length Out Of Range Error: {message} {location}")]
    LengthOutOfRange {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}
