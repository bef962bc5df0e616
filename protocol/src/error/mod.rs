pub mod error_location;
pub mod wire_error;
