//! Fixed-size binary records exchanged with the window server.
//!
//! All fields are little-endian with no padding.
//!
//! | record | layout |
//! |--------|--------|
//! | request | opcode `u32`, session `u32`, window `u32`, 6 × `f64` slots, payload size `u64` |
//! | event | opcode `u32`, window `u32`, 6 × `f64` slots |
//! | ack | `i32`, success = 1 |
//! | liveness notice | pid `u32`, session `u32` |
//!
//! Variable-length data (surface bytes, text) never rides inside a record. It
//! is sent as its own message right after the record that announces its size.

mod ack;
mod cursor;
mod event_record;
mod frame;
mod opcode;
mod request;

pub use ack::{Ack, LivenessNotice};
pub use event_record::{EventRecord, SessionAssigned, WindowAssigned};
pub use opcode::{EventOpcode, RequestOpcode};
pub use request::Request;

pub(crate) const SLOT_COUNT: usize = 6;

pub const REQUEST_RECORD_SIZE: usize = 4 + 4 + 4 + SLOT_COUNT * 8 + 8;
pub const EVENT_RECORD_SIZE: usize = 4 + 4 + SLOT_COUNT * 8;
pub const ACK_SIZE: usize = 4;
pub const ACK_SUCCESS: i32 = 1;
pub const LIVENESS_NOTICE_SIZE: usize = 8;

/// Upper bound on the text announced by a text-input record.
pub const MAX_TEXT_PAYLOAD_LEN: usize = 1024 * 1024;
