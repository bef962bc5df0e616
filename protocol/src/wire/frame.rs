//! Untyped record frames.
//!
//! These are the only types that see positional slots. They stay private to
//! the `wire` module; callers get typed views instead.

use super::cursor::{Reader, Writer};
use super::{EVENT_RECORD_SIZE, REQUEST_RECORD_SIZE, SLOT_COUNT};

use crate::WireError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct RequestFrame {
    pub(super) opcode: u32,
    pub(super) session_id: u32,
    pub(super) window_id: u32,
    pub(super) slots: [f64; SLOT_COUNT],
    pub(super) payload_size: u64,
}

impl RequestFrame {
    pub(super) fn new(opcode: u32, session_id: u32, window_id: u32) -> Self {
        Self {
            opcode,
            session_id,
            window_id,
            ..Self::default()
        }
    }

    pub(super) fn encode(&self) -> [u8; REQUEST_RECORD_SIZE] {
        let mut buf = [0u8; REQUEST_RECORD_SIZE];
        let mut writer = Writer::new(&mut buf);
        writer.write_u32(self.opcode);
        writer.write_u32(self.session_id);
        writer.write_u32(self.window_id);
        for slot in self.slots {
            writer.write_f64(slot);
        }
        writer.write_u64(self.payload_size);
        buf
    }

    #[track_caller]
    pub(super) fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut reader = Reader::new(buf, REQUEST_RECORD_SIZE, "request record")?;
        let opcode = reader.read_u32();
        let session_id = reader.read_u32();
        let window_id = reader.read_u32();
        let mut slots = [0.0; SLOT_COUNT];
        for slot in &mut slots {
            *slot = reader.read_f64();
        }
        let payload_size = reader.read_u64();

        Ok(Self {
            opcode,
            session_id,
            window_id,
            slots,
            payload_size,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct EventFrame {
    pub(super) opcode: u32,
    pub(super) window_id: u32,
    pub(super) slots: [f64; SLOT_COUNT],
}

impl EventFrame {
    pub(super) fn new(opcode: u32, window_id: u32) -> Self {
        Self {
            opcode,
            window_id,
            ..Self::default()
        }
    }

    pub(super) fn encode(&self) -> [u8; EVENT_RECORD_SIZE] {
        let mut buf = [0u8; EVENT_RECORD_SIZE];
        let mut writer = Writer::new(&mut buf);
        writer.write_u32(self.opcode);
        writer.write_u32(self.window_id);
        for slot in self.slots {
            writer.write_f64(slot);
        }
        buf
    }

    #[track_caller]
    pub(super) fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut reader = Reader::new(buf, EVENT_RECORD_SIZE, "event record")?;
        let opcode = reader.read_u32();
        let window_id = reader.read_u32();
        let mut slots = [0.0; SLOT_COUNT];
        for slot in &mut slots {
            *slot = reader.read_f64();
        }

        Ok(Self {
            opcode,
            window_id,
            slots,
        })
    }
}

/// Slots carry integers as doubles; `as` saturates and maps NaN to zero.
pub(super) fn slot_to_u32(slot: f64) -> u32 {
    slot as u32
}

pub(super) fn bool_to_slot(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

pub(super) fn slot_to_bool(slot: f64) -> bool {
    slot != 0.0
}
