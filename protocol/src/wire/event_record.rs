use super::frame::{EventFrame, slot_to_u32};
use super::opcode::EventOpcode;
use super::{EVENT_RECORD_SIZE, MAX_TEXT_PAYLOAD_LEN};

use crate::{
    ErrorLocation, MouseButton, MouseEvent, MouseEventKind, SessionId, WindowId,
    WindowLocationChangedEvent, WireError,
};

use std::panic::Location;

/// An inbound event record, viewed through its discriminant.
///
/// Text input only carries the length of the text here; the text itself
/// arrives as a separate message.
#[derive(Debug, Clone, PartialEq)]
pub enum EventRecord {
    Mouse(MouseEvent),
    TextInput { window_id: WindowId, length: usize },
    WindowLocationChanged(WindowLocationChangedEvent),
    Unknown { opcode: u32, window_id: WindowId },
}

impl EventRecord {
    pub fn window_id(&self) -> WindowId {
        match self {
            EventRecord::Mouse(event) => event.window_id,
            EventRecord::TextInput { window_id, .. } => *window_id,
            EventRecord::WindowLocationChanged(event) => event.window_id,
            EventRecord::Unknown { window_id, .. } => *window_id,
        }
    }

    /// Decode an event record.
    ///
    /// An unrecognised discriminant is not an error; it decodes to
    /// [`EventRecord::Unknown`] so the caller can acknowledge and drop it.
    #[track_caller]
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let frame = EventFrame::decode(buf)?;
        let window_id = WindowId(frame.window_id);
        let s = frame.slots;

        let Some(opcode) = EventOpcode::from_code(frame.opcode) else {
            return Ok(EventRecord::Unknown {
                opcode: frame.opcode,
                window_id,
            });
        };

        let record = match opcode {
            EventOpcode::MouseInput => {
                let kind = MouseEventKind::from_code(slot_to_u32(s[4]));
                let button = match kind {
                    MouseEventKind::Move | MouseEventKind::Undefined => MouseButton::Undefined,
                    _ => MouseButton::from_code(slot_to_u32(s[5])),
                };

                EventRecord::Mouse(MouseEvent {
                    window_id,
                    kind,
                    button,
                    x: s[0],
                    y: s[1],
                    abs_x: s[2],
                    abs_y: s[3],
                })
            }
            EventOpcode::TextInput => {
                let raw = s[5] as u64;
                let length = usize::try_from(raw)
                    .ok()
                    .filter(|len| *len <= MAX_TEXT_PAYLOAD_LEN)
                    .ok_or_else(|| WireError::LengthOutOfRange {
                        message: format!(
                            "text payload of {raw} bytes exceeds {MAX_TEXT_PAYLOAD_LEN}"
                        ),
                        location: ErrorLocation::from(Location::caller()),
                    })?;

                EventRecord::TextInput { window_id, length }
            }
            EventOpcode::WindowLocationChanged => {
                EventRecord::WindowLocationChanged(WindowLocationChangedEvent {
                    window_id,
                    x: s[0],
                    y: s[1],
                })
            }
        };

        Ok(record)
    }

    pub fn encode(&self) -> [u8; EVENT_RECORD_SIZE] {
        let frame = match self {
            EventRecord::Mouse(event) => {
                let mut frame =
                    EventFrame::new(EventOpcode::MouseInput.code(), event.window_id.0);
                frame.slots[0] = event.x;
                frame.slots[1] = event.y;
                frame.slots[2] = event.abs_x;
                frame.slots[3] = event.abs_y;
                frame.slots[4] = f64::from(event.kind.code());
                frame.slots[5] = f64::from(event.button.code());
                frame
            }
            EventRecord::TextInput { window_id, length } => {
                let mut frame = EventFrame::new(EventOpcode::TextInput.code(), window_id.0);
                frame.slots[5] = *length as f64;
                frame
            }
            EventRecord::WindowLocationChanged(event) => {
                let mut frame =
                    EventFrame::new(EventOpcode::WindowLocationChanged.code(), event.window_id.0);
                frame.slots[0] = event.x;
                frame.slots[1] = event.y;
                frame
            }
            EventRecord::Unknown { opcode, window_id } => EventFrame::new(*opcode, window_id.0),
        };

        frame.encode()
    }
}

/// Registration reply: an event-shaped record whose first slot is the session id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAssigned {
    pub session_id: SessionId,
}

impl SessionAssigned {
    #[track_caller]
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let frame = EventFrame::decode(buf)?;
        Ok(Self {
            session_id: SessionId(slot_to_u32(frame.slots[0])),
        })
    }

    pub fn encode(&self) -> [u8; EVENT_RECORD_SIZE] {
        let mut frame = EventFrame::default();
        frame.slots[0] = f64::from(self.session_id.0);
        frame.encode()
    }
}

/// Reply on the command channel naming a freshly created window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAssigned {
    pub window_id: WindowId,
}

impl WindowAssigned {
    #[track_caller]
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let frame = EventFrame::decode(buf)?;
        Ok(Self {
            window_id: WindowId(frame.window_id),
        })
    }

    pub fn encode(&self) -> [u8; EVENT_RECORD_SIZE] {
        EventFrame::new(0, self.window_id.0).encode()
    }
}
