use super::frame::{RequestFrame, bool_to_slot, slot_to_bool, slot_to_u32};
use super::opcode::RequestOpcode;
use super::REQUEST_RECORD_SIZE;

use crate::{ErrorLocation, Point, RasterKind, Rect, SessionId, Size, WindowId, WireError};

use std::panic::Location;

/// A client request, one variant per opcode.
///
/// Each variant names exactly the fields its opcode defines. Encoding places
/// them in the slots the server expects; slots an opcode does not use go out
/// as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    Register {
        pid: u32,
    },
    CreateWindow {
        session_id: SessionId,
        frame: Rect,
        visible: bool,
        raster_kind: RasterKind,
        payload_size: u64,
    },
    UpdateWindowSurface {
        session_id: SessionId,
        window_id: WindowId,
        region: Rect,
        payload_size: u64,
    },
    ResizeWindow {
        session_id: SessionId,
        window_id: WindowId,
        size: Size,
        payload_size: u64,
    },
    SetWindowVisibility {
        session_id: SessionId,
        window_id: WindowId,
        visible: bool,
    },
    BringWindowToFront {
        session_id: SessionId,
        window_id: WindowId,
    },
    MoveWindow {
        session_id: SessionId,
        window_id: WindowId,
        origin: Point,
    },
    DestroyWindow {
        session_id: SessionId,
        window_id: WindowId,
    },
}

impl Request {
    pub fn opcode(&self) -> RequestOpcode {
        match self {
            Request::Register { .. } => RequestOpcode::Register,
            Request::CreateWindow { .. } => RequestOpcode::CreateWindow,
            Request::UpdateWindowSurface { .. } => RequestOpcode::UpdateWindowSurface,
            Request::ResizeWindow { .. } => RequestOpcode::ResizeWindow,
            Request::SetWindowVisibility { .. } => RequestOpcode::SetWindowVisibility,
            Request::BringWindowToFront { .. } => RequestOpcode::BringWindowToFront,
            Request::MoveWindow { .. } => RequestOpcode::MoveWindow,
            Request::DestroyWindow { .. } => RequestOpcode::DestroyWindow,
        }
    }

    /// Target window, [`WindowId::UNDEFINED`] for requests that name none.
    pub fn window_id(&self) -> WindowId {
        match *self {
            Request::UpdateWindowSurface { window_id, .. }
            | Request::ResizeWindow { window_id, .. }
            | Request::SetWindowVisibility { window_id, .. }
            | Request::BringWindowToFront { window_id, .. }
            | Request::MoveWindow { window_id, .. }
            | Request::DestroyWindow { window_id, .. } => window_id,
            Request::Register { .. } | Request::CreateWindow { .. } => WindowId::UNDEFINED,
        }
    }

    /// Size of the payload message that must follow this request, if any.
    pub fn payload_size(&self) -> Option<u64> {
        match *self {
            Request::CreateWindow { payload_size, .. }
            | Request::UpdateWindowSurface { payload_size, .. }
            | Request::ResizeWindow { payload_size, .. } => Some(payload_size),
            _ => None,
        }
    }

    pub fn encode(&self) -> [u8; REQUEST_RECORD_SIZE] {
        let opcode = self.opcode().code();

        let frame = match *self {
            Request::Register { pid } => {
                let mut frame = RequestFrame::new(opcode, 0, 0);
                frame.slots[0] = f64::from(pid);
                frame
            }
            Request::CreateWindow {
                session_id,
                frame: rect,
                visible,
                raster_kind,
                payload_size,
            } => {
                let mut frame = RequestFrame::new(opcode, session_id.0, 0);
                frame.slots[0] = rect.origin.x;
                frame.slots[1] = rect.origin.y;
                frame.slots[2] = rect.size.width;
                frame.slots[3] = rect.size.height;
                frame.slots[4] = bool_to_slot(visible);
                frame.slots[5] = f64::from(raster_kind.0);
                frame.payload_size = payload_size;
                frame
            }
            Request::UpdateWindowSurface {
                session_id,
                window_id,
                region,
                payload_size,
            } => {
                let mut frame = RequestFrame::new(opcode, session_id.0, window_id.0);
                frame.slots[1] = region.origin.x;
                frame.slots[2] = region.origin.y;
                frame.slots[3] = region.size.width;
                frame.slots[4] = region.size.height;
                frame.payload_size = payload_size;
                frame
            }
            Request::ResizeWindow {
                session_id,
                window_id,
                size,
                payload_size,
            } => {
                let mut frame = RequestFrame::new(opcode, session_id.0, window_id.0);
                frame.slots[1] = size.width;
                frame.slots[2] = size.height;
                frame.payload_size = payload_size;
                frame
            }
            Request::SetWindowVisibility {
                session_id,
                window_id,
                visible,
            } => {
                let mut frame = RequestFrame::new(opcode, session_id.0, window_id.0);
                frame.slots[1] = bool_to_slot(visible);
                frame
            }
            Request::MoveWindow {
                session_id,
                window_id,
                origin,
            } => {
                let mut frame = RequestFrame::new(opcode, session_id.0, window_id.0);
                frame.slots[1] = origin.x;
                frame.slots[2] = origin.y;
                frame
            }
            Request::BringWindowToFront {
                session_id,
                window_id,
            }
            | Request::DestroyWindow {
                session_id,
                window_id,
            } => RequestFrame::new(opcode, session_id.0, window_id.0),
        };

        frame.encode()
    }

    /// Decode a request record, reading only the slots its opcode defines.
    #[track_caller]
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let frame = RequestFrame::decode(buf)?;
        let opcode =
            RequestOpcode::from_code(frame.opcode).ok_or_else(|| WireError::UnknownOpcode {
                message: format!("request opcode {}", frame.opcode),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let session_id = SessionId(frame.session_id);
        let window_id = WindowId(frame.window_id);
        let s = frame.slots;

        let request = match opcode {
            RequestOpcode::Register => Request::Register {
                pid: slot_to_u32(s[0]),
            },
            RequestOpcode::CreateWindow => Request::CreateWindow {
                session_id,
                frame: Rect::new(s[0], s[1], s[2], s[3]),
                visible: slot_to_bool(s[4]),
                raster_kind: RasterKind(slot_to_u32(s[5])),
                payload_size: frame.payload_size,
            },
            RequestOpcode::UpdateWindowSurface => Request::UpdateWindowSurface {
                session_id,
                window_id,
                region: Rect::new(s[1], s[2], s[3], s[4]),
                payload_size: frame.payload_size,
            },
            RequestOpcode::ResizeWindow => Request::ResizeWindow {
                session_id,
                window_id,
                size: Size::new(s[1], s[2]),
                payload_size: frame.payload_size,
            },
            RequestOpcode::SetWindowVisibility => Request::SetWindowVisibility {
                session_id,
                window_id,
                visible: slot_to_bool(s[1]),
            },
            RequestOpcode::BringWindowToFront => Request::BringWindowToFront {
                session_id,
                window_id,
            },
            RequestOpcode::MoveWindow => Request::MoveWindow {
                session_id,
                window_id,
                origin: Point::new(s[1], s[2]),
            },
            RequestOpcode::DestroyWindow => Request::DestroyWindow {
                session_id,
                window_id,
            },
        };

        Ok(request)
    }
}
