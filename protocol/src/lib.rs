//! Wire-level model of the AppServer protocol.
//!
//! This crate holds the data that travels between a client process and the
//! window server: the fixed-size request and event records, the typed events
//! decoded from them, and the small value types (ids, geometry) they carry.
//! Nothing here performs I/O.
//!
//! ## Architecture
//!
//! - **protocol** (this crate): records, codecs and typed events
//! - **connector**: session handshake, window commands, event dispatch
//! - **asl-probe**: application wiring everything together
//!
//! Raw positional slots never leave the [`wire`] module. Every record is read
//! through a typed view chosen by its opcode, so a slot can only be read under
//! the meaning its opcode gives it.

pub mod error;
pub mod event;
pub mod geometry;
pub mod ids;
pub mod window;
pub mod wire;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::wire_error::WireError;
pub use event::{
    Event, EventKind, InputKind, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
    WindowLocationChangedEvent,
};
pub use geometry::{Point, Rect, Size};
pub use ids::{RasterKind, SessionId, WindowId};
pub use window::{NewWindow, NewWindowBuilder};
