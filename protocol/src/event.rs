//! Typed events delivered to the client.
//!
//! The server sends a flat record with a discriminant. The event dispatcher
//! turns it into one of the variants below, so callers match on [`Event`]
//! instead of downcasting.

use crate::WindowId;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MouseEventKind {
    Move,
    Press,
    Release,
    Drag,
    Undefined,
}

impl MouseEventKind {
    pub const fn code(self) -> u32 {
        match self {
            MouseEventKind::Move => 1,
            MouseEventKind::Press => 2,
            MouseEventKind::Release => 3,
            MouseEventKind::Drag => 4,
            MouseEventKind::Undefined => 0,
        }
    }

    pub const fn from_code(code: u32) -> Self {
        match code {
            1 => MouseEventKind::Move,
            2 => MouseEventKind::Press,
            3 => MouseEventKind::Release,
            4 => MouseEventKind::Drag,
            _ => MouseEventKind::Undefined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Undefined,
}

impl MouseButton {
    pub const fn code(self) -> u32 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::Undefined => 0,
        }
    }

    /// Unrecognised codes map to [`MouseButton::Undefined`].
    pub const fn from_code(code: u32) -> Self {
        match code {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            _ => MouseButton::Undefined,
        }
    }
}

/// Pointer input. `x`/`y` are window-relative, `abs_x`/`abs_y` screen-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MouseEvent {
    pub window_id: WindowId,
    pub kind: MouseEventKind,
    pub button: MouseButton,
    pub x: f64,
    pub y: f64,
    pub abs_x: f64,
    pub abs_y: f64,
}

/// Text produced by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEvent {
    pub window_id: WindowId,
    pub text: String,
}

/// The server moved a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowLocationChangedEvent {
    pub window_id: WindowId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    Mouse(MouseEvent),
    Key(KeyEvent),
    WindowLocationChanged(WindowLocationChangedEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InputKind {
    Mouse,
    Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    Input(InputKind),
    WindowLocationChanged,
}

impl Event {
    pub fn window_id(&self) -> WindowId {
        match self {
            Event::Mouse(event) => event.window_id,
            Event::Key(event) => event.window_id,
            Event::WindowLocationChanged(event) => event.window_id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Mouse(_) => EventKind::Input(InputKind::Mouse),
            Event::Key(_) => EventKind::Input(InputKind::Key),
            Event::WindowLocationChanged(_) => EventKind::WindowLocationChanged,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind(), EventKind::Input(_))
    }
}
