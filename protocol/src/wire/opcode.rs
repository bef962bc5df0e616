/// Discriminant of a request record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestOpcode {
    Register,
    CreateWindow,
    UpdateWindowSurface,
    ResizeWindow,
    SetWindowVisibility,
    BringWindowToFront,
    MoveWindow,
    DestroyWindow,
}

impl RequestOpcode {
    pub const fn code(self) -> u32 {
        match self {
            RequestOpcode::Register => 1,
            RequestOpcode::CreateWindow => 2,
            RequestOpcode::UpdateWindowSurface => 3,
            RequestOpcode::ResizeWindow => 4,
            RequestOpcode::SetWindowVisibility => 5,
            RequestOpcode::BringWindowToFront => 6,
            RequestOpcode::MoveWindow => 7,
            RequestOpcode::DestroyWindow => 8,
        }
    }

    /// Human-readable name used in log lines.
    pub const fn name(self) -> &'static str {
        match self {
            RequestOpcode::Register => "register",
            RequestOpcode::CreateWindow => "create window",
            RequestOpcode::UpdateWindowSurface => "update window surface",
            RequestOpcode::ResizeWindow => "resize window",
            RequestOpcode::SetWindowVisibility => "set window visibility",
            RequestOpcode::BringWindowToFront => "bring window to front",
            RequestOpcode::MoveWindow => "move window",
            RequestOpcode::DestroyWindow => "destroy window",
        }
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(RequestOpcode::Register),
            2 => Some(RequestOpcode::CreateWindow),
            3 => Some(RequestOpcode::UpdateWindowSurface),
            4 => Some(RequestOpcode::ResizeWindow),
            5 => Some(RequestOpcode::SetWindowVisibility),
            6 => Some(RequestOpcode::BringWindowToFront),
            7 => Some(RequestOpcode::MoveWindow),
            8 => Some(RequestOpcode::DestroyWindow),
            _ => None,
        }
    }
}

/// Discriminant of an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventOpcode {
    MouseInput,
    TextInput,
    WindowLocationChanged,
}

impl EventOpcode {
    pub const fn code(self) -> u32 {
        match self {
            EventOpcode::MouseInput => 1,
            EventOpcode::TextInput => 2,
            EventOpcode::WindowLocationChanged => 3,
        }
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(EventOpcode::MouseInput),
            2 => Some(EventOpcode::TextInput),
            3 => Some(EventOpcode::WindowLocationChanged),
            _ => None,
        }
    }
}
