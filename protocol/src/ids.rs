use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FormatResult};

/// Identifier the server hands out during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(pub u32);

impl Display for SessionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.0)
    }
}

/// Server-assigned window identifier. Zero never names a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WindowId(pub u32);

impl WindowId {
    pub const UNDEFINED: WindowId = WindowId(0);

    pub fn is_defined(self) -> bool {
        self != Self::UNDEFINED
    }
}

impl Display for WindowId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.0)
    }
}

/// Raster layout code forwarded verbatim to the server.
///
/// Interpreting the code is the server's business; the connector only names
/// the two layouts the stock server ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RasterKind(pub u32);

impl RasterKind {
    pub const ARGB32: RasterKind = RasterKind(0);
    pub const RGB24: RasterKind = RasterKind(1);
}

impl Default for RasterKind {
    fn default() -> Self {
        Self::ARGB32
    }
}
