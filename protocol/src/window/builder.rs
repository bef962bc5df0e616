use super::NewWindow;

use crate::{ErrorLocation, RasterKind, Rect, WireError};

use std::panic::Location;

/// Builder for validated [`NewWindow`] descriptions.
///
/// Raster kind defaults to [`RasterKind::ARGB32`] and visibility to `true`;
/// frame and surface are required.
#[derive(Debug, Default)]
pub struct NewWindowBuilder {
    frame: Option<Rect>,
    raster_kind: Option<RasterKind>,
    visible: Option<bool>,
    surface: Option<Vec<u8>>,
}

impl NewWindowBuilder {
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn with_raster_kind(mut self, raster_kind: RasterKind) -> Self {
        self.raster_kind = Some(raster_kind);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn with_surface(mut self, surface: impl Into<Vec<u8>>) -> Self {
        self.surface = Some(surface.into());
        self
    }

    #[track_caller]
    pub fn build(self) -> Result<NewWindow, WireError> {
        let frame = self.frame.ok_or_else(|| WireError::Validation {
            message: String::from("Frame is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !frame.origin.is_finite() {
            return Err(WireError::Validation {
                message: format!(
                    "Origin must be finite, got ({}, {})",
                    frame.origin.x, frame.origin.y
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !frame.size.is_drawable() {
            return Err(WireError::Validation {
                message: format!(
                    "Size must be finite and positive, got {}x{}",
                    frame.size.width, frame.size.height
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let surface = self.surface.ok_or_else(|| WireError::Validation {
            message: String::from("Surface is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if surface.is_empty() {
            return Err(WireError::Validation {
                message: String::from("Surface cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(NewWindow {
            frame,
            raster_kind: self.raster_kind.unwrap_or_default(),
            visible: self.visible.unwrap_or(true),
            surface,
        })
    }
}
