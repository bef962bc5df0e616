mod builder;

pub use builder::NewWindowBuilder;

use crate::{RasterKind, Rect};

/// Everything the server needs to create a window: where it goes, how its
/// raster is laid out, and the initial surface contents.
///
/// Built through [`NewWindowBuilder`], which rejects geometry the server
/// cannot place.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWindow {
    pub(crate) frame: Rect,
    pub(crate) raster_kind: RasterKind,
    pub(crate) visible: bool,
    pub(crate) surface: Vec<u8>,
}

impl NewWindow {
    pub fn builder() -> NewWindowBuilder {
        NewWindowBuilder::default()
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn raster_kind(&self) -> RasterKind {
        self.raster_kind
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn surface(&self) -> &[u8] {
        &self.surface
    }

    pub fn payload_size(&self) -> u64 {
        self.surface.len() as u64
    }
}
