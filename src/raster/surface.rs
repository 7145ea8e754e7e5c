//! Scoped off-screen drawing surface.

use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;

use super::errors::RasterizationError;
use crate::mask::Mask;

/// A transient RGBA pixmap used for exactly one rasterization.
///
/// The pixel storage is released when the surface is dropped, which happens
/// right after [`RasterSurface::classify`] on success and at the `?` on
/// any failure path.
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Allocate a surface cleared to opaque black.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterizationError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RasterizationError::Surface { width, height })?;
        pixmap.fill(Color::BLACK);
        log::trace!("Allocated {}x{} raster surface", width, height);
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Draw an SVG tree with the given transform.
    pub fn draw(&mut self, tree: &usvg::Tree, transform: Transform) {
        resvg::render(tree, transform, &mut self.pixmap.as_mut());
    }

    /// Read back the pixels and classify them by red channel, consuming
    /// (and thereby releasing) the surface.
    ///
    /// The background is opaque, so premultiplied and straight red agree.
    pub fn classify(self, threshold: u8) -> Mask {
        Mask::from_red_channel(self.pixmap.data(), self.width(), self.height(), threshold)
    }
}

impl Drop for RasterSurface {
    fn drop(&mut self) {
        log::trace!(
            "Released {}x{} raster surface",
            self.pixmap.width(),
            self.pixmap.height()
        );
    }
}
