//! SVG layer rasterization.
//!
//! Turns one styled layer of a [`VectorSource`] into a binary [`Mask`]:
//!
//! 1. **Style override** - inject a style sheet showing only the selected layer
//! 2. **Decode** - parse the markup into a render tree
//! 3. **Fit** - scale into the inset content rectangle, centered on the slack axis
//! 4. **Render** - draw onto a black [`RasterSurface`]
//! 5. **Classify** - red channel above the threshold is on

mod errors;
mod fit;
mod layer;
mod source;
mod surface;

pub use errors::RasterizationError;
pub use fit::{fit_inside, Placement};
pub use layer::{LayerClasses, LayerSelector, DEFAULT_PRIMARY_CLASS, DEFAULT_SECONDARY_CLASS};
pub use source::VectorSource;
pub use surface::RasterSurface;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use resvg::tiny_skia::Transform;
use resvg::usvg;

use crate::mask::Mask;

/// Red values strictly above this are foreground.
///
/// Tuned against the reference glyph asset; assets with thinner strokes or
/// heavier anti-aliasing may need a different value.
pub const DEFAULT_THRESHOLD: u8 = 10;

/// Rasterizer settings that outlive a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSettings {
    /// Foreground cutoff on the red channel (0-255)
    pub threshold: u8,
    /// Load installed system fonts for `<text>` content
    pub load_system_fonts: bool,
    /// Extra font directories to load
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// Renders individual layers of a vector source to binary masks.
///
/// Holds only immutable state (the font database and its settings), so one
/// instance can be shared across threads and concurrent pipeline runs.
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    settings: RasterSettings,
}

impl Rasterizer {
    /// Build a rasterizer, loading fonts once up front.
    pub fn new(settings: &RasterSettings) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        if settings.load_system_fonts {
            fontdb.load_system_fonts();
        }
        for dir in &settings.font_dirs {
            fontdb.load_fonts_dir(dir);
        }
        log::debug!("Rasterizer font database has {} faces", fontdb.len());

        Self {
            fontdb: Arc::new(fontdb),
            settings: settings.clone(),
        }
    }

    /// A rasterizer with no fonts loaded. Text content renders empty.
    pub fn without_fonts() -> Self {
        Self::new(&RasterSettings {
            load_system_fonts: false,
            ..RasterSettings::default()
        })
    }

    /// Override the foreground threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.settings.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.settings.threshold
    }

    /// Settings the font database and threshold were built from.
    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    /// Rasterize one layer of `source` into a `width` x `height` mask.
    ///
    /// The selected layer is drawn opaque white on opaque black, fitted
    /// inside the surface inset by `margin` on every side.
    pub fn rasterize(
        &self,
        source: &VectorSource,
        layer: LayerSelector,
        width: u32,
        height: u32,
        margin: f32,
    ) -> Result<Mask, RasterizationError> {
        validate_geometry(width, height, margin)?;
        let started = Instant::now();

        for class in source.missing_classes() {
            log::warn!("Class '{}' not found in vector source; its layer will be empty", class);
        }

        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        options.style_sheet = Some(source.classes().override_style_sheet(layer));

        let tree = usvg::Tree::from_str(source.markup(), &options)?;
        let size = tree.size();
        let placement = fit_inside(size.width(), size.height(), width, height, margin);
        let transform = Transform::from_row(
            placement.scale_x,
            0.0,
            0.0,
            placement.scale_y,
            placement.x,
            placement.y,
        );

        let mut surface = RasterSurface::new(width, height)?;
        surface.draw(&tree, transform);
        let mask = surface.classify(self.settings.threshold);

        log::debug!(
            "Rasterized {} layer at {}x{} in {:?} ({} px on)",
            layer,
            width,
            height,
            started.elapsed(),
            mask.coverage()
        );
        Ok(mask)
    }
}

fn validate_geometry(width: u32, height: u32, margin: f32) -> Result<(), RasterizationError> {
    if width == 0 || height == 0 {
        return Err(RasterizationError::InvalidGeometry {
            reason: format!("surface size {}x{} must be non-zero", width, height),
        });
    }
    if !(0.0..0.5).contains(&margin) {
        return Err(RasterizationError::InvalidGeometry {
            reason: format!("margin {} outside [0, 0.5)", margin),
        });
    }
    Ok(())
}
