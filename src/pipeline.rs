//! Mask texture pipeline.
//!
//! Rasterizes both layers of a vector source concurrently, dilates the
//! secondary (knockout) layer, packs both into RGBA8 and corrects the row
//! order for the GPU.

use std::sync::Arc;
use std::time::Instant;

use sha2::{Digest, Sha256};

use crate::mask::{combine, dilate, flip_rows, Mask};
use crate::raster::{
    LayerSelector, RasterSettings, RasterizationError, Rasterizer, VectorSource,
};
use crate::texture::TextureDescriptor;

/// Default texture width in pixels.
pub const DEFAULT_WIDTH: u32 = 1024;

/// Default texture height in pixels.
pub const DEFAULT_HEIGHT: u32 = 512;

/// Default inset on each side, as a fraction of the texture size.
pub const DEFAULT_MARGIN: f32 = 0.06;

/// Largest accepted secondary layer thickness; larger values clamp.
pub const MAX_THICKNESS: f32 = 1.2;

/// Dilation radius at maximum thickness, in grid cells.
pub const MAX_GRID_RADIUS: f32 = 2.5;

/// Exponent of the thickness response curve.
pub const THICKNESS_EXPONENT: f32 = 0.85;

/// Inputs of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskOptions {
    pub source: VectorSource,
    /// Secondary layer thickness, 0..=1.2
    pub secondary_thickness: f32,
    /// Size of one ASCII grid cell in pixels
    pub cell_size: f32,
    pub width: u32,
    pub height: u32,
    pub margin: f32,
}

impl MaskOptions {
    /// Options at the default 1024x512 size and 6% margin.
    pub fn new(source: VectorSource, secondary_thickness: f32, cell_size: f32) -> Self {
        Self {
            source,
            secondary_thickness,
            cell_size,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            margin: DEFAULT_MARGIN,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Dilation radius of the secondary layer in pixels.
    pub fn secondary_radius(&self) -> f32 {
        secondary_radius(self.secondary_thickness, self.cell_size)
    }

    fn validate(&self) -> Result<(), MaskError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(MaskError::InvalidOptions {
                reason: format!("cell size must be positive, got {}", self.cell_size),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(MaskError::InvalidOptions {
                reason: format!("texture size {}x{} must be non-zero", self.width, self.height),
            });
        }
        if !(0.0..0.5).contains(&self.margin) {
            return Err(MaskError::InvalidOptions {
                reason: format!("margin must be in [0, 0.5), got {}", self.margin),
            });
        }
        Ok(())
    }

    /// Hex digest of every input that affects the output texture,
    /// including the rasterizer's threshold and font settings.
    ///
    /// Callers re-running the pipeline on parameter changes can compare
    /// fingerprints to drop results that arrive after newer inputs. Fonts
    /// are identified by settings, not contents: installing new system fonts
    /// between runs does not change the fingerprint.
    pub fn fingerprint(&self, raster: &RasterSettings) -> String {
        let classes = self.source.classes();
        let mut hasher = Sha256::new();
        hasher.update(self.source.markup().as_bytes());
        hasher.update([0]);
        hasher.update(classes.primary.as_bytes());
        hasher.update([0]);
        hasher.update(classes.secondary.as_bytes());
        hasher.update([0]);
        hasher.update(self.secondary_thickness.to_le_bytes());
        hasher.update(self.cell_size.to_le_bytes());
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.margin.to_le_bytes());
        hasher.update([raster.threshold, u8::from(raster.load_system_fonts)]);
        for dir in &raster.font_dirs {
            hasher.update(dir.to_string_lossy().as_bytes());
            hasher.update([0]);
        }
        let result = hasher.finalize();
        hex::encode(&result[..16])
    }
}

/// Map a normalized thickness to a dilation radius in pixels.
///
/// `thickness` is divided by 1.2 and clamped to [0, 1] (non-finite values
/// count as 0), shaped by `t^0.85`, scaled to at most 2.5 grid cells and
/// converted to pixels by `cell_size`.
pub fn secondary_radius(thickness: f32, cell_size: f32) -> f32 {
    let t = if thickness.is_finite() {
        (thickness / MAX_THICKNESS).clamp(0.0, 1.0)
    } else {
        0.0
    };
    t.powf(THICKNESS_EXPONENT) * MAX_GRID_RADIUS * cell_size
}

/// Errors that can occur while building a mask texture.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    #[error("Rasterization failed: {0}")]
    Rasterization(#[from] RasterizationError),

    #[error("Invalid mask options: {reason}")]
    InvalidOptions {
        /// Which option was out of range
        reason: String,
    },

    #[error("Rasterization task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Builds packed mask textures from two-layer vector sources.
///
/// Cheap to clone; clones share the rasterizer and its font database.
#[derive(Clone)]
pub struct MaskPipeline {
    rasterizer: Arc<Rasterizer>,
}

impl MaskPipeline {
    pub fn new(rasterizer: Rasterizer) -> Self {
        Self {
            rasterizer: Arc::new(rasterizer),
        }
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Run the full pipeline.
    ///
    /// Both layers rasterize concurrently on the blocking pool; the run
    /// fails as a whole if either does. The returned buffer is bottom-up.
    pub async fn build(&self, options: &MaskOptions) -> Result<TextureDescriptor, MaskError> {
        options.validate()?;
        let started = Instant::now();
        let radius = options.secondary_radius();
        log::info!(
            "Building {}x{} mask texture (thickness {}, cell {}, radius {:.2}px)",
            options.width,
            options.height,
            options.secondary_thickness,
            options.cell_size,
            radius
        );

        let primary = self.spawn_layer(options, LayerSelector::Primary);
        let secondary = self.spawn_layer(options, LayerSelector::Secondary);
        let (primary, secondary) = tokio::try_join!(primary, secondary)?;
        let primary = primary?;
        let secondary = secondary?;

        let (width, height) = (options.width, options.height);
        let knockout = dilate(&secondary.data, width, height, radius);
        let packed = combine(&primary.data, &knockout, width, height);
        let pixels = flip_rows(&packed, width, height);

        let fingerprint = options.fingerprint(self.rasterizer.settings());
        log::info!("Mask texture {} built in {:?}", fingerprint, started.elapsed());
        Ok(TextureDescriptor::new(pixels, width, height, fingerprint))
    }

    /// Rasterize a single layer without dilation (debug aid).
    pub async fn rasterize_layer(
        &self,
        options: &MaskOptions,
        layer: LayerSelector,
    ) -> Result<Mask, MaskError> {
        options.validate()?;
        Ok(self.spawn_layer(options, layer).await??)
    }

    fn spawn_layer(
        &self,
        options: &MaskOptions,
        layer: LayerSelector,
    ) -> tokio::task::JoinHandle<Result<Mask, RasterizationError>> {
        let rasterizer = Arc::clone(&self.rasterizer);
        let source = options.source.clone();
        let (width, height, margin) = (options.width, options.height, options.margin);
        tokio::task::spawn_blocking(move || {
            rasterizer.rasterize(&source, layer, width, height, margin)
        })
    }
}
