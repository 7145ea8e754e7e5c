//! glyph-mask library crate.
//!
//! Converts a two-layer SVG glyph source into a packed RGBA8 mask texture:
//! the primary layer in red, the dilated secondary layer in green.
//!
//! ```no_run
//! use glyph_mask::{MaskOptions, MaskPipeline, RasterSettings, Rasterizer, VectorSource};
//!
//! # async fn run(markup: String) -> Result<(), glyph_mask::MaskError> {
//! let pipeline = MaskPipeline::new(Rasterizer::new(&RasterSettings::default()));
//! let options = MaskOptions::new(VectorSource::new(markup), 0.6, 8.0);
//! let texture = pipeline.build(&options).await?;
//! assert_eq!(texture.pixels.len(), 1024 * 512 * 4);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod mask;
pub mod pipeline;
pub mod raster;
pub mod texture;

pub use pipeline::{secondary_radius, MaskError, MaskOptions, MaskPipeline};
pub use raster::{
    LayerClasses, LayerSelector, RasterSettings, RasterizationError, Rasterizer, VectorSource,
};
pub use texture::{FilterMode, TextureDescriptor, TextureFormat, TextureInfo, WrapMode};
