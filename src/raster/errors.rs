//! Error types for rasterization.

/// Errors that can occur while rasterizing a vector source.
#[derive(Debug, thiserror::Error)]
pub enum RasterizationError {
    #[error("Failed to decode vector source: {0}")]
    Decode(#[from] resvg::usvg::Error),

    #[error("Cannot allocate a {width}x{height} raster surface")]
    Surface { width: u32, height: u32 },

    #[error("Invalid raster geometry: {reason}")]
    InvalidGeometry {
        /// What was wrong with the requested size or margin
        reason: String,
    },
}
