//! Texture descriptor handed to the GPU upload collaborator.
//!
//! The sampling parameters are fixed: the ASCII shader does exact per-cell
//! lookups and would bleed between characters under linear filtering,
//! mipmapping or wrapping.

use std::path::Path;

use serde::Serialize;

use crate::mask::{flip_rows, BYTES_PER_PIXEL};

/// Pixel format of the packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFormat {
    /// Four 8-bit unsigned components per pixel
    Rgba8,
}

/// Texel filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Nearest,
}

/// Texture coordinate wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    ClampToEdge,
}

/// A packed two-channel mask texture ready for upload.
///
/// Rows are stored bottom-up; the buffer must be uploaded without an
/// additional vertical flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDescriptor {
    /// `width * height * 4` bytes: R = ink, G = dilated knockout, B = 0, A = 255
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub generate_mipmaps: bool,
    /// Hex digest of every input that shaped this texture
    pub fingerprint: String,
}

/// Serializable metadata of a [`TextureDescriptor`] (everything but pixels).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub generate_mipmaps: bool,
    pub flip_y: bool,
    pub fingerprint: String,
}

impl TextureDescriptor {
    /// Wrap a bottom-up RGBA8 buffer with the mask sampling parameters.
    ///
    /// # Panics
    /// If `pixels.len() != width * height * 4`.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, fingerprint: String) -> Self {
        assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * BYTES_PER_PIXEL,
            "pixel buffer does not match {}x{} RGBA",
            width,
            height
        );
        Self {
            pixels,
            width,
            height,
            format: TextureFormat::Rgba8,
            min_filter: FilterMode::Nearest,
            mag_filter: FilterMode::Nearest,
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
            generate_mipmaps: false,
            fingerprint,
        }
    }

    pub fn info(&self) -> TextureInfo {
        TextureInfo {
            width: self.width,
            height: self.height,
            format: self.format,
            min_filter: self.min_filter,
            mag_filter: self.mag_filter,
            wrap_s: self.wrap_s,
            wrap_t: self.wrap_t,
            generate_mipmaps: self.generate_mipmaps,
            // Rows are already bottom-up
            flip_y: false,
            fingerprint: self.fingerprint.clone(),
        }
    }

    /// RGBA bytes of pixel (x, y) in top-down image coordinates.
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = (self.height - 1 - y) as usize;
        let i = (row * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = &self.pixels[i..i + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Write the raw packed buffer and a `<path>.toml` metadata sidecar.
    pub fn write_raw(&self, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, &self.pixels)?;
        let info = toml::to_string_pretty(&self.info())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(sidecar_path(path), info)?;
        Ok(())
    }

    /// Write a top-down PNG for viewing (the row flip is undone).
    pub fn write_png_preview(&self, path: &Path) -> Result<(), image::ImageError> {
        let top_down = flip_rows(&self.pixels, self.width, self.height);
        image::save_buffer(
            path,
            &top_down,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
    }
}

/// Path of the metadata sidecar for a raw texture file.
pub fn sidecar_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".toml");
    std::path::PathBuf::from(name)
}
