//! Binary bitmap produced by the rasterizer.

/// Value of a covered pixel.
pub const MASK_ON: u8 = 255;

/// Value of an uncovered pixel.
pub const MASK_OFF: u8 = 0;

/// Source pixels strictly above this value count as "on" when dilating.
pub const ON_THRESHOLD: u8 = 127;

/// A dense W x H single-channel bitmap where every byte is 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major, top-down coverage bytes
    pub data: Vec<u8>,
}

impl Mask {
    /// Create an all-off mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![MASK_OFF; (width as usize) * (height as usize)],
        }
    }

    /// Classify an RGBA8 buffer by its red channel.
    ///
    /// A pixel is on iff `red > threshold`.
    pub fn from_red_channel(rgba: &[u8], width: u32, height: u32, threshold: u8) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        assert_eq!(
            rgba.len(),
            pixel_count * 4,
            "RGBA buffer does not match {}x{}",
            width,
            height
        );

        let data = rgba
            .chunks_exact(4)
            .map(|px| if px[0] > threshold { MASK_ON } else { MASK_OFF })
            .collect();

        Self {
            width,
            height,
            data,
        }
    }

    /// Whether the pixel at (x, y) is on. Out-of-bounds reads are off.
    pub fn is_on(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[(y as usize) * (self.width as usize) + x as usize] > ON_THRESHOLD
    }

    /// Number of on pixels.
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|&&v| v > ON_THRESHOLD).count()
    }
}
