//! Binary mask operations for building packed mask textures.
//!
//! Everything in here is CPU-side and synchronous:
//!
//! 1. **Kernel** - discretized closed disk of pixel offsets
//! 2. **Dilation** - grow "on" regions of a binary bitmap by a disk
//! 3. **Combining** - pack two bitmaps into one RGBA8 buffer
//! 4. **Orientation** - flip rows for bottom-up texture APIs

mod bitmap;
mod combine;
mod dilate;
mod kernel;
mod orient;

pub use bitmap::{Mask, MASK_OFF, MASK_ON, ON_THRESHOLD};
pub use combine::{combine, BYTES_PER_PIXEL};
pub use dilate::dilate;
pub use kernel::{build_kernel, Kernel, RowSpan};
pub use orient::flip_rows;
