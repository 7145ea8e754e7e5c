//! Row-order correction for bottom-up texture APIs.

use super::combine::BYTES_PER_PIXEL;

/// Return a copy of an RGBA8 buffer with its rows in reverse order.
///
/// Output row `y` is input row `height - 1 - y`. Applying this twice yields
/// the original buffer, so a pipeline run must call it exactly once.
///
/// # Panics
/// If `buffer.len() != width * height * 4`.
pub fn flip_rows(buffer: &[u8], width: u32, height: u32) -> Vec<u8> {
    let row_len = (width as usize) * BYTES_PER_PIXEL;
    let h = height as usize;
    assert_eq!(
        buffer.len(),
        row_len * h,
        "buffer length {} does not match {}x{} RGBA",
        buffer.len(),
        width,
        height
    );

    let mut out = vec![0u8; buffer.len()];
    if row_len == 0 {
        return out;
    }
    for (y, dst) in out.chunks_exact_mut(row_len).enumerate() {
        let src_start = (h - 1 - y) * row_len;
        dst.copy_from_slice(&buffer[src_start..src_start + row_len]);
    }
    out
}
