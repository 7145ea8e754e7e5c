//! Binary dilation by a disk structuring element.

use super::bitmap::{MASK_OFF, MASK_ON, ON_THRESHOLD};
use super::kernel::build_kernel;

/// Dilate a binary bitmap by a closed disk of `radius` pixels.
///
/// Output pixel (x, y) is on iff some kernel offset (dx, dy) lands inside
/// the bitmap on a source pixel above 127. For `radius <= 0` (or NaN) a
/// value-identical copy is returned.
///
/// Rather than scanning every kernel offset per pixel, each kernel row is
/// tested in O(1) against a per-row prefix count of on pixels. The result
/// is bit-identical to the direct neighborhood scan.
///
/// # Panics
/// If `bitmap.len() != width * height`.
pub fn dilate(bitmap: &[u8], width: u32, height: u32, radius: f32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    assert_eq!(
        bitmap.len(),
        w * h,
        "bitmap length {} does not match {}x{}",
        bitmap.len(),
        width,
        height
    );

    if radius.is_nan() || radius <= 0.0 || w == 0 || h == 0 {
        return bitmap.to_vec();
    }

    // No offset longer than the diagonal can land inside the bitmap, so
    // capping there leaves the output unchanged and bounds the kernel.
    let diagonal = ((w * w + h * h) as f64).sqrt().ceil() as f32;
    let spans = build_kernel(radius.min(diagonal)).row_spans();

    // prefix[y * (w + 1) + x] = number of on pixels in row y before column x
    let stride = w + 1;
    let mut prefix = vec![0u32; stride * h];
    for (y, row) in bitmap.chunks_exact(w).enumerate() {
        let counts = &mut prefix[y * stride..(y + 1) * stride];
        for (x, &v) in row.iter().enumerate() {
            counts[x + 1] = counts[x] + u32::from(v > ON_THRESHOLD);
        }
    }

    let mut out = vec![MASK_OFF; w * h];
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let hit = spans.iter().any(|span| {
                let sy = y + span.dy as i64;
                if sy < 0 || sy >= h as i64 {
                    return false;
                }
                let lo = (x + span.min_dx as i64).max(0);
                let hi = (x + span.max_dx as i64).min(w as i64 - 1);
                if lo > hi {
                    return false;
                }
                let row = &prefix[sy as usize * stride..];
                row[hi as usize + 1] > row[lo as usize]
            });
            if hit {
                out[y as usize * w + x as usize] = MASK_ON;
            }
        }
    }

    out
}
