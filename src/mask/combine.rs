//! Packing two binary masks into one RGBA8 buffer.

/// Components per packed pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Interleave two masks into RGBA8: `[mask_a, mask_b, 0, 255]` per pixel.
///
/// # Panics
/// If either mask is not exactly `width * height` bytes.
pub fn combine(mask_a: &[u8], mask_b: &[u8], width: u32, height: u32) -> Vec<u8> {
    let pixel_count = (width as usize) * (height as usize);
    assert_eq!(mask_a.len(), pixel_count, "first mask does not match {}x{}", width, height);
    assert_eq!(mask_b.len(), pixel_count, "second mask does not match {}x{}", width, height);

    let mut out = Vec::with_capacity(pixel_count * BYTES_PER_PIXEL);
    for (&a, &b) in mask_a.iter().zip(mask_b) {
        out.extend_from_slice(&[a, b, 0, 255]);
    }
    out
}
