//! Fit-inside layout of vector content into the inset content rectangle.

/// Where and at what scale the source is drawn on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

/// Scale a `src_w` x `src_h` source to fit inside a `dst_w` x `dst_h`
/// surface inset by `margin` (a fraction of each dimension) on every side.
///
/// Aspect ratio is preserved. When the source is wider than the content
/// rectangle, width is the fitting dimension and the content is centered
/// vertically; otherwise height fits and the content is centered
/// horizontally.
pub fn fit_inside(src_w: f32, src_h: f32, dst_w: u32, dst_h: u32, margin: f32) -> Placement {
    let area_x = dst_w as f32 * margin;
    let area_y = dst_h as f32 * margin;
    let area_w = dst_w as f32 * (1.0 - 2.0 * margin);
    let area_h = dst_h as f32 * (1.0 - 2.0 * margin);

    let src_aspect = src_w / src_h;
    let area_aspect = area_w / area_h;

    let (width, height, x, y) = if src_aspect > area_aspect {
        let height = area_w / src_aspect;
        (area_w, height, area_x, area_y + (area_h - height) / 2.0)
    } else {
        let width = area_h * src_aspect;
        (width, area_h, area_x + (area_w - width) / 2.0, area_y)
    };

    Placement {
        x,
        y,
        width,
        height,
        scale_x: width / src_w,
        scale_y: height / src_h,
    }
}
