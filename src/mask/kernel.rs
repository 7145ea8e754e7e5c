//! Disk-shaped structuring element for binary dilation.

/// Largest `ceil(radius)` enumerated; keeps `2 * reach + 1` in range.
const MAX_REACH: i32 = i32::MAX / 2 - 1;

/// Upper bound on the up-front offset allocation.
const MAX_PREALLOCATED_OFFSETS: usize = 1 << 20;

/// Integer pixel offsets forming a closed disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    radius: f32,
    offsets: Vec<(i32, i32)>,
}

/// Contiguous run of kernel offsets sharing the same `dy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub dy: i32,
    pub min_dx: i32,
    pub max_dx: i32,
}

/// Build the disk kernel for `radius`.
///
/// Offsets are enumerated row-major over `[-ceil(r), ceil(r)]` and kept iff
/// `dx² + dy² <= r²`, so pixels exactly on the boundary are included. A
/// non-positive (or NaN) radius yields the single offset `(0, 0)`.
///
/// The kernel holds about `3.15 * r²` offsets; callers bound `radius` by
/// the size of the image they dilate (see [`crate::mask::dilate`]).
pub fn build_kernel(radius: f32) -> Kernel {
    if radius.is_nan() || radius <= 0.0 {
        return Kernel {
            radius: 0.0,
            offsets: vec![(0, 0)],
        };
    }

    let reach = radius.ceil().min(MAX_REACH as f32) as i32;
    let r2 = radius * radius;
    let side = (reach as usize).saturating_mul(2).saturating_add(1);
    let capacity = side.saturating_mul(side).min(MAX_PREALLOCATED_OFFSETS);
    let mut offsets = Vec::with_capacity(capacity);

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let d2 = (i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy)) as f32;
            if d2 <= r2 {
                offsets.push((dx, dy));
            }
        }
    }

    Kernel { radius, offsets }
}

impl Kernel {
    /// Radius this kernel was built for (0 for the identity kernel).
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Offsets in enumeration order.
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Collapse the kernel into one horizontal span per occupied row.
    ///
    /// A disk is convex, so the offsets of each row form a single contiguous
    /// range of `dx`. Rows with no offsets are omitted.
    pub fn row_spans(&self) -> Vec<RowSpan> {
        let mut spans: Vec<RowSpan> = Vec::new();
        for &(dx, dy) in &self.offsets {
            match spans.last_mut() {
                Some(span) if span.dy == dy => {
                    span.min_dx = span.min_dx.min(dx);
                    span.max_dx = span.max_dx.max(dx);
                }
                _ => spans.push(RowSpan {
                    dy,
                    min_dx: dx,
                    max_dx: dx,
                }),
            }
        }
        spans
    }
}
