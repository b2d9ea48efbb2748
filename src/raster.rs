//! Pixel-level drawing primitives.
//!
//! Coordinates are signed so boxes that poke past the image edge can be
//! described as-is; anything outside the buffer is skipped when written.

mod crop;
mod line;
mod rect;

pub use crop::CropRect;
pub use line::DrawLine;
pub use rect::DrawRect;

use image::{ImageBuffer, Pixel};

/// Pixel rectangle with signed corners.
///
/// Stroking and filling include the `x_max` column and `y_max` row. Cropping
/// treats the max edge as exclusive, so a crop is `width() x height()` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl PixelRect {
    pub const fn new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub const fn width(&self) -> i64 {
        self.x_max.saturating_sub(self.x_min)
    }

    pub const fn height(&self) -> i64 {
        self.y_max.saturating_sub(self.y_min)
    }
}

/// Furthest a coordinate may sit from the origin. Keeps pad and label
/// arithmetic on converted coordinates clear of `i64` overflow.
pub const COORD_LIMIT: i64 = 1 << 31;

/// Round a float coordinate to a pixel, clamped to `±COORD_LIMIT`.
pub fn pixel_coord(v: f32) -> i64 {
    (v.round() as i64).clamp(-COORD_LIMIT, COORD_LIMIT)
}

fn put_pixel_clipped<P>(image: &mut ImageBuffer<P, Vec<P::Subpixel>>, x: i64, y: i64, color: P)
where
    P: Pixel,
{
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, color);
    }
}

fn within_range(i: i64, line: i64, pad: i64) -> bool {
    line.saturating_sub(pad) <= i && i <= line.saturating_add(pad)
}
