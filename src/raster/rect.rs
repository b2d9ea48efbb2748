use image::{ImageBuffer, Pixel};

use super::{put_pixel_clipped, within_range, PixelRect};

pub trait DrawRect<P> {
    /// Paint every pixel of `rect` that lies within `pad` of one of its edges.
    fn stroke_rect(&mut self, rect: PixelRect, pad: u32, color: P);

    /// Stroke `rect` and also paint interior pixels with
    /// `y <= y_max + pad && x <= x_max + pad`.
    ///
    /// The interior test has no lower bound. Inside the iterated box it always
    /// holds, so the whole rectangle is painted.
    fn fill_rect(&mut self, rect: PixelRect, pad: u32, color: P);
}

impl<P> DrawRect<P> for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
{
    fn stroke_rect(&mut self, rect: PixelRect, pad: u32, color: P) {
        draw_rect(self, rect, pad, color, false);
    }

    fn fill_rect(&mut self, rect: PixelRect, pad: u32, color: P) {
        draw_rect(self, rect, pad, color, true);
    }
}

fn draw_rect<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    rect: PixelRect,
    pad: u32,
    color: P,
    filled: bool,
) {
    let PixelRect {
        x_min,
        y_min,
        x_max,
        y_max,
    } = rect;
    let pad = i64::from(pad);

    // Skip the part of the box that lies outside the buffer.
    let x_from = x_min.max(0);
    let x_to = x_max.min(i64::from(image.width()) - 1);
    let y_from = y_min.max(0);
    let y_to = y_max.min(i64::from(image.height()) - 1);

    for x in x_from..=x_to {
        for y in y_from..=y_to {
            let on_edge = within_range(y, y_min, pad)
                || within_range(x, x_min, pad)
                || within_range(y, y_max, pad)
                || within_range(x, x_max, pad);
            let interior = y <= y_max.saturating_add(pad) && x <= x_max.saturating_add(pad);
            if on_edge || (filled && interior) {
                put_pixel_clipped(image, x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    const INK: Rgb<u8> = Rgb([0, 0, 255]);

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut image = RgbImage::new(12, 12);
        image.stroke_rect(PixelRect::new(0, 0, 10, 10), 1, INK);

        assert_eq!(*image.get_pixel(5, 0), INK);
        assert_eq!(*image.get_pixel(0, 5), INK);
        assert_eq!(*image.get_pixel(5, 1), INK);
        assert_eq!(*image.get_pixel(9, 5), INK);
        assert_eq!(*image.get_pixel(5, 10), INK);
        assert_ne!(*image.get_pixel(5, 5), INK);
        assert_ne!(*image.get_pixel(2, 2), INK);
        // outside the box
        assert_ne!(*image.get_pixel(11, 5), INK);
    }

    #[test]
    fn test_fill_rect_paints_interior() {
        let mut image = RgbImage::new(12, 12);
        image.fill_rect(PixelRect::new(0, 0, 10, 10), 1, INK);

        assert_eq!(*image.get_pixel(5, 5), INK);
        for (x, y, p) in image.enumerate_pixels() {
            assert_eq!(*p == INK, x <= 10 && y <= 10, "({x}, {y})");
        }
    }

    #[test]
    fn test_fill_rect_ignores_lower_bound_only_within_box() {
        // The interior rule has no lower bound, but iteration is confined to
        // the box, so nothing left of or above it is painted.
        let mut image = RgbImage::new(10, 10);
        image.fill_rect(PixelRect::new(4, 4, 6, 6), 0, INK);

        assert_ne!(*image.get_pixel(3, 5), INK);
        assert_ne!(*image.get_pixel(5, 3), INK);
        assert_eq!(*image.get_pixel(5, 5), INK);
    }

    #[test]
    fn test_rect_past_the_edge_is_clipped() {
        let mut image = RgbImage::new(8, 8);
        image.stroke_rect(PixelRect::new(-5, -5, 20, 3), 0, INK);

        assert_eq!(*image.get_pixel(4, 3), INK);
        assert_ne!(*image.get_pixel(4, 1), INK);
    }

    #[test]
    fn test_extreme_corners_do_not_overflow() {
        let mut image = RgbImage::new(8, 8);
        image.stroke_rect(PixelRect::new(i64::MIN, 0, 4, 4), 2, INK);
        image.fill_rect(PixelRect::new(5, 5, i64::MAX, i64::MAX), 2, INK);

        assert_eq!(*image.get_pixel(4, 2), INK);
        assert_eq!(*image.get_pixel(1, 2), INK);
        assert_eq!(*image.get_pixel(7, 7), INK);
    }

    #[test]
    fn test_inverted_rect_draws_nothing() {
        let mut image = RgbImage::new(8, 8);
        image.fill_rect(PixelRect::new(6, 6, 2, 2), 1, INK);

        assert!(image.pixels().all(|p| *p != INK));
    }
}
