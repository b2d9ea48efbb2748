use image::{GenericImageView, ImageBuffer, Pixel};

use super::PixelRect;

pub trait CropRect {
    type Output;

    /// Cut out `rect.width() x rect.height()` pixels anchored at
    /// `(rect.x_min, rect.y_min)`, intersected with the image bounds.
    fn crop_rect(&self, rect: PixelRect) -> Self::Output;
}

impl<P> CropRect for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
{
    type Output = Self;

    fn crop_rect(&self, rect: PixelRect) -> Self {
        let (width, height) = self.dimensions();
        let x0 = rect.x_min.clamp(0, i64::from(width));
        let y0 = rect.y_min.clamp(0, i64::from(height));
        let x1 = rect.x_max.clamp(x0, i64::from(width));
        let y1 = rect.y_max.clamp(y0, i64::from(height));

        // x0 <= x1 <= width and y0 <= y1 <= height, all fit in u32
        self.view(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32)
            .to_image()
    }
}
