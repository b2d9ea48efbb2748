use image::{Rgba, RgbaImage};

use crate::codec::encode_png;
use crate::errors::Result;
use crate::options::{FontColor, FontSize};
use crate::raster::{DrawRect, PixelRect};
use crate::traits::{FontSource, LabelFont};

/// Test font: every character is a solid block half as wide as the font size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFont {
    pub size: u32,
    pub color: Rgba<u8>,
}

impl BlockFont {
    pub const fn advance(&self) -> u32 {
        self.size / 2
    }
}

impl LabelFont for BlockFont {
    fn text_size(&self, text: &str) -> (u32, u32) {
        (text.chars().count() as u32 * self.advance(), self.size)
    }

    fn draw_text(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str) {
        let advance = i64::from(self.advance());
        for (i, _) in text.chars().enumerate() {
            let left = x + i as i64 * advance;
            let bottom = y + i64::from(self.size) - 1;
            let cell = PixelRect::new(left, y, left + advance - 1, bottom);
            canvas.fill_rect(cell, 0, self.color);
        }
    }
}

/// Font source that never touches the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFontSource;

impl FontSource for MockFontSource {
    type Font = BlockFont;

    fn load(&self, size: FontSize, color: FontColor) -> Result<BlockFont> {
        Ok(BlockFont {
            size: size.pixels(),
            color: color.rgba(),
        })
    }
}

/// PNG bytes of a solid-color image.
pub fn solid_png(width: u32, height: u32, color: Rgba<u8>) -> Result<Vec<u8>> {
    Ok(encode_png(&RgbaImage::from_pixel(width, height, color))?.data)
}
