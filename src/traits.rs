use image::RgbaImage;

use crate::errors::Result;
use crate::options::{FontColor, FontSize};

/// A loaded label font: measures and prints single-line text.
pub trait LabelFont {
    /// `(width, line_height)` of `text` in pixels. Empty text still has the
    /// font's line height.
    fn text_size(&self, text: &str) -> (u32, u32);

    /// Print `text` with its top-left corner at `(x, y)`. Glyphs falling
    /// outside the canvas are dropped.
    fn draw_text(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str);
}

/// Where box labels get their font from, addressed by size and color.
///
/// Loading is the only fallible step of box annotation besides decoding and
/// encoding, so the seam lets tests swap in a font that needs no resource.
pub trait FontSource: Send + Sync {
    type Font: LabelFont;

    fn load(&self, size: FontSize, color: FontColor) -> Result<Self::Font>;
}
