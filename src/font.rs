use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::errors::{Result, VizError};
use crate::options::{FontColor, FontSize};
use crate::traits::{FontSource, LabelFont};

/// TrueType/OpenType font on disk.
///
/// The path may contain `{size}` and `{color}` placeholders, so one template
/// can address a family of per-size, per-color font files, e.g.
/// `fonts/open-sans-{size}-{color}.ttf`. Without placeholders the same file
/// serves every size and color.
#[derive(Debug, Clone)]
pub struct FontFile {
    template: String,
}

impl FontFile {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn resolve(&self, size: FontSize, color: FontColor) -> PathBuf {
        PathBuf::from(
            self.template
                .replace("{size}", &size.pixels().to_string())
                .replace("{color}", color.name()),
        )
    }
}

impl FontSource for FontFile {
    type Font = GlyphFont;

    fn load(&self, size: FontSize, color: FontColor) -> Result<GlyphFont> {
        let path = self.resolve(size, color);
        log::debug!("loading label font {}", path.display());
        let bytes = std::fs::read(&path).map_err(|source| VizError::Font {
            path: path.clone(),
            source,
        })?;
        let font = GlyphFont::from_bytes(&path, bytes, size, color)?;
        log::debug!("loaded label font {}", path.display());
        Ok(font)
    }
}

/// Font rasterized through `ab_glyph` at a fixed pixel size and color.
#[derive(Clone)]
pub struct GlyphFont {
    font: FontArc,
    scale: PxScale,
    color: Rgba<u8>,
}

impl GlyphFont {
    pub fn from_bytes(
        origin: &Path,
        bytes: Vec<u8>,
        size: FontSize,
        color: FontColor,
    ) -> Result<Self> {
        let font = FontArc::try_from_vec(bytes).map_err(|_| VizError::FontParse {
            path: origin.to_path_buf(),
        })?;
        Ok(Self {
            font,
            scale: PxScale::from(size.pixels() as f32),
            color: color.rgba(),
        })
    }
}

impl LabelFont for GlyphFont {
    fn text_size(&self, text: &str) -> (u32, u32) {
        let (width, _) = text_size(self.scale, &self.font, text);
        (width, self.scale.y.ceil() as u32)
    }

    fn draw_text(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str) {
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        draw_text_mut(
            canvas,
            self.color,
            clamp(x),
            clamp(y),
            self.scale,
            &self.font,
            text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_placeholders() {
        let source = FontFile::new("fonts/open-sans-{size}-{color}.ttf");
        assert_eq!(
            source.resolve(FontSize::Px64, FontColor::White),
            PathBuf::from("fonts/open-sans-64-white.ttf")
        );

        let fixed = FontFile::new("/usr/share/fonts/label.ttf");
        assert_eq!(
            fixed.resolve(FontSize::Px8, FontColor::Black),
            PathBuf::from("/usr/share/fonts/label.ttf")
        );
    }

    #[test]
    fn test_missing_font_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FontFile::new(dir.path().join("missing.ttf").display().to_string());
        let err = source.load(FontSize::Px32, FontColor::Black).err().unwrap();
        assert!(matches!(err, VizError::Font { .. }));
    }

    #[test]
    fn test_non_font_bytes_are_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bogus.ttf");
        std::fs::write(&path, b"not a font")?;

        let err = FontFile::new(path.display().to_string())
            .load(FontSize::Px16, FontColor::White)
            .err()
            .unwrap();
        assert!(matches!(err, VizError::FontParse { .. }));
        Ok(())
    }
}
