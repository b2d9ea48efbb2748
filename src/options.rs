use image::{Rgb, Rgba};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::boxes::ModelType;
use crate::palette;

pub const DEFAULT_LINE_PAD: u32 = 2;

/// Caller-supplied rendering options. Every key is optional.
///
/// Unsupported values never fail: a value of the wrong JSON type is dropped
/// with a warning, and the rest fall back to the defaults when the option is
/// resolved.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    #[serde(deserialize_with = "lenient")]
    pub line_color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub line_pad: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub font_color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub font_size: Option<FontSizeOption>,
    #[serde(deserialize_with = "lenient")]
    pub model_type: Option<String>,
}

/// `fontSize` arrives as a number or a string depending on the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FontSizeOption {
    Number(f64),
    Text(String),
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            log::warn!("ignoring option value {value}: {err}");
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontSize {
    Px8,
    Px16,
    #[default]
    Px32,
    Px64,
    Px128,
}

impl FontSize {
    pub const fn pixels(self) -> u32 {
        match self {
            Self::Px8 => 8,
            Self::Px16 => 16,
            Self::Px32 => 32,
            Self::Px64 => 64,
            Self::Px128 => 128,
        }
    }

    pub const fn from_pixels(px: u32) -> Option<Self> {
        match px {
            8 => Some(Self::Px8),
            16 => Some(Self::Px16),
            32 => Some(Self::Px32),
            64 => Some(Self::Px64),
            128 => Some(Self::Px128),
            _ => None,
        }
    }

    /// Size picked from the image width when the caller asks for `"auto"`.
    pub const fn for_image_width(width: u32) -> Self {
        if width > 1600 {
            Self::Px128
        } else if width > 700 {
            Self::Px32
        } else {
            Self::Px16
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontColor {
    #[default]
    Black,
    White,
}

impl FontColor {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }

    pub const fn rgba(self) -> Rgba<u8> {
        match self {
            Self::Black => Rgba([0, 0, 0, 255]),
            Self::White => Rgba([255, 255, 255, 255]),
        }
    }
}

/// Stroke color for item `index`: the override, else the palette name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeColor {
    pub name: String,
    pub rgba: Rgba<u8>,
}

impl RenderOptions {
    /// Zero counts as unset, like an empty `lineColor`.
    pub fn line_pad(&self) -> u32 {
        match self.line_pad {
            None | Some(0) => DEFAULT_LINE_PAD,
            Some(pad) => pad,
        }
    }

    pub fn font_color(&self) -> FontColor {
        match self.font_color.as_deref() {
            None | Some("black") => FontColor::Black,
            Some("white") => FontColor::White,
            Some(other) => {
                log::warn!("unsupported fontColor {other:?}, using black");
                FontColor::Black
            }
        }
    }

    /// Resolve `fontSize`; `image_width` only matters for `"auto"`.
    pub fn font_size(&self, image_width: u32) -> FontSize {
        let px = match &self.font_size {
            None => return FontSize::default(),
            Some(FontSizeOption::Number(px)) if px.fract() == 0.0 && *px >= 0.0 => {
                Some(*px as u32)
            }
            Some(FontSizeOption::Number(_)) => None,
            Some(FontSizeOption::Text(text)) if text.trim() == "auto" => {
                return FontSize::for_image_width(image_width)
            }
            Some(FontSizeOption::Text(text)) => text.trim().parse().ok(),
        };
        px.and_then(FontSize::from_pixels).unwrap_or_else(|| {
            log::warn!("unsupported fontSize {:?}, using 32", self.font_size);
            FontSize::default()
        })
    }

    pub fn model_type(&self) -> ModelType {
        match self.model_type.as_deref() {
            None => ModelType::default(),
            Some(name) => name.parse().unwrap_or_else(|_| {
                log::warn!("unknown modelType {name:?}, using object-detector");
                ModelType::default()
            }),
        }
    }

    pub fn stroke_color(&self, index: usize) -> StrokeColor {
        let name = match self.line_color.as_deref() {
            Some(color) if !color.is_empty() => color.to_string(),
            _ => palette::name_for(index).to_string(),
        };
        let Rgb([r, g, b]) = palette::css_color(&name).unwrap_or_else(|| {
            log::warn!("unrecognized color {name:?}, drawing in black");
            Rgb([0, 0, 0])
        });
        StrokeColor {
            name,
            rgba: Rgba([r, g, b, 255]),
        }
    }
}
