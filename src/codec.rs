use std::io::Cursor;

use image::{imageops::FilterType, DynamicImage, ImageFormat, RgbaImage};
use serde::Serialize;

use crate::errors::{Result, VizError};

/// PNG payload ready to be served to a UI, with its dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedImage {
    #[serde(skip)]
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub const MIME_TYPE: &'static str = "image/png";
}

/// Decode caller-supplied bytes in any format the enabled codecs understand.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(bytes).map_err(|source| VizError::Decode { source })?;
    log::debug!("decoded {}x{} input image", image.width(), image.height());
    Ok(image)
}

/// Scale to the largest size that fits within `max x max`, keeping aspect
/// ratio. Smaller images are scaled up.
pub fn scale_to_fit(image: &DynamicImage, max: u32) -> DynamicImage {
    let scaled = image.resize(max, max, FilterType::Triangle);
    log::debug!(
        "scaled {}x{} to {}x{} (fit {max})",
        image.width(),
        image.height(),
        scaled.width(),
        scaled.height()
    );
    scaled
}

pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage> {
    let mut data = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
        .map_err(|source| VizError::Encode {
            operation: "PNG encode".to_string(),
            source,
        })?;

    Ok(EncodedImage {
        data,
        width: image.width(),
        height: image.height(),
    })
}
