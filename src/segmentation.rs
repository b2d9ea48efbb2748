use std::collections::HashSet;

use image::{Rgb, Rgba, RgbaImage};
use ndarray::ArrayView2;
use serde::Serialize;

use crate::codec::{decode, encode_png, scale_to_fit, EncodedImage};
use crate::errors::Result;
use crate::palette::{self, BACKGROUND};

/// The segmenter's output map matches the input image scaled to fit this box.
pub const MAX_SEGMENTATION_SIZE: u32 = 512;

pub const OVERLAY_ALPHA: u8 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub object: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentationResult {
    #[serde(flatten)]
    pub image: EncodedImage,
    pub segments: Vec<Segment>,
}

/// Scale the image to fit 512x512 and paint every non-background cell of
/// `seg_map` in its class color.
pub fn colorize_segments(
    image_bytes: &[u8],
    seg_map: ArrayView2<u32>,
) -> Result<SegmentationResult> {
    let mut canvas = scale_to_fit(&decode(image_bytes)?, MAX_SEGMENTATION_SIZE).to_rgba8();
    let segments = overlay_segments(&mut canvas, seg_map);
    log::info!(
        "colored {} segment classes on {}x{}",
        segments.len(),
        canvas.width(),
        canvas.height()
    );

    Ok(SegmentationResult {
        image: encode_png(&canvas)?,
        segments,
    })
}

/// Paint `seg_map` onto `canvas` cell by cell and list the classes found.
///
/// Cells are taken in row-major order and the n-th cell colors the n-th pixel
/// of the canvas. Background cells leave the pixel untouched; any other class
/// overwrites RGB with its palette color and alpha with [`OVERLAY_ALPHA`].
/// Cells past the end of the canvas are ignored. Segments are listed in order
/// of first appearance.
pub fn overlay_segments(canvas: &mut RgbaImage, seg_map: ArrayView2<u32>) -> Vec<Segment> {
    let width = canvas.width() as usize;
    let pixel_count = width * canvas.height() as usize;
    let mut seen = HashSet::new();
    let mut segments = Vec::new();

    for (i, &class) in seg_map.iter().enumerate() {
        let class = class as usize;
        if class == BACKGROUND {
            continue;
        }

        if seen.insert(class) {
            segments.push(Segment {
                object: palette::object_name(class).unwrap_or("unknown").to_string(),
                color: palette::name_for(class),
            });
        }

        if i < pixel_count {
            let Rgb([r, g, b]) = palette::color_for(class);
            let (x, y) = ((i % width) as u32, (i / width) as u32);
            canvas.put_pixel(x, y, Rgba([r, g, b, OVERLAY_ALPHA]));
        }
    }

    segments
}
