use rayon::prelude::*;
use serde::Serialize;

use crate::codec::{decode, encode_png, EncodedImage};
use crate::errors::Result;
use crate::options::RenderOptions;
use crate::raster::CropRect;
use crate::records::Detection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropResult {
    /// Position of the detection this crop came from.
    pub index: usize,
    #[serde(flatten)]
    pub image: EncodedImage,
    pub label: Option<String>,
}

/// Cut each detection box out of the image as its own PNG.
///
/// Crops are cut in parallel from the shared decoded image, which is only
/// read. The returned list is in input order and every entry carries its
/// input `index`. Boxes with no area inside the image produce no entry.
pub fn crop_boxes(
    image_bytes: &[u8],
    detections: &[Detection],
    options: &RenderOptions,
) -> Result<Vec<CropResult>> {
    let source = decode(image_bytes)?.to_rgba8();
    let (width, height) = source.dimensions();
    let model_type = options.model_type();

    log::info!("cropping {} boxes from {width}x{height}", detections.len());

    let crops = detections
        .par_iter()
        .enumerate()
        .map(|(index, detection)| -> Result<Option<CropResult>> {
            let rect = model_type
                .box_coords(&detection.detection_box, width, height)
                .to_pixel_rect();
            let cropped = source.crop_rect(rect);
            if cropped.width() == 0 || cropped.height() == 0 {
                log::warn!("skipping box {index}: {rect:?} is empty inside the image");
                return Ok(None);
            }
            Ok(Some(CropResult {
                index,
                image: encode_png(&cropped)?,
                label: detection.label.clone(),
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(crops.into_iter().flatten().collect())
}
