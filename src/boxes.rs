use std::str::FromStr;

use serde::Serialize;

use crate::codec::{decode, encode_png, EncodedImage};
use crate::errors::Result;
use crate::options::RenderOptions;
use crate::raster::{pixel_coord, DrawRect, PixelRect};
use crate::records::Detection;
use crate::traits::{FontSource, LabelFont};

/// Which model produced the detections. Decides how boxes are read and what
/// text goes on each label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModelType {
    #[default]
    ObjectDetector,
    FacialAgeEstimator,
    FacialEmotionClassifier,
    FacialRecognizer,
}

impl ModelType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ObjectDetector => "object-detector",
            Self::FacialAgeEstimator => "facial-age-estimator",
            Self::FacialEmotionClassifier => "facial-emotion-classifier",
            Self::FacialRecognizer => "facial-recognizer",
        }
    }

    /// Resolve a raw box to pixel coordinates on a `width x height` image.
    pub fn box_coords(self, detection_box: &[f32; 4], width: u32, height: u32) -> BoxCoords {
        match self {
            Self::FacialRecognizer => {
                let [x_min, y_min, x_max, y_max] = *detection_box;
                BoxCoords {
                    x_min,
                    y_min,
                    x_max,
                    y_max,
                }
            }
            Self::ObjectDetector | Self::FacialAgeEstimator | Self::FacialEmotionClassifier => {
                let [y_min, x_min, y_max, x_max] = *detection_box;
                let (width, height) = (width as f32, height as f32);
                BoxCoords {
                    x_min: x_min * width,
                    y_min: y_min * height,
                    x_max: x_max * width,
                    y_max: y_max * height,
                }
            }
        }
    }

    /// Text printed above a box. Missing fields give an empty label.
    pub fn box_label(self, detection: &Detection) -> String {
        match self {
            Self::ObjectDetector => detection.label.clone().unwrap_or_default(),
            Self::FacialAgeEstimator => detection
                .age_estimation
                .map(|age| age.to_string())
                .unwrap_or_default(),
            Self::FacialEmotionClassifier => detection
                .emotion_predictions
                .first()
                .map(|p| p.label.clone())
                .unwrap_or_default(),
            Self::FacialRecognizer => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModelType(pub String);

impl std::fmt::Display for UnknownModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown model type `{}`", self.0)
    }
}

impl std::error::Error for UnknownModelType {}

impl FromStr for ModelType {
    type Err = UnknownModelType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "object-detector" => Ok(Self::ObjectDetector),
            "facial-age-estimator" => Ok(Self::FacialAgeEstimator),
            "facial-emotion-classifier" => Ok(Self::FacialEmotionClassifier),
            "facial-recognizer" => Ok(Self::FacialRecognizer),
            other => Err(UnknownModelType(other.to_string())),
        }
    }
}

/// Box corners in (possibly fractional) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCoords {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoxCoords {
    pub fn to_pixel_rect(self) -> PixelRect {
        PixelRect::new(
            pixel_coord(self.x_min),
            pixel_coord(self.y_min),
            pixel_coord(self.x_max),
            pixel_coord(self.y_max),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxObject {
    pub object: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxesResult {
    #[serde(flatten)]
    pub image: EncodedImage,
    pub objects: Vec<BoxObject>,
}

/// Stroke every detection box on the unscaled image and tag it with a label.
///
/// The label background sits directly above the box, or at the box top when
/// there is no room above. The font is loaded once per call; failing to load
/// it fails the call.
pub fn draw_boxes<F: FontSource>(
    image_bytes: &[u8],
    detections: &[Detection],
    options: &RenderOptions,
    fonts: &F,
) -> Result<BoxesResult> {
    let mut canvas = decode(image_bytes)?.to_rgba8();
    let (width, height) = canvas.dimensions();
    let model_type = options.model_type();
    let pad = options.line_pad();

    log::info!(
        "drawing {} {} boxes on {width}x{height}",
        detections.len(),
        model_type.as_str()
    );

    let font = fonts.load(options.font_size(width), options.font_color())?;
    let pad_px = i64::from(pad);

    let mut objects = Vec::with_capacity(detections.len());
    for (i, detection) in detections.iter().enumerate() {
        let stroke = options.stroke_color(i);
        let rect = model_type
            .box_coords(&detection.detection_box, width, height)
            .to_pixel_rect();
        canvas.stroke_rect(rect, pad, stroke.rgba);

        let text = model_type.box_label(detection);
        let (text_width, text_height) = font.text_size(&text);
        let (text_width, text_height) = (i64::from(text_width), i64::from(text_height));
        let x_tag_max = rect.x_min + text_width + pad_px * 2;
        let y_tag_min = if rect.y_min - text_height > 0 {
            rect.y_min - text_height
        } else {
            rect.y_min
        };
        let tag = PixelRect::new(rect.x_min, y_tag_min, x_tag_max, y_tag_min + text_height);
        canvas.fill_rect(tag, pad, stroke.rgba);
        font.draw_text(&mut canvas, rect.x_min + pad_px, y_tag_min, &text);

        objects.push(BoxObject {
            object: detection.label.clone().unwrap_or(text),
            color: stroke.name,
        });
    }

    Ok(BoxesResult {
        image: encode_png(&canvas)?,
        objects,
    })
}
