//! Serde models for the raw JSON that MAX model services return.
//!
//! Each parser accepts either the service envelope (`{"predictions": …}`,
//! `{"seg_map": …}`) or the bare payload inside it.

use ndarray::Array2;
use serde::Deserialize;

use crate::errors::{Result, VizError};

#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentationPayload {
    Envelope { seg_map: Vec<Vec<u32>> },
    Bare(Vec<Vec<u32>>),
}

/// Parse a segmentation map into a `height x width` grid of class indices.
pub fn parse_segmentation(json: &str) -> Result<Array2<u32>> {
    let rows = match serde_json::from_str(json)? {
        SegmentationPayload::Envelope { seg_map } => seg_map,
        SegmentationPayload::Bare(rows) => rows,
    };
    segmentation_grid(rows)
}

pub fn segmentation_grid(rows: Vec<Vec<u32>>) -> Result<Array2<u32>> {
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    if let Some(row) = rows.iter().position(|r| r.len() != width) {
        return Err(VizError::InvalidInput {
            field: "seg_map".to_string(),
            reason: format!(
                "row {row} has {} cells, expected {width}",
                rows[row].len()
            ),
        });
    }
    Ok(Array2::from_shape_vec(
        (height, width),
        rows.into_iter().flatten().collect(),
    )?)
}

/// One line segment `(x_min, y_min, x_max, y_max)` of a pose skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "PoseLineRepr")]
pub struct PoseLine {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl PoseLine {
    pub const fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PoseLineRepr {
    Object { line: [f32; 4] },
    Bare([f32; 4]),
}

impl From<PoseLineRepr> for PoseLine {
    fn from(repr: PoseLineRepr) -> Self {
        let [x_min, y_min, x_max, y_max] = match repr {
            PoseLineRepr::Object { line } | PoseLineRepr::Bare(line) => line,
        };
        Self::new(x_min, y_min, x_max, y_max)
    }
}

/// Skeleton of one detected person.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Skeleton {
    #[serde(default)]
    pub human_id: Option<u32>,
    #[serde(alias = "poseLines", default)]
    pub pose_lines: Vec<PoseLine>,
}

impl Skeleton {
    pub fn new(pose_lines: Vec<PoseLine>) -> Self {
        Self {
            human_id: None,
            pose_lines,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PredictionsPayload<T> {
    Envelope { predictions: Vec<T> },
    Bare(Vec<T>),
}

impl<T> PredictionsPayload<T> {
    fn into_inner(self) -> Vec<T> {
        match self {
            Self::Envelope { predictions } | Self::Bare(predictions) => predictions,
        }
    }
}

pub fn parse_pose(json: &str) -> Result<Vec<Skeleton>> {
    Ok(serde_json::from_str::<PredictionsPayload<Skeleton>>(json)?.into_inner())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmotionPrediction {
    pub label: String,
    #[serde(default)]
    pub probability: f32,
}

/// A box from an object detector or one of the facial models.
///
/// `detection_box` is `[y_min, x_min, y_max, x_max]` as fractions of the image
/// size for most models, and `[x_min, y_min, x_max, y_max]` in pixels for the
/// facial recognizer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub probability: Option<f32>,
    #[serde(alias = "bbox")]
    pub detection_box: [f32; 4],
    #[serde(default)]
    pub age_estimation: Option<f32>,
    #[serde(default)]
    pub emotion_predictions: Vec<EmotionPrediction>,
}

impl Detection {
    pub fn labeled(label: impl Into<String>, detection_box: [f32; 4]) -> Self {
        Self {
            label: Some(label.into()),
            detection_box,
            ..Default::default()
        }
    }
}

pub fn parse_detections(json: &str) -> Result<Vec<Detection>> {
    Ok(serde_json::from_str::<PredictionsPayload<Detection>>(json)?.into_inner())
}
