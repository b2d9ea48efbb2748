//! Overlay MAX model outputs on images.
//!
//! Each annotator takes the raw image bytes, the already-parsed model output
//! and a [`RenderOptions`], and returns a PNG payload plus the per-item
//! metadata a UI needs to build a legend.

pub mod boxes;
pub mod codec;
pub mod config;
pub mod cropper;
pub mod errors;
pub mod font;
pub mod mocks;
pub mod options;
pub mod palette;
pub mod pose;
pub mod raster;
pub mod records;
pub mod segmentation;
pub mod traits;

pub use boxes::{draw_boxes, BoxCoords, BoxObject, BoxesResult, ModelType};
pub use codec::EncodedImage;
pub use config::Config;
pub use cropper::{crop_boxes, CropResult};
pub use errors::{Result, VizError};
pub use font::{FontFile, GlyphFont};
pub use options::{FontColor, FontSize, RenderOptions};
pub use pose::{draw_pose_lines, PoseResult};
pub use records::{Detection, PoseLine, Skeleton};
pub use segmentation::{colorize_segments, Segment, SegmentationResult};
pub use traits::*;
