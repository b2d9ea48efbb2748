use std::path::PathBuf;
use thiserror::Error;

/// Structured error types for the visualization helpers.
///
/// Only three things can actually fail: decoding the caller's image bytes,
/// re-encoding the annotated result, and reaching the label font. Unsupported
/// option values and out-of-bounds drawing are recovered locally and never
/// surface here.
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Image decode error: input could not be read as an image")]
    Decode {
        #[source]
        source: image::ImageError,
    },

    #[error("Image encode error: {operation} failed")]
    Encode {
        operation: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Font error: could not load {path:?}")]
    Font {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Font error: {path:?} is not a usable TrueType/OpenType font")]
    FontParse { path: PathBuf },

    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Filesystem error: {operation} failed for {path:?}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, VizError>;

/// Convert I/O errors to filesystem errors.
///
/// Code that knows the path and operation should construct
/// `VizError::FileSystem` directly; this is the fallback for `?`.
impl From<std::io::Error> for VizError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("unknown"),
            operation: "unknown".to_string(),
            source: err,
        }
    }
}

/// Model outputs that fail to parse are bad caller input.
impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput {
            field: "predictions".to_string(),
            reason: err.to_string(),
        }
    }
}

/// A segmentation map whose rows disagree in length cannot become a grid.
impl From<ndarray::ShapeError> for VizError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::InvalidInput {
            field: "seg_map".to_string(),
            reason: err.to_string(),
        }
    }
}
