use std::path::PathBuf;
use thiserror::Error;

/// The main error type for quickdigit operations.
///
/// Failures of the inference exchange itself never show up here: they are
/// folded into [`PredictionResult::Error`](crate::inference::PredictionResult)
/// at the client boundary. Only the CLI turns such a result into
/// [`QuickdigitError::PredictionFailed`] to pick an exit status.
#[derive(Debug, Error)]
pub enum QuickdigitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse pointer session from {path}: {source}")]
    SessionParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode sketch as PNG: {source}")]
    ImageEncode {
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write sketch to {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid drawing surface: {message}")]
    InvalidSurface { message: String },

    #[error("Failed to serialize prediction result: {source}")]
    ResultSerialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Prediction failed: {message}")]
    PredictionFailed { message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
