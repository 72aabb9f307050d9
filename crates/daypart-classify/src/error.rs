//! Classification error types

use thiserror::Error;

/// Errors from the inference side of the pipeline.
///
/// `ModelLoad` is fatal to any prediction attempt and must reach the caller;
/// it is never retried silently. Per-track failures are carried inside
/// [`crate::batch::TrackPrediction`] entries instead of aborting the batch.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// Model asset missing, corrupt, undownloadable, or not the expected
    /// 6-in/5-out dense mapping.
    #[error("failed to load classifier model: {0}")]
    ModelLoad(String),

    /// A vector of the wrong length reached the inference engine.
    #[error("classifier expects a {expected}-dimensional input, got {got}")]
    InvalidInputShape { expected: usize, got: usize },

    /// ONNX Runtime failed during a prediction call.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Every track in a non-empty playlist failed validation, so there is
    /// nothing to classify. Distinct from `EmptyPlaylist` so presentation
    /// can phrase the two differently.
    #[error("no usable audio features in any of the {tracks} tracks")]
    NoUsableTracks { tracks: usize },

    /// Validation, ranking, or aggregation error from the core pipeline.
    #[error(transparent)]
    Core(#[from] daypart_core::DaypartError),
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
