//! Core error types

use thiserror::Error;

/// Errors from the pure classification pipeline (validation, ranking,
/// aggregation). Inference-side failures live in `daypart-classify`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DaypartError {
    /// A track record is missing a descriptor, carries a non-finite value,
    /// or has an empty id. The offending field is named so the track can be
    /// reported and skipped without aborting the batch.
    #[error("track {track_id:?} has an invalid {field} descriptor")]
    InvalidFeatureRecord { track_id: String, field: &'static str },

    /// Asked for more ranked classes than the distribution holds.
    #[error("cannot rank top {k} classes of a {classes}-class distribution")]
    InvalidK { k: usize, classes: usize },

    /// Aggregating zero tracks would silently average into NaN; refuse it.
    #[error("playlist has no tracks to aggregate")]
    EmptyPlaylist,
}

pub type Result<T> = std::result::Result<T, DaypartError>;
