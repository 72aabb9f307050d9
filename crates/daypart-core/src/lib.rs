//! Core domain for playlist time-of-day classification.
//!
//! This crate holds everything that does not need ONNX Runtime:
//!
//! - **Types** (`types.rs`): validated track-feature records and the five
//!   time-of-day classes the model predicts.
//! - **Remapping** (`remap.rs`): interval-to-interval rescaling used to bring
//!   raw audio descriptors into the model's [-1, 1] input domain.
//! - **Vectorization** (`vectorize.rs`): fixed descriptor-order conversion of
//!   a track record into the model input vector.
//! - **Ranking** (`rank.rs`): top-k selection over a class distribution.
//! - **Aggregation** (`aggregate.rs`): playlist-level averaging of per-track
//!   distributions into a single verdict.
//!
//! The inference side (model download, ort sessions, batch prediction) lives
//! in `daypart-classify`.

pub mod aggregate;
pub mod error;
pub mod rank;
pub mod remap;
pub mod types;
pub mod vectorize;

pub use aggregate::{aggregate, PlaylistVerdict};
pub use error::DaypartError;
pub use rank::top_k;
pub use remap::remap;
pub use types::{Daypart, RankedClass, RawTrackFeatures, TrackFeatures, CLASS_COUNT};
pub use vectorize::{vectorize, INPUT_DIM};
