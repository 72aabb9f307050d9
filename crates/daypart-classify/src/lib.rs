//! Playlist time-of-day classification — inference side.
//!
//! Takes the pure pipeline from `daypart-core` and wires it to a pretrained
//! ONNX classifier:
//!
//! - **Model management** (`models.rs`): locate, download, and cache the
//!   classifier asset.
//! - **Engine** (`engine.rs`): ort session wrapper with lazy single-flight
//!   loading behind a process-wide [`Classifier`] handle.
//! - **Batch prediction** (`batch.rs`): per-track validate → vectorize →
//!   predict → rank, in strict input order, then playlist aggregation.
//! - **Configuration** (`config.rs`): YAML config for model location and
//!   ranking depth.
//!
//! ```no_run
//! use daypart_classify::{Classifier, Config};
//! use daypart_core::RawTrackFeatures;
//!
//! # async fn run(tracks: Vec<RawTrackFeatures>) -> Result<(), daypart_classify::ClassifyError> {
//! let classifier = Classifier::new(&Config::default())?;
//! let analysis = classifier.classify_playlist(&tracks, 5).await?;
//! println!("verdict: {}", analysis.verdict.best);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use batch::{analyze_with, predict_tracks, PlaylistAnalysis, TrackClasses, TrackPrediction};
pub use config::{default_config_path, load_config, save_config, Config, ModelConfig};
pub use engine::{Classifier, OnnxClassifier, TrackClassifier};
pub use error::ClassifyError;
pub use models::ModelManager;
