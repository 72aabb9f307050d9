//! ONNX-based inference engine.
//!
//! [`OnnxClassifier`] wraps one ort session around the pretrained dense
//! network (6 descriptor inputs, 5 time-of-day class outputs).
//! [`Classifier`] is the process-wide handle: it loads the model lazily on
//! first use through a single-flight `tokio::sync::OnceCell`, so concurrent
//! callers await the same in-flight load instead of racing, and the session
//! is read-only for the rest of the process lifetime.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use tokio::sync::OnceCell;

use daypart_core::{CLASS_COUNT, INPUT_DIM};

use crate::config::Config;
use crate::error::{ClassifyError, Result};
use crate::models::ModelManager;

/// Input tensor name declared by the exported model.
const INPUT_NAME: &str = "audio_features";

/// Anything that can turn a model input vector into a class distribution.
///
/// Seam between the batch predictor and ONNX Runtime; tests substitute a
/// stub implementation.
pub trait TrackClassifier {
    /// Predict the 5-class distribution for one length-6 input vector.
    ///
    /// The output is raw model activation, not guaranteed to sum to 1.
    fn predict(&self, input: &[f32]) -> Result<[f32; CLASS_COUNT]>;
}

/// The loaded ONNX model.
#[derive(Debug)]
pub struct OnnxClassifier {
    // Session::run takes &mut self; prediction calls are serialized by the
    // batch loop, so this mutex is uncontended in practice.
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Load the model from an ONNX file.
    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("loading classifier model from {:?}", path);
        let session = Session::builder()
            .and_then(|b| b.with_intra_threads(1))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| ClassifyError::ModelLoad(format!("{:?}: {}", path, e)))?;
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl TrackClassifier for OnnxClassifier {
    fn predict(&self, input: &[f32]) -> Result<[f32; CLASS_COUNT]> {
        check_input_shape(input.len())?;

        // Reshape to the 1x6 batch the model declares
        let batch = Array2::from_shape_vec((1, INPUT_DIM), input.to_vec())
            .map_err(|e| ClassifyError::Inference(format!("input tensor shape: {}", e)))?;
        let tensor = Tensor::from_array(batch)
            .map_err(|e| ClassifyError::Inference(format!("input tensor creation: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifyError::Inference("session mutex poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![INPUT_NAME => tensor])
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let (_, value) = outputs
            .iter()
            .next()
            .ok_or_else(|| ClassifyError::Inference("model produced no output".to_string()))?;
        let (_shape, data) = value
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifyError::Inference(format!("output extraction: {}", e)))?;

        // A model that is not the expected 5-class head is a bad asset, not
        // a transient inference failure.
        if data.len() != CLASS_COUNT {
            return Err(ClassifyError::ModelLoad(format!(
                "model output has {} classes, expected {}",
                data.len(),
                CLASS_COUNT
            )));
        }

        let mut distribution = [0.0f32; CLASS_COUNT];
        distribution.copy_from_slice(data);
        Ok(distribution)
    }
}

/// Reject any input that is not exactly one model input vector wide.
pub(crate) fn check_input_shape(len: usize) -> Result<()> {
    if len != INPUT_DIM {
        return Err(ClassifyError::InvalidInputShape {
            expected: INPUT_DIM,
            got: len,
        });
    }
    Ok(())
}

/// Process-wide classifier handle with lazy, single-flight model loading.
pub struct Classifier {
    manager: ModelManager,
    model: OnceCell<OnnxClassifier>,
}

impl Classifier {
    /// Create a handle from configuration. Nothing is loaded yet; the model
    /// is fetched and deserialized on the first prediction.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_manager(ModelManager::from_config(&config.model)?))
    }

    /// Create a handle around an explicit model manager.
    pub fn with_manager(manager: ModelManager) -> Self {
        Self {
            manager,
            model: OnceCell::new(),
        }
    }

    /// Get the loaded model, loading it exactly once.
    ///
    /// The first caller performs the load; concurrent callers await the same
    /// in-flight load. Loading is blocking I/O (cache read or download plus
    /// session deserialization) and runs on the blocking pool.
    pub async fn engine(&self) -> Result<&OnnxClassifier> {
        self.model
            .get_or_try_init(|| async {
                let manager = self.manager.clone();
                tokio::task::spawn_blocking(move || {
                    let path = manager.ensure_model()?;
                    OnnxClassifier::load(&path)
                })
                .await
                .map_err(|e| ClassifyError::ModelLoad(format!("load task failed: {}", e)))?
            })
            .await
    }
}
