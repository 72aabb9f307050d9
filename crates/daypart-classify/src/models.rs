//! Model asset management.
//!
//! Locates the classifier ONNX file, downloading and caching it on first use.
//! Default cache: `~/.cache/daypart/models/`. Deployments that ship the model
//! themselves can point the manager at an explicit path instead.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::config::ModelConfig;
use crate::error::{ClassifyError, Result};

/// Cached filename of the classifier asset.
const MODEL_FILENAME: &str = "daypart-dense-1.onnx";

/// Default download location for the classifier asset.
const MODEL_URL: &str = "https://models.daypart.app/daypart-dense-1.onnx";

/// Manages the classifier model download and cache.
#[derive(Debug, Clone)]
pub struct ModelManager {
    explicit_path: Option<PathBuf>,
    cache_dir: PathBuf,
    download_url: String,
    auto_download: bool,
}

impl ModelManager {
    /// Create from a model configuration section, falling back to the
    /// default cache directory when none is configured.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let cache_dir = match &config.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .ok_or_else(|| {
                    ClassifyError::ModelLoad("could not determine cache directory".to_string())
                })?
                .join("daypart")
                .join("models"),
        };
        Ok(Self {
            explicit_path: config.path.clone(),
            cache_dir,
            download_url: config
                .download_url
                .clone()
                .unwrap_or_else(|| MODEL_URL.to_string()),
            auto_download: config.auto_download.unwrap_or(true),
        })
    }

    /// Create with a custom cache directory (for testing)
    pub fn with_cache_dir(cache_dir: PathBuf) -> Self {
        Self {
            explicit_path: None,
            cache_dir,
            download_url: MODEL_URL.to_string(),
            auto_download: true,
        }
    }

    /// Local path the model lives at (explicit path or cache location).
    pub fn model_path(&self) -> PathBuf {
        match &self.explicit_path {
            Some(path) => path.clone(),
            None => self.cache_dir.join(MODEL_FILENAME),
        }
    }

    /// Check whether the model is already on disk.
    pub fn is_available(&self) -> bool {
        self.model_path().exists()
    }

    /// Get the model path, downloading into the cache if necessary.
    pub fn ensure_model(&self) -> Result<PathBuf> {
        let model_path = self.model_path();

        if model_path.exists() {
            log::info!("classifier model found at {:?}", model_path);
            return Ok(model_path);
        }

        if self.explicit_path.is_some() {
            return Err(ClassifyError::ModelLoad(format!(
                "configured model path does not exist: {:?}",
                model_path
            )));
        }
        if !self.auto_download {
            return Err(ClassifyError::ModelLoad(format!(
                "model not cached at {:?} and auto-download is disabled",
                model_path
            )));
        }

        log::info!("downloading classifier model from {}", self.download_url);
        self.download_file(&self.download_url, &model_path)?;
        Ok(model_path)
    }

    /// Download a file from URL to target path with atomic rename.
    fn download_file(&self, url: &str, target_path: &Path) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)
            .map_err(|e| ClassifyError::ModelLoad(format!("failed to create cache dir: {}", e)))?;

        let temp_path = target_path.with_extension("tmp");

        let response = ureq::get(url)
            .call()
            .map_err(|e| ClassifyError::ModelLoad(format!("download failed for {}: {}", url, e)))?;

        let content_length: Option<u64> = response
            .header("Content-Length")
            .and_then(|s| s.parse().ok());

        let mut file = fs::File::create(&temp_path)
            .map_err(|e| ClassifyError::ModelLoad(format!("failed to create temp file: {}", e)))?;

        let mut reader = response.into_reader();
        let mut buffer = [0u8; 8192];
        let mut downloaded: u64 = 0;

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| ClassifyError::ModelLoad(format!("read error: {}", e)))?;
            if bytes_read == 0 {
                break;
            }
            file.write_all(&buffer[..bytes_read])
                .map_err(|e| ClassifyError::ModelLoad(format!("write error: {}", e)))?;
            downloaded += bytes_read as u64;
        }

        file.flush()
            .map_err(|e| ClassifyError::ModelLoad(format!("flush error: {}", e)))?;
        drop(file);

        // Verify size against the declared length before publishing the file
        if let Some(expected) = content_length {
            if downloaded != expected {
                fs::remove_file(&temp_path).ok();
                return Err(ClassifyError::ModelLoad(format!(
                    "download incomplete: expected {} bytes, got {}",
                    expected, downloaded
                )));
            }
        }

        // Atomic rename
        fs::rename(&temp_path, target_path)
            .map_err(|e| ClassifyError::ModelLoad(format!("rename failed: {}", e)))?;

        log::info!("downloaded classifier model ({} bytes)", downloaded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_model_path() {
        let mgr = ModelManager::with_cache_dir("/tmp/daypart-test".into());
        assert!(mgr
            .model_path()
            .to_str()
            .unwrap()
            .ends_with("daypart-dense-1.onnx"));
        assert!(!mgr.is_available());
    }

    #[test]
    fn test_explicit_path_wins_over_cache() {
        let config = ModelConfig {
            path: Some(PathBuf::from("/opt/models/custom.onnx")),
            cache_dir: Some(PathBuf::from("/tmp/ignored")),
            ..ModelConfig::default()
        };
        let mgr = ModelManager::from_config(&config).unwrap();
        assert_eq!(mgr.model_path(), PathBuf::from("/opt/models/custom.onnx"));
    }

    #[test]
    fn test_missing_explicit_path_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelConfig {
            path: Some(dir.path().join("nope.onnx")),
            ..ModelConfig::default()
        };
        let mgr = ModelManager::from_config(&config).unwrap();
        assert!(matches!(
            mgr.ensure_model().unwrap_err(),
            ClassifyError::ModelLoad(_)
        ));
    }

    #[test]
    fn test_download_disabled_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelConfig {
            cache_dir: Some(dir.path().to_path_buf()),
            auto_download: Some(false),
            ..ModelConfig::default()
        };
        let mgr = ModelManager::from_config(&config).unwrap();
        let err = mgr.ensure_model().unwrap_err();
        assert!(err.to_string().contains("auto-download is disabled"));
    }

    #[test]
    fn test_existing_model_is_returned_without_download() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join(MODEL_FILENAME);
        fs::write(&model_path, b"not really onnx").unwrap();

        let mgr = ModelManager::with_cache_dir(dir.path().to_path_buf());
        assert!(mgr.is_available());
        assert_eq!(mgr.ensure_model().unwrap(), model_path);
    }
}
