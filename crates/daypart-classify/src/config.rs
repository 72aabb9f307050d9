//! Configuration for the classifier.
//!
//! Stored as YAML. Default location: ~/.config/daypart/config.yaml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use daypart_core::CLASS_COUNT;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model asset location and download behaviour
    pub model: ModelConfig,
    /// Number of ranked classes reported per track (1..=5)
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            // Full distribution by default; the aggregator wants all five
            // classes anyway.
            top_k: CLASS_COUNT,
        }
    }
}

/// Model asset configuration section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Explicit path to the ONNX model file. When set, the cache directory
    /// and download URL are ignored (pre-provisioned deployments).
    pub path: Option<PathBuf>,
    /// Cache directory override. Default: ~/.cache/daypart/models/
    pub cache_dir: Option<PathBuf>,
    /// Download URL override for the model asset.
    pub download_url: Option<String>,
    /// Download the model on first use if it is not cached. When false a
    /// missing model is a load failure instead.
    pub auto_download: Option<bool>,
}

impl Config {
    /// Clamp values into supported ranges after loading.
    pub fn validate(&mut self) {
        self.top_k = self.top_k.clamp(1, CLASS_COUNT);
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/daypart/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("daypart")
        .join("config.yaml")
}

/// Load configuration from a YAML file.
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        log::info!("load_config: no config at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
            Ok(mut config) => {
                config.validate();
                log::info!("load_config: loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("load_config: failed to parse config: {}, using defaults", e);
                Config::default()
            }
        },
        Err(e) => {
            log::warn!("load_config: failed to read config file: {}, using defaults", e);
            Config::default()
        }
    }
}

/// Save configuration to a YAML file, creating parent directories as needed.
pub fn save_config(config: &Config, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, yaml)
}
