//! Application configuration
//!
//! Settings are stored in TOML. Every field has a default, so a partial file
//! (or no file at all) is valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};

use crate::detection::preprocessing::ThresholdMode;

/// Environment variable overriding the OCR model directory
pub const MODEL_DIR_ENV: &str = "PHONEGRAB_MODEL_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ocr: OcrConfig,
    pub preprocess: PreprocessConfig,
}

/// Which OCR engine to drive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackend {
    #[default]
    Ocrs,
    Tesseract,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub backend: OcrBackend,
    /// Directory holding the `ocrs` models
    pub model_dir: PathBuf,
    pub detection_model: String,
    pub recognition_model: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackend::default(),
            model_dir: default_model_dir(),
            detection_model: "text-detection.rten".to_string(),
            recognition_model: "text-recognition.rten".to_string(),
        }
    }
}

impl OcrConfig {
    pub fn detection_model_path(&self) -> PathBuf {
        self.model_dir.join(&self.detection_model)
    }

    pub fn recognition_model_path(&self) -> PathBuf {
        self.model_dir.join(&self.recognition_model)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub threshold: ThresholdMode,
}

/// `~/.cache/ocrs`, where `ocrs-cli` downloads its models
fn default_model_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".cache").join("ocrs"))
        .unwrap_or_else(|| PathBuf::from(".cache").join("ocrs"))
}

/// Platform config file location (e.g. `~/.config/phonegrab/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "phonegrab").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AppConfig {
    /// Load configuration from an explicit file, the platform default file
    /// if it exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => load_config(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => load_config(&path)?,
                _ => AppConfig::default(),
            },
        };
        config.apply_model_dir_override(std::env::var_os(MODEL_DIR_ENV).map(PathBuf::from));
        Ok(config)
    }

    pub fn apply_model_dir_override(&mut self, dir: Option<PathBuf>) {
        if let Some(dir) = dir {
            self.ocr.model_dir = dir;
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
