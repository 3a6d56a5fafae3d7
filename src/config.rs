//! Configuration management for the inference runner

use crate::error::{InferenceError, Result as InferenceResult};
use crate::types::ClassLabels;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Prefix for environment overrides, e.g. `SWIP__MODEL__MODEL_DIR`
pub const ENV_PREFIX: &str = "SWIP";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub labels: LabelsConfig,
    #[serde(default)]
    pub sample: SampleConfig,
    pub logging: LoggingConfig,
}

/// Model file locations and engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory containing the model and its sidecar
    pub model_dir: PathBuf,
    /// ONNX model file name
    pub model_file: String,
    /// Sidecar metadata file name
    pub meta_file: String,
    /// Number of intra-op threads for ONNX Runtime (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

/// Class label ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Labels in model class-index order; must be non-empty and unique
    pub classes: Vec<String>,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            classes: ClassLabels::default().iter().map(str::to_string).collect(),
        }
    }
}

/// Where the feature sample comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleConfig {
    /// JSON object of `name: value` pairs; the built-in sample is used when unset
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl ModelConfig {
    /// Full path of the ONNX model.
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    /// Full path of the sidecar metadata.
    pub fn meta_path(&self) -> PathBuf {
        self.model_dir.join(&self.meta_file)
    }
}

impl AppConfig {
    /// Load configuration from the default file and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path.
    ///
    /// Built-in defaults are overridden by the file (if present) and then by
    /// `SWIP__*` environment variables.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialize default configuration")?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validated class labels.
    pub fn class_labels(&self) -> InferenceResult<ClassLabels> {
        ClassLabels::new(self.labels.classes.iter().map(String::as_str))
    }

    /// Check settings that cannot be expressed in the type system.
    pub fn validate(&self) -> InferenceResult<()> {
        if self.model.onnx_threads == 0 {
            return Err(InferenceError::InvalidConfig(
                "model.onnx_threads must be at least 1".to_string(),
            ));
        }
        if self.model.model_file.is_empty() || self.model.meta_file.is_empty() {
            return Err(InferenceError::InvalidConfig(
                "model.model_file and model.meta_file must be set".to_string(),
            ));
        }
        self.class_labels()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                model_dir: PathBuf::from("models"),
                model_file: "extratrees_wrist_all_v1_0.onnx".to_string(),
                meta_file: "extratrees_wrist_all_v1_0.meta.json".to_string(),
                onnx_threads: default_onnx_threads(),
            },
            labels: LabelsConfig::default(),
            sample: SampleConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
