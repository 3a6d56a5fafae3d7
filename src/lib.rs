//! Wrist-Sensor State Inference Library
//!
//! Runs an exported tree-ensemble classifier (ONNX) on a single sample of
//! heart-rate-variability features and reports the predicted affective state
//! ("Calm", "Stressed", "Amused") with class probabilities.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod models;
pub mod report;
pub mod runner;
pub mod types;

pub use config::AppConfig;
pub use error::{InferenceError, Result};
pub use feature_extractor::FeatureExtractor;
pub use models::inference::{EngineOutput, InferenceBackend, OutputData, RawOutput};
pub use report::InferenceReport;
pub use runner::InferenceRunner;
pub use types::{ClassLabels, FeatureSample, FeatureVector, ModelMetadata, Prediction};
