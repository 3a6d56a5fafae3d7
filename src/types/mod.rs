//! Type definitions for the inference runner

pub mod labels;
pub mod metadata;
pub mod prediction;
pub mod sample;

pub use labels::ClassLabels;
pub use metadata::{ModelMetadata, ModelSchema};
pub use prediction::{Prediction, ProbabilitySource};
pub use sample::{FeatureSample, FeatureVector};
