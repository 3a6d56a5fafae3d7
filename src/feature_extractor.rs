//! Feature vector assembly for model inference.
//!
//! Projects a named feature sample onto the column order declared in the
//! model's sidecar metadata. Values are reordered and cast, never rescaled:
//! any normalization is part of the exported model graph.

use crate::error::{InferenceError, Result};
use crate::types::{FeatureSample, FeatureVector, ModelMetadata};
use std::path::Path;
use tracing::{debug, warn};

/// Feature extractor that orders samples into model input vectors.
///
/// Built from the sidecar's `schema.input_names`, which is authoritative for
/// both the required feature set and the column order.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    feature_names: Vec<String>,
}

impl FeatureExtractor {
    /// Create an extractor for the given feature order.
    ///
    /// An empty feature list is rejected; `sidecar` is only used in the error.
    pub fn new(feature_names: Vec<String>, sidecar: &Path) -> Result<Self> {
        if feature_names.is_empty() {
            return Err(InferenceError::EmptySchema {
                path: sidecar.to_path_buf(),
            });
        }
        Ok(Self { feature_names })
    }

    /// Create an extractor from loaded sidecar metadata.
    pub fn from_metadata(metadata: &ModelMetadata, sidecar: &Path) -> Result<Self> {
        Self::new(metadata.input_names().to_vec(), sidecar)
    }

    /// Build the input vector for `sample`.
    ///
    /// Every declared feature must be present; extra sample keys are ignored.
    pub fn extract(&self, sample: &FeatureSample) -> Result<FeatureVector> {
        let mut features = Vec::with_capacity(self.feature_names.len());

        for name in &self.feature_names {
            let value = sample
                .get(name)
                .ok_or_else(|| InferenceError::MissingFeature {
                    name: name.clone(),
                    required: self.feature_names.clone(),
                })?;

            if !value.is_finite() {
                warn!(feature = %name, value = value, "Non-finite feature value");
            }

            features.push(value as f32);
        }

        let ignored = sample.len().saturating_sub(features.len());
        debug!(
            features = features.len(),
            ignored = ignored,
            "Feature vector assembled"
        );

        Ok(FeatureVector::from(features))
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Get feature names in model input order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
