//! End-to-end inference for a single feature sample

use crate::config::AppConfig;
use crate::error::Result;
use crate::feature_extractor::FeatureExtractor;
use crate::models::{
    load_sidecar, EngineOutput, InferenceBackend, LoadedModel, ModelLoader, ResultInterpreter,
};
use crate::report::InferenceReport;
use crate::types::{ClassLabels, FeatureSample};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Runs one sample through sidecar validation, the model and label mapping.
pub struct InferenceRunner<B> {
    backend: B,
    meta_path: PathBuf,
    interpreter: ResultInterpreter,
}

impl InferenceRunner<LoadedModel> {
    /// Load the ONNX model named in the configuration.
    ///
    /// The sidecar is checked first so a missing or schema-less sidecar is
    /// reported even when the model file is also absent. A missing model fails
    /// with `FileNotFound` before the runtime is touched.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let labels = config.class_labels()?;
        let meta_path = config.model.meta_path();

        let metadata = load_sidecar(&meta_path)?;
        let extractor = FeatureExtractor::from_metadata(&metadata, &meta_path)?;
        info!(features = extractor.feature_count(), "Sidecar schema accepted");

        let loader = ModelLoader::with_threads(config.model.onnx_threads)?;
        let model = loader.load_model(config.model.model_path())?;

        Ok(Self::new(model, meta_path, labels))
    }
}

impl<B: InferenceBackend> InferenceRunner<B> {
    pub fn new(backend: B, meta_path: impl Into<PathBuf>, labels: ClassLabels) -> Self {
        Self {
            backend,
            meta_path: meta_path.into(),
            interpreter: ResultInterpreter::new(labels),
        }
    }

    /// Predict the class of `sample`.
    ///
    /// The sidecar is re-read on every call; nothing is cached between runs.
    pub fn run(&mut self, sample: &FeatureSample) -> Result<InferenceReport> {
        let start_time = Instant::now();

        let metadata = load_sidecar(&self.meta_path)?;
        let extractor = FeatureExtractor::from_metadata(&metadata, &self.meta_path)?;
        let features = extractor.extract(sample)?;

        let outputs = self.backend.run(&features)?;
        let engine_output = EngineOutput::from_outputs(&outputs)?;
        let prediction = self.interpreter.interpret(&engine_output)?;

        info!(
            label = %prediction.label,
            confidence = prediction.confidence(),
            processing_time_us = start_time.elapsed().as_micros() as u64,
            "Inference complete"
        );

        Ok(InferenceReport {
            feature_names: extractor.feature_names().to_vec(),
            sample: sample.clone(),
            prediction,
            labels: self.interpreter.labels().clone(),
            output_shapes: outputs.into_iter().map(|o| o.shape).collect(),
        })
    }
}
