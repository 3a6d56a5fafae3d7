//! ONNX model loader

use crate::error::{FileKind, InferenceError, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::info;

/// Input name used by skl2onnx when the graph does not declare one
const DEFAULT_INPUT_NAME: &str = "float_input";

/// Loaded ONNX model with its I/O names
pub struct LoadedModel {
    /// ONNX Runtime session
    pub session: Session,
    /// Name of the feature input tensor
    pub input_name: String,
    /// Output names in graph order
    pub output_names: Vec<String>,
}

/// Loader for ONNX models
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self> {
        ort::init()
            .commit()
            .map_err(InferenceError::engine("initialize runtime"))?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load an ONNX model from file
    pub fn load_model<P: AsRef<Path>>(&self, path: P) -> Result<LoadedModel> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InferenceError::FileNotFound {
                kind: FileKind::Model,
                path: path.to_path_buf(),
            });
        }

        info!(path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()
            .map_err(InferenceError::engine("create session builder"))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(InferenceError::engine("set optimization level"))?
            .with_intra_threads(self.onnx_threads)
            .map_err(InferenceError::engine("set intra-op threads"))?
            .commit_from_file(path)
            .map_err(InferenceError::engine("load model"))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| DEFAULT_INPUT_NAME.to_string());

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

        info!(
            input = %input_name,
            outputs = ?output_names,
            "Model loaded successfully"
        );

        Ok(LoadedModel {
            session,
            input_name,
            output_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ModelLoader { onnx_threads: 1 };

        let err = loader
            .load_model(dir.path().join("absent.onnx"))
            .err()
            .unwrap();

        assert!(matches!(
            err,
            InferenceError::FileNotFound {
                kind: FileKind::Model,
                ..
            }
        ));
    }
}
