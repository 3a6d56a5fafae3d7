//! Error types for the inference runner
//!
//! Every failure is fatal to the run. Each variant maps to its own process
//! exit code so callers can tell the kinds apart without parsing messages.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two input files a [`InferenceError::FileNotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// The ONNX model
    Model,
    /// The JSON sidecar describing the model inputs
    Sidecar,
    /// A JSON feature sample
    Sample,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Model => write!(f, "ONNX model"),
            FileKind::Sidecar => write!(f, "sidecar metadata"),
            FileKind::Sample => write!(f, "feature sample"),
        }
    }
}

/// Errors raised while loading, assembling, running or interpreting a model.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{kind} not found: {}", path.display())]
    FileNotFound { kind: FileKind, path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind} {}: {source}", path.display())]
    Parse {
        kind: FileKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sidecar {} declares no schema.input_names", path.display())]
    EmptySchema { path: PathBuf },

    #[error("missing feature '{name}'. Need: {required:?}")]
    MissingFeature { name: String, required: Vec<String> },

    #[error("inference engine error ({context}): {message}")]
    Engine {
        context: &'static str,
        message: String,
    },

    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    #[error("model produced {columns} class columns but {labels} labels are configured")]
    LabelMismatch { columns: usize, labels: usize },
}

impl InferenceError {
    /// Wrap an engine error with the step that produced it.
    pub(crate) fn engine<E: fmt::Display>(context: &'static str) -> impl FnOnce(E) -> Self {
        move |e| InferenceError::Engine {
            context,
            message: e.to_string(),
        }
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            InferenceError::InvalidConfig(_) => 2,
            InferenceError::FileNotFound { .. } => 3,
            InferenceError::Io { .. } => 4,
            InferenceError::Parse { .. } => 5,
            InferenceError::EmptySchema { .. } => 6,
            InferenceError::MissingFeature { .. } => 7,
            InferenceError::Engine { .. } => 8,
            InferenceError::MalformedOutput(_) => 9,
            InferenceError::LabelMismatch { .. } => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, InferenceError>;
