//! Sidecar metadata shipped next to an exported model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contents of the `<model>.meta.json` sidecar.
///
/// Only `schema.input_names` is required by the runner. Any other top-level
/// fields are kept in `extra` so they can be surfaced in logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Input/output description of the exported graph
    #[serde(default)]
    pub schema: ModelSchema,

    /// Fields the runner does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `schema` block of the sidecar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Feature names in the exact column order of the model input tensor
    #[serde(default)]
    pub input_names: Vec<String>,

    /// Output names as recorded by the exporter (informational)
    #[serde(default)]
    pub output_names: Vec<String>,
}

impl ModelMetadata {
    /// Ordered feature names expected by the model.
    pub fn input_names(&self) -> &[String] {
        &self.schema.input_names
    }

    /// Model name recorded by the exporter, if any.
    pub fn model_name(&self) -> Option<&str> {
        self.extra.get("model_name").and_then(Value::as_str)
    }

    /// Exporter version, which may be a string or a number.
    pub fn version(&self) -> Option<&Value> {
        self.extra.get("version")
    }
}
