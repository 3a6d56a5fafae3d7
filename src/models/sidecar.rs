//! Sidecar metadata loader

use crate::error::{FileKind, InferenceError, Result};
use crate::types::ModelMetadata;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Read and parse the JSON sidecar at `path`.
pub fn load_sidecar<P: AsRef<Path>>(path: P) -> Result<ModelMetadata> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading sidecar metadata");

    let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InferenceError::FileNotFound {
            kind: FileKind::Sidecar,
            path: path.to_path_buf(),
        },
        _ => InferenceError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let metadata: ModelMetadata =
        serde_json::from_str(&contents).map_err(|source| InferenceError::Parse {
            kind: FileKind::Sidecar,
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        path = %path.display(),
        model = metadata.model_name().unwrap_or("unnamed"),
        version = ?metadata.version(),
        features = ?metadata.input_names(),
        outputs = ?metadata.schema.output_names,
        "Sidecar metadata loaded"
    );

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sidecar(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("model.meta.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sidecar(
            &dir,
            r#"{"schema":{"input_names":["SDNN","RMSSD","pNN50","Mean_RR","HR_mean"]}}"#,
        );

        let meta = load_sidecar(&path).unwrap();
        assert_eq!(
            meta.input_names(),
            ["SDNN", "RMSSD", "pNN50", "Mean_RR", "HR_mean"]
        );
    }

    #[test]
    fn test_missing_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_sidecar(dir.path().join("absent.meta.json")).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::FileNotFound {
                kind: FileKind::Sidecar,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sidecar(&dir, r#"{"schema": {"input_names": ["SDNN",]}"#);

        let err = load_sidecar(&path).unwrap_err();
        assert!(matches!(err, InferenceError::Parse { .. }));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sidecar(
            &dir,
            r#"{"framework": "sklearn", "schema": {"input_names": ["SDNN"], "opset": 15}}"#,
        );

        let meta = load_sidecar(&path).unwrap();
        assert_eq!(meta.input_names(), ["SDNN"]);
    }
}
