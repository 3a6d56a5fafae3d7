use swip_inference::error::FileKind;
use swip_inference::{
    AppConfig, ClassLabels, FeatureSample, FeatureVector, InferenceBackend, InferenceError, InferenceRunner,
    OutputData, RawOutput,
};
use swip_inference::types::ProbabilitySource;

const WRIST_SIDECAR: &str =
    r#"{"schema":{"input_names":["SDNN","RMSSD","pNN50","Mean_RR","HR_mean"]}}"#;

/// Backend that records its input and replays fixed outputs.
struct ScriptedBackend {
    outputs: Vec<RawOutput>,
    seen: Vec<Vec<f32>>,
}

impl ScriptedBackend {
    fn new(outputs: Vec<RawOutput>) -> Self {
        Self {
            outputs,
            seen: Vec::new(),
        }
    }
}

impl InferenceBackend for &mut ScriptedBackend {
    fn run(&mut self, features: &FeatureVector) -> swip_inference::Result<Vec<RawOutput>> {
        self.seen.push(features.as_slice().to_vec());
        Ok(self.outputs.clone())
    }
}

fn label_and_probabilities(probs: Vec<f32>) -> Vec<RawOutput> {
    vec![
        RawOutput::new("label", vec![1], OutputData::Int(vec![1])),
        RawOutput::new("probabilities", vec![1, probs.len()], OutputData::Float(probs)),
    ]
}

fn wrist_sample() -> FeatureSample {
    FeatureSample::new()
        .with("SDNN", 50.0)
        .with("RMSSD", 30.0)
        .with("pNN50", 15.0)
        .with("Mean_RR", 850.0)
        .with("HR_mean", 70.6)
}

fn sidecar(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tmpdir");
    let path = dir.path().join("extratrees_wrist_all_v1_0.meta.json");
    std::fs::write(&path, contents).expect("write sidecar");
    (dir, path)
}

#[test]
fn exported_probabilities_end_to_end() {
    let (_dir, meta) = sidecar(WRIST_SIDECAR);
    let mut backend = ScriptedBackend::new(label_and_probabilities(vec![0.1, 0.7, 0.2]));

    let report = InferenceRunner::new(&mut backend, &meta, ClassLabels::default())
        .run(&wrist_sample())
        .expect("run");

    assert_eq!(report.prediction.label, "Stressed");
    assert_eq!(report.prediction.probabilities, vec![0.1, 0.7, 0.2]);
    assert_eq!(report.prediction.source, ProbabilitySource::Exported);
    assert_eq!(report.output_shapes, vec![vec![1], vec![1, 3]]);
    assert_eq!(report.feature_names, ["SDNN", "RMSSD", "pNN50", "Mean_RR", "HR_mean"]);
    assert_eq!(backend.seen, vec![vec![50.0, 30.0, 15.0, 850.0, 70.6_f32]]);

    let text = report.to_string();
    assert!(text.contains("Predicted State: Stressed"));
    assert!(text.contains("  Stressed  : 0.7000 (70.0%)"));
}

#[test]
fn raw_scores_end_to_end() {
    let (_dir, meta) = sidecar(WRIST_SIDECAR);
    let mut backend = ScriptedBackend::new(vec![RawOutput::new(
        "scores",
        vec![1, 3],
        OutputData::Float(vec![1.0, 3.0, 2.0]),
    )]);

    let report = InferenceRunner::new(&mut backend, &meta, ClassLabels::default())
        .run(&wrist_sample())
        .expect("run");

    assert_eq!(report.prediction.label, "Stressed");
    assert_eq!(report.prediction.source, ProbabilitySource::Softmax);
    let expected = [0.0900_f32, 0.6652, 0.2447];
    for (p, e) in report.prediction.probabilities.iter().zip(expected) {
        approx::assert_abs_diff_eq!(*p, e, epsilon = 1e-4);
    }
}

#[test]
fn missing_feature_stops_before_inference() {
    let (_dir, meta) = sidecar(WRIST_SIDECAR);
    let mut backend = ScriptedBackend::new(label_and_probabilities(vec![0.1, 0.7, 0.2]));
    let sample: FeatureSample = wrist_sample()
        .iter()
        .filter(|(name, _)| *name != "HR_mean")
        .collect();

    let err = InferenceRunner::new(&mut backend, &meta, ClassLabels::default())
        .run(&sample)
        .unwrap_err();

    match err {
        InferenceError::MissingFeature { name, .. } => assert_eq!(name, "HR_mean"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(backend.seen.is_empty());
}

#[test]
fn missing_sidecar_is_file_not_found() {
    let dir = tempfile::tempdir().expect("tmpdir");
    let mut backend = ScriptedBackend::new(Vec::new());

    let err = InferenceRunner::new(
        &mut backend,
        dir.path().join("absent.meta.json"),
        ClassLabels::default(),
    )
    .run(&wrist_sample())
    .unwrap_err();

    assert!(matches!(err, InferenceError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn empty_schema_is_rejected() {
    let (_dir, meta) = sidecar(r#"{"schema":{"input_names":[]}}"#);
    let mut backend = ScriptedBackend::new(Vec::new());

    let err = InferenceRunner::new(&mut backend, &meta, ClassLabels::default())
        .run(&wrist_sample())
        .unwrap_err();

    assert!(matches!(err, InferenceError::EmptySchema { .. }));
    assert!(backend.seen.is_empty());
}

#[test]
fn label_count_mismatch_is_reported() {
    let (_dir, meta) = sidecar(WRIST_SIDECAR);
    let mut backend = ScriptedBackend::new(label_and_probabilities(vec![0.3, 0.7]));

    let err = InferenceRunner::new(&mut backend, &meta, ClassLabels::default())
        .run(&wrist_sample())
        .unwrap_err();

    assert!(matches!(
        err,
        InferenceError::LabelMismatch {
            columns: 2,
            labels: 3
        }
    ));
}

fn config_in(dir: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.model.model_dir = dir.to_path_buf();
    config
}

#[test]
fn from_config_checks_sidecar_before_model() {
    let dir = tempfile::tempdir().expect("tmpdir");

    let err = InferenceRunner::from_config(&config_in(dir.path()))
        .err()
        .expect("nothing to load");

    assert!(matches!(
        err,
        InferenceError::FileNotFound {
            kind: FileKind::Sidecar,
            ..
        }
    ));
}

#[test]
fn from_config_rejects_empty_schema_without_model() {
    let dir = tempfile::tempdir().expect("tmpdir");
    let config = config_in(dir.path());
    std::fs::write(config.model.meta_path(), r#"{"schema":{"input_names":[]}}"#)
        .expect("write sidecar");

    let err = InferenceRunner::from_config(&config)
        .err()
        .expect("schema is empty");

    assert!(matches!(err, InferenceError::EmptySchema { .. }));
    assert_eq!(err.exit_code(), 6);
}
