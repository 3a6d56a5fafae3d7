//! Wrist-Sensor State Inference - Main Entry Point
//!
//! Loads the exported ExtraTrees model and its sidecar, runs one sample
//! through it and prints the predicted state.

use anyhow::Result;
use std::process::ExitCode;
use swip_inference::{
    config::LoggingConfig, AppConfig, FeatureSample, InferenceError, InferenceRunner,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<InferenceError>()
                .map(InferenceError::exit_code)
                .unwrap_or(1);
            error!(error = %format!("{:#}", e), exit_code = code, "Inference failed");
            eprintln!("error: {:#}", e);
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<()> {
    // Logging is initialized from defaults first so config errors are visible.
    let config = match AppConfig::load() {
        Ok(config) => {
            init_logging(&config.logging)?;
            config
        }
        Err(e) => {
            init_logging(&AppConfig::default().logging)?;
            return Err(e);
        }
    };

    info!(
        model = %config.model.model_path().display(),
        sidecar = %config.model.meta_path().display(),
        labels = ?config.labels.classes,
        sample = ?config.sample.file,
        "Configuration loaded successfully"
    );

    let mut runner = InferenceRunner::from_config(&config)?;
    let sample = match &config.sample.file {
        Some(path) => FeatureSample::from_json_file(path)?,
        None => wrist_sample(),
    };
    let report = runner.run(&sample)?;

    println!("{}", report);
    Ok(())
}

/// Heart-rate-variability features for one wrist recording window.
fn wrist_sample() -> FeatureSample {
    FeatureSample::new()
        .with("SDNN", 50.0) // ms
        .with("RMSSD", 30.0) // ms
        .with("pNN50", 15.0) // %
        .with("Mean_RR", 850.0) // ms
        .with("HR_mean", 70.6) // bpm
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("swip_inference={}", logging.level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
