//! Turns resolved model outputs into a labelled prediction

use crate::error::{InferenceError, Result};
use crate::models::inference::EngineOutput;
use crate::types::{ClassLabels, Prediction, ProbabilitySource};
use tracing::{debug, warn};

/// Soft-max over a slice.
///
/// The maximum is subtracted before exponentiating so large scores do not
/// overflow.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }

    let max_val = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let mut values: Vec<f32> = scores.iter().map(|&s| (s - max_val).exp()).collect();
    let sum: f32 = values.iter().sum();

    if sum > 0.0 {
        for val in values.iter_mut() {
            *val /= sum;
        }
    }

    values
}

/// Index of the largest value.
///
/// Ties go to the first occurrence. NaN never wins; `None` if no value is
/// comparable.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &val) in values.iter().enumerate() {
        if val.is_nan() {
            continue;
        }
        match best {
            Some((_, best_val)) if val <= best_val => {}
            _ => best = Some((idx, val)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Maps engine outputs onto the configured class labels.
pub struct ResultInterpreter {
    labels: ClassLabels,
}

impl ResultInterpreter {
    pub fn new(labels: ClassLabels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// Derive the predicted label and probability row.
    pub fn interpret(&self, output: &EngineOutput) -> Result<Prediction> {
        let (probabilities, source) = match output {
            EngineOutput::LabelAndProbabilities { probabilities, .. } => {
                (probabilities.clone(), ProbabilitySource::Exported)
            }
            EngineOutput::RawScores { scores } => {
                if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
                    return Err(InferenceError::MalformedOutput(format!(
                        "raw score {} in {:?} is not finite",
                        bad, scores
                    )));
                }
                (softmax(scores), ProbabilitySource::Softmax)
            }
        };

        if probabilities.len() != self.labels.len() {
            return Err(InferenceError::LabelMismatch {
                columns: probabilities.len(),
                labels: self.labels.len(),
            });
        }

        let class_index = argmax(&probabilities).ok_or_else(|| {
            InferenceError::MalformedOutput(format!(
                "probability row {:?} has no comparable values",
                probabilities
            ))
        })?;

        // Length was checked against the label count above.
        let label = self.labels.get(class_index).unwrap_or_default().to_string();

        if let EngineOutput::LabelAndProbabilities {
            label: Some(exported),
            ..
        } = output
        {
            if *exported != class_index as i64 {
                warn!(
                    exported_class = *exported,
                    argmax_class = class_index,
                    "Model label output disagrees with probability arg-max"
                );
            }
        }

        debug!(
            label = %label,
            class_index = class_index,
            source = ?source,
            "Prediction derived"
        );

        Ok(Prediction {
            label,
            class_index,
            probabilities,
            source,
        })
    }
}
