//! Human-readable report of a single inference run

use crate::types::{ClassLabels, FeatureSample, Prediction};
use std::fmt;

const RULE_WIDTH: usize = 50;

/// Everything shown to the user after a run.
#[derive(Debug, Clone)]
pub struct InferenceReport {
    /// Feature names in model input order
    pub feature_names: Vec<String>,
    pub sample: FeatureSample,
    pub prediction: Prediction,
    pub labels: ClassLabels,
    /// Shapes of the raw model outputs, in graph order
    pub output_shapes: Vec<Vec<usize>>,
}

impl fmt::Display for InferenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "Feature names: {:?}", self.feature_names)?;
        writeln!(f, "Input sample: {}", self.sample)?;
        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "PREDICTION RESULTS")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Predicted State: {}", self.prediction.label)?;
        writeln!(f)?;
        writeln!(f, "Class Probabilities:")?;
        for (label, prob) in self.labels.iter().zip(&self.prediction.probabilities) {
            writeln!(f, "  {:<10}: {:.4} ({:.1}%)", label, prob, prob * 100.0)?;
        }
        writeln!(f)?;
        write!(f, "Raw output shapes: {:?}", self.output_shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProbabilitySource;

    fn report() -> InferenceReport {
        InferenceReport {
            feature_names: vec!["SDNN".to_string(), "HR_mean".to_string()],
            sample: FeatureSample::new().with("SDNN", 50.0).with("HR_mean", 70.6),
            prediction: Prediction {
                label: "Stressed".to_string(),
                class_index: 1,
                probabilities: vec![0.1, 0.7, 0.2],
                source: ProbabilitySource::Exported,
            },
            labels: ClassLabels::default(),
            output_shapes: vec![vec![1], vec![1, 3]],
        }
    }

    #[test]
    fn test_report_layout() {
        let text = report().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], r#"Feature names: ["SDNN", "HR_mean"]"#);
        assert_eq!(lines[1], "Input sample: {'SDNN': 50.0, 'HR_mean': 70.6}");
        assert_eq!(lines[3], "=".repeat(50));
        assert_eq!(lines[4], "PREDICTION RESULTS");
        assert_eq!(lines[6], "Predicted State: Stressed");
        assert_eq!(lines[8], "Class Probabilities:");
        assert_eq!(lines[9], "  Calm      : 0.1000 (10.0%)");
        assert_eq!(lines[10], "  Stressed  : 0.7000 (70.0%)");
        assert_eq!(lines[11], "  Amused    : 0.2000 (20.0%)");
        assert_eq!(lines[13], "Raw output shapes: [[1], [1, 3]]");
    }
}
