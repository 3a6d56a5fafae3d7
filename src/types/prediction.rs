//! Prediction produced from a single forward pass

/// Where the probability row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilitySource {
    /// Read directly from the exporter's probability output
    Exported,
    /// Soft-max applied to a single raw score output
    Softmax,
}

/// Predicted class with the full probability row.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Label of the most probable class
    pub label: String,
    /// Index of the most probable class
    pub class_index: usize,
    /// One probability per class, in class index order
    pub probabilities: Vec<f32>,
    pub source: ProbabilitySource,
}

impl Prediction {
    /// Probability of the predicted class.
    pub fn confidence(&self) -> f32 {
        self.probabilities
            .get(self.class_index)
            .copied()
            .unwrap_or(0.0)
    }
}
