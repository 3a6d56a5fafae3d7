//! Class label ordering baked into the model at training time

use crate::error::{InferenceError, Result};
use std::collections::HashSet;

/// Labels indexed by the model's class id.
///
/// The mapping cannot be recovered from the model or the sidecar, so it is
/// supplied by the caller. Labels are non-empty and unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabels(Vec<String>);

impl ClassLabels {
    /// Validate and wrap a label list.
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.is_empty() {
            return Err(InferenceError::InvalidConfig(
                "class label list is empty".to_string(),
            ));
        }

        {
            let mut seen = HashSet::new();
            if let Some(duplicate) = labels.iter().find(|l| !seen.insert(l.as_str())) {
                return Err(InferenceError::InvalidConfig(format!(
                    "duplicate class label '{}'",
                    duplicate
                )));
            }
        }

        Ok(Self(labels))
    }

    /// Label for a class index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ClassLabels {
    fn default() -> Self {
        Self(vec![
            "Calm".to_string(),
            "Stressed".to_string(),
            "Amused".to_string(),
        ])
    }
}
