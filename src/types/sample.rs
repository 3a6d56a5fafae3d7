//! Feature samples and the ordered vectors built from them

use crate::error::{FileKind, InferenceError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

/// Named scalar features supplied by the caller.
///
/// Entries keep the order they were written in, which is only used for
/// display; the model's column order comes from the sidecar metadata.
/// Setting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSample(Vec<(String, f64)>);

impl FeatureSample {
    /// Create an empty sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a sample from a JSON object of `name: value` pairs.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InferenceError::FileNotFound {
                kind: FileKind::Sample,
                path: path.to_path_buf(),
            },
            _ => InferenceError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        serde_json::from_str(&contents).map_err(|source| InferenceError::Parse {
            kind: FileKind::Sample,
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set a feature value, returning the sample for chaining.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a feature value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Look up a feature value by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureSample {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut sample = Self::new();
        for (name, value) in iter {
            sample.insert(name, value);
        }
        sample
    }
}

impl fmt::Display for FeatureSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {:?}", name, value)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for FeatureSample {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct FeatureSampleVisitor;

impl<'de> Visitor<'de> for FeatureSampleVisitor {
    type Value = FeatureSample;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map of feature names to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut sample = FeatureSample::new();
        while let Some((name, value)) = access.next_entry::<String, f64>()? {
            sample.insert(name, value);
        }
        Ok(sample)
    }
}

impl<'de> Deserialize<'de> for FeatureSample {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(FeatureSampleVisitor)
    }
}

/// Feature values in model input order, ready to be fed as a `[1, N]` tensor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}
