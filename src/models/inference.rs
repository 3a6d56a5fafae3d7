//! Single forward pass through the model and capture of its raw outputs

use crate::error::{InferenceError, Result};
use crate::models::loader::LoadedModel;
use crate::types::FeatureVector;
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue, Tensor};
use std::collections::BTreeMap;
use tracing::debug;

/// Values held by one model output.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputData {
    /// `tensor(float)`, e.g. probabilities or raw scores
    Float(Vec<f32>),
    /// `tensor(int64)`, e.g. the predicted label
    Int(Vec<i64>),
    /// `seq(map(int64, float))`, one class → probability map per row
    ClassMaps(Vec<BTreeMap<i64, f32>>),
}

/// One model output copied out of the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutput {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: OutputData,
}

impl RawOutput {
    pub fn new(name: impl Into<String>, shape: Vec<usize>, data: OutputData) -> Self {
        Self {
            name: name.into(),
            shape,
            data,
        }
    }

    /// The first row of a float or class-map output.
    ///
    /// For tensors the row width is the last dimension. Class maps are
    /// densified in class id order and must cover ids `0..n`.
    pub fn first_row(&self) -> Result<Vec<f32>> {
        match &self.data {
            OutputData::Float(values) => {
                let width = match self.shape.as_slice() {
                    [_, .., last] => *last,
                    _ => values.len(),
                };
                if width == 0 || values.len() < width {
                    return Err(InferenceError::MalformedOutput(format!(
                        "output '{}' with shape {:?} holds {} values",
                        self.name,
                        self.shape,
                        values.len()
                    )));
                }
                Ok(values[..width].to_vec())
            }
            OutputData::ClassMaps(rows) => {
                let row = rows.first().ok_or_else(|| {
                    InferenceError::MalformedOutput(format!("output '{}' is an empty sequence", self.name))
                })?;
                let contiguous = row.keys().copied().eq(0..row.len() as i64);
                if row.is_empty() || !contiguous {
                    return Err(InferenceError::MalformedOutput(format!(
                        "output '{}' has class ids {:?}, expected 0..{}",
                        self.name,
                        row.keys().collect::<Vec<_>>(),
                        row.len()
                    )));
                }
                Ok(row.values().copied().collect())
            }
            OutputData::Int(_) => Err(InferenceError::MalformedOutput(format!(
                "output '{}' is an integer tensor, not class scores",
                self.name
            ))),
        }
    }

    /// First element of an integer output.
    fn first_int(&self) -> Option<i64> {
        match &self.data {
            OutputData::Int(values) => values.first().copied(),
            _ => None,
        }
    }
}

/// Model output layout, resolved once after the forward pass.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutput {
    /// Tree-ensemble exporters: a label output followed by a probability output
    LabelAndProbabilities {
        /// Class id reported by the label output, when it is an integer tensor
        label: Option<i64>,
        probabilities: Vec<f32>,
    },
    /// A single output of unnormalized class scores
    RawScores { scores: Vec<f32> },
}

impl EngineOutput {
    /// Classify the outputs of one forward pass.
    ///
    /// Two or more outputs: the second is the probability row. One output:
    /// raw scores. Only the first row is used (batch size 1).
    pub fn from_outputs(outputs: &[RawOutput]) -> Result<Self> {
        match outputs {
            [] => Err(InferenceError::MalformedOutput(
                "model produced no outputs".to_string(),
            )),
            [scores] => Ok(EngineOutput::RawScores {
                scores: scores.first_row()?,
            }),
            [label, probabilities, ..] => Ok(EngineOutput::LabelAndProbabilities {
                label: label.first_int(),
                probabilities: probabilities.first_row()?,
            }),
        }
    }
}

/// Anything that can run one forward pass over a feature vector.
pub trait InferenceBackend {
    /// Run the model on a single `[1, N]` input and return its outputs in
    /// graph order.
    fn run(&mut self, features: &FeatureVector) -> Result<Vec<RawOutput>>;
}

impl InferenceBackend for LoadedModel {
    fn run(&mut self, features: &FeatureVector) -> Result<Vec<RawOutput>> {
        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.as_slice().to_vec()))
            .map_err(InferenceError::engine("create input tensor"))?;

        let outputs = self
            .session
            .run(ort::inputs![&self.input_name => input_tensor])
            .map_err(InferenceError::engine("run forward pass"))?;

        let mut raw = Vec::with_capacity(self.output_names.len());
        for name in &self.output_names {
            let value = outputs.get(name.as_str()).ok_or_else(|| {
                InferenceError::MalformedOutput(format!("output '{}' missing from run results", name))
            })?;
            raw.push(extract_output(name, value)?);
        }

        debug!(
            outputs = raw.len(),
            shapes = ?raw.iter().map(|o| &o.shape).collect::<Vec<_>>(),
            "Forward pass complete"
        );

        Ok(raw)
    }
}

/// Copy one runtime value into a [`RawOutput`].
///
/// Handles float and int64 tensors, and the seq(map(int64, float)) layout
/// emitted by classifiers exported with ZipMap.
fn extract_output(name: &str, value: &DynValue) -> Result<RawOutput> {
    if let Ok((shape, data)) = value.try_extract_tensor::<f32>() {
        return Ok(RawOutput::new(name, dims(shape), OutputData::Float(data.to_vec())));
    }

    if let Ok((shape, data)) = value.try_extract_tensor::<i64>() {
        return Ok(RawOutput::new(name, dims(shape), OutputData::Int(data.to_vec())));
    }

    let dtype = value.dtype();
    if DynSequenceValueType::can_downcast(&dtype) {
        let rows = extract_class_maps(value)?;
        return Ok(RawOutput::new(name, vec![rows.len()], OutputData::ClassMaps(rows)));
    }

    Err(InferenceError::MalformedOutput(format!(
        "output '{}' has unsupported type {:?}",
        name, dtype
    )))
}

/// Extract every map of a seq(map(int64, float)) output.
fn extract_class_maps(value: &DynValue) -> Result<Vec<BTreeMap<i64, f32>>> {
    let allocator = Allocator::default();

    let sequence = value
        .downcast_ref::<DynSequenceValueType>()
        .map_err(InferenceError::engine("downcast sequence"))?;

    let maps = sequence
        .try_extract_sequence::<DynMapValueType>(&allocator)
        .map_err(InferenceError::engine("extract sequence"))?;

    let mut rows = Vec::with_capacity(maps.len());
    for map in &maps {
        let pairs = map
            .try_extract_key_values::<i64, f32>()
            .map_err(InferenceError::engine("extract class map"))?;
        rows.push(pairs.into_iter().collect());
    }

    Ok(rows)
}

fn dims(shape: &ort::tensor::Shape) -> Vec<usize> {
    shape.iter().map(|&d| d.max(0) as usize).collect()
}
