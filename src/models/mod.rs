//! ML model loading, inference and output interpretation

pub mod inference;
pub mod interpreter;
pub mod loader;
pub mod sidecar;

pub use inference::{EngineOutput, InferenceBackend, OutputData, RawOutput};
pub use interpreter::ResultInterpreter;
pub use loader::{LoadedModel, ModelLoader};
pub use sidecar::load_sidecar;
