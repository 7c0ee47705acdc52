//! Inference backend implementations.

pub mod gemini;
pub mod mock;

use crate::{InferenceRequest, Result};

/// Trait for generative inference backends.
///
/// A backend receives a complete instruction payload plus document content
/// and returns the model's raw textual reply. One request maps to exactly
/// one provider call; retry policy, if any, lives inside the backend.
pub trait InferenceBackend: Send + Sync {
    /// Run a single inference call and return the raw reply text.
    fn infer(&self, request: &InferenceRequest) -> impl Future<Output = Result<String>> + Send;

    /// Name of the underlying model, for metadata and logging.
    fn model_name(&self) -> &str;
}
