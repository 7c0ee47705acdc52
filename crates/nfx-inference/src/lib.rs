//! Inference backend abstraction for nfx.
//!
//! This crate defines the boundary between the extraction core and the
//! external generative inference provider:
//! - `InferenceRequest` / `RequestPart`: the instruction payload plus
//!   document content (raw text or an inline binary blob)
//! - `InferenceBackend`: the single-shot `infer` contract
//! - `GeminiBackend`: Google Generative Language API over HTTP
//! - `MockBackend`: deterministic replies for testing

mod backend;
mod error;
mod request;

pub use backend::InferenceBackend;
pub use backend::gemini::GeminiBackend;
pub use backend::mock::MockBackend;
pub use error::InferenceError;
pub use request::{InferenceRequest, RequestPart};

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
