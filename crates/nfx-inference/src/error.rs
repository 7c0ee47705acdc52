//! Error types for the inference layer.

use thiserror::Error;

/// Errors that can occur when calling an inference backend.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// No API key was provided or found in the environment.
    #[error("missing API key: {0}")]
    MissingApiKey(String),

    /// Network-level failure talking to the provider.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The provider reply could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The provider produced no text at all.
    #[error("empty reply from model")]
    EmptyReply,
}
