//! Error types for the nfx-core library.

use thiserror::Error;

/// Main error type for the nfx library.
#[derive(Error, Debug)]
pub enum NfxError {
    /// Request construction error.
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// Response parsing/validation error.
    #[error("response error: {0}")]
    Response(#[from] ResponseError),

    /// Inference error from the backend layer.
    #[error("inference error: {0}")]
    Inference(#[from] nfx_inference::InferenceError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while building an extraction request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The document payload carries no content.
    #[error("document payload is empty")]
    EmptyDocument,

    /// The declared media type is not one the core can submit.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
}

/// Errors raised while parsing the inference backend's reply.
///
/// Field-level normalization failures are not errors; they degrade the
/// affected field to absent.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// No balanced brace-delimited object was found in the reply.
    #[error("reply contains no JSON object")]
    NoJsonObject {
        /// The full raw reply, retained for diagnostics.
        raw_reply: String,
    },

    /// The candidate object could not be parsed as JSON.
    #[error("reply is not valid JSON: {reason}")]
    MalformedJson {
        reason: String,
        /// The full raw reply, retained for diagnostics.
        raw_reply: String,
    },

    /// The installment count is present but not a positive integer.
    #[error("invalid installment count: {0}")]
    InvalidInstallments(i64),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF bytes.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract embedded text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Pipeline stage at which an extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Validating the document and building the instruction payload.
    BuildRequest,
    /// The single call to the inference backend.
    Inference,
    /// Parsing and validating the backend reply.
    ParseResponse,
}

impl Stage {
    /// Stable tag surfaced to callers.
    pub fn tag(&self) -> &'static str {
        match self {
            Stage::BuildRequest => "extraction_request_failed",
            Stage::Inference => "inference_call_failed",
            Stage::ParseResponse => "response_parse_failed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A failed extraction: the causing error wrapped with the stage it
/// occurred in and the elapsed processing time.
#[derive(Error, Debug)]
#[error("{stage}: {source} (after {elapsed_ms}ms)")]
pub struct ExtractionFailure {
    /// Stage the pipeline failed in.
    pub stage: Stage,
    /// Elapsed time at failure, in milliseconds.
    pub elapsed_ms: u64,
    /// The underlying cause.
    #[source]
    pub source: NfxError,
}

/// Result type for the nfx library.
pub type Result<T> = std::result::Result<T, NfxError>;
