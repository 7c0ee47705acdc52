//! Request payload types shared by all inference backends.

/// A self-contained inference request: the instruction text plus the
/// document content it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    /// Task description, schema and rules, rendered as a single text block.
    pub instructions: String,
    /// Document content parts, in submission order.
    pub parts: Vec<RequestPart>,
}

impl InferenceRequest {
    /// Create a request with instructions and no document parts.
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            parts: Vec::new(),
        }
    }

    /// Append a document part.
    pub fn with_part(mut self, part: RequestPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Total byte size of all binary parts.
    pub fn blob_bytes(&self) -> usize {
        self.parts
            .iter()
            .map(|p| match p {
                RequestPart::Blob { data, .. } => data.len(),
                RequestPart::Text(_) => 0,
            })
            .sum()
    }
}

/// One piece of document content submitted alongside the instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    /// Pre-extracted document text.
    Text(String),
    /// Raw document bytes with their declared media type.
    Blob { media_type: String, data: Vec<u8> },
}
