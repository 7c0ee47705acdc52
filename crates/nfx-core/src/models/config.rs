//! Configuration structures for the extraction pipeline.
//!
//! Built once at startup and passed by reference; the core never re-derives
//! configuration per request.

use serde::{Deserialize, Serialize};

/// Main configuration for the nfx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NfxConfig {
    /// Extraction behavior.
    pub extraction: ExtractionConfig,

    /// Inference backend settings.
    pub inference: InferenceConfig,
}

/// Extraction behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Submit embedded PDF text instead of the raw bytes when available.
    pub prefer_embedded_text: bool,

    /// Minimum embedded-text length to consider a PDF text-based.
    pub min_text_length: usize,

    /// Verify CNPJ/CPF checksums and record failures as warnings.
    pub validate_tax_ids: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            prefer_embedded_text: true,
            min_text_length: 50,
            validate_tax_ids: true,
        }
    }
}

/// Inference backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Model identifier passed to the backend.
    pub model: String,

    /// Per-call timeout in seconds, enforced by the backend's HTTP client.
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

impl NfxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
