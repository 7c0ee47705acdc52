//! Gemini backend over the Google Generative Language HTTP API.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::InferenceError;
use crate::request::{InferenceRequest, RequestPart};
use crate::{InferenceBackend, Result};

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Inference backend backed by the Gemini `generateContent` API.
///
/// Document blobs (PDF bytes) are submitted inline, base64-encoded.
/// Generation runs at temperature 0 so identical requests produce stable
/// replies. The backend performs a single call per request; it does not
/// retry on its own.
pub struct GeminiBackend {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiBackend {
    /// Create a backend with an explicit API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create a backend reading the API key from `GEMINI_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| InferenceError::MissingApiKey(API_KEY_ENV.to_string()))?;
        Ok(Self::new(api_key, model))
    }

    /// Override the API endpoint (for proxies and tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        self
    }

    fn build_body(&self, request: &InferenceRequest) -> GenerateRequest {
        let mut parts = vec![Part::Text {
            text: request.instructions.clone(),
        }];

        for part in &request.parts {
            match part {
                RequestPart::Text(text) => parts.push(Part::Text { text: text.clone() }),
                RequestPart::Blob { media_type, data } => parts.push(Part::InlineData {
                    inline_data: InlineData {
                        mime_type: media_type.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(data),
                    },
                }),
            }
        }

        GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig { temperature: 0.0 },
        }
    }
}

impl InferenceBackend for GeminiBackend {
    async fn infer(&self, request: &InferenceRequest) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        let body = self.build_body(request);

        debug!(
            "Calling {} with {} parts ({} blob bytes)",
            self.model,
            request.parts.len() + 1,
            request.blob_bytes()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let text: String = reply
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(InferenceError::EmptyReply);
        }

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_creation() {
        let backend = GeminiBackend::new("secret", "gemini-2.5-flash");
        assert_eq!(backend.model_name(), "gemini-2.5-flash");
        assert_eq!(backend.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_build_body_encodes_blobs() {
        let backend = GeminiBackend::new("secret", DEFAULT_MODEL);
        let request = InferenceRequest::new("instructions").with_part(RequestPart::Blob {
            media_type: "application/pdf".to_string(),
            data: b"%PDF-1.4".to_vec(),
        });

        let body = backend.build_body(&request);
        assert_eq!(body.contents.len(), 1);
        assert_eq!(body.contents[0].parts.len(), 2);

        match &body.contents[0].parts[1] {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "application/pdf");
                assert_eq!(inline_data.data, "JVBERi0xLjQ=");
            }
            _ => panic!("expected inline data part"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_on_unreachable_endpoint() {
        let backend = GeminiBackend::new("secret", DEFAULT_MODEL)
            .with_endpoint("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2));

        let result = backend.infer(&InferenceRequest::new("hello")).await;
        assert!(matches!(result, Err(InferenceError::Transport(_))));
    }
}
