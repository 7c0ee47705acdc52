//! Extraction orchestration.
//!
//! One extraction is a linear pipeline: validate the document, build the
//! instruction request, make a single call to the inference backend, parse
//! and validate the reply. Any stage failure wraps the cause with a stage
//! tag and the elapsed time; nothing is retried inside the core.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use nfx_inference::InferenceBackend;

use crate::error::{ExtractionFailure, NfxError, RequestError, Stage};
use crate::extract::request::{DocumentPayload, build_request};
use crate::models::config::ExtractionConfig;
use crate::models::record::InvoiceRecord;
use crate::normalize::{validate_cnpj, validate_cpf};
use crate::pdf::{PdfDocument, PdfKind};

/// A document submitted for extraction.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    /// Original filename, kept for metadata.
    pub filename: String,
    /// Declared media type (`application/pdf` or `text/plain`).
    pub media_type: String,
    /// Raw document bytes.
    pub data: Vec<u8>,
}

/// A successful extraction: the record plus processing metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    /// The normalized invoice record.
    pub record: InvoiceRecord,
    /// Metadata about the extraction run.
    pub metadata: ExtractionMetadata,
}

/// Metadata about one extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMetadata {
    /// Original filename.
    pub filename: String,
    /// Size of the submitted document in bytes.
    pub byte_size: usize,
    /// Total processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Model that produced the reply.
    pub model: String,
    /// Non-fatal issues found while validating the record.
    pub warnings: Vec<String>,
}

/// The extraction engine, generic over the inference backend.
pub struct ExtractionEngine<B> {
    backend: B,
    config: ExtractionConfig,
}

impl<B: InferenceBackend> ExtractionEngine<B> {
    /// Create an engine with the given backend and configuration.
    pub fn new(backend: B, config: ExtractionConfig) -> Self {
        Self { backend, config }
    }

    /// Extract a normalized invoice record from a document.
    pub async fn extract(
        &self,
        input: DocumentInput,
    ) -> Result<ExtractionOutcome, ExtractionFailure> {
        let started = Instant::now();
        let byte_size = input.data.len();

        info!(
            "Starting extraction for '{}' ({}, {} bytes)",
            input.filename, input.media_type, byte_size
        );

        let payload = self
            .prepare_payload(&input)
            .map_err(|e| fail(Stage::BuildRequest, started, e))?;

        let request =
            build_request(payload).map_err(|e| fail(Stage::BuildRequest, started, e.into()))?;

        let reply = self
            .backend
            .infer(&request)
            .await
            .map_err(|e| fail(Stage::Inference, started, e.into()))?;

        debug!("Backend reply: {} chars", reply.len());

        let record = crate::extract::parser::parse_reply(&reply)
            .map_err(|e| fail(Stage::ParseResponse, started, e.into()))?;

        let warnings = self.collect_warnings(&record);
        let processing_time_ms = started.elapsed().as_millis() as u64;

        info!(
            "Extraction complete for '{}' in {}ms ({} warnings)",
            input.filename,
            processing_time_ms,
            warnings.len()
        );

        Ok(ExtractionOutcome {
            record,
            metadata: ExtractionMetadata {
                filename: input.filename,
                byte_size,
                processing_time_ms,
                model: self.backend.model_name().to_string(),
                warnings,
            },
        })
    }

    /// Decide how the document travels to the backend.
    ///
    /// PDFs with enough embedded text are submitted as text; scanned PDFs
    /// go as raw bytes and the backend does its own layout understanding.
    fn prepare_payload(&self, input: &DocumentInput) -> Result<DocumentPayload, NfxError> {
        if input.data.is_empty() {
            return Err(RequestError::EmptyDocument.into());
        }

        match input.media_type.as_str() {
            "application/pdf" => {
                let pdf = PdfDocument::load(&input.data)?;

                if self.config.prefer_embedded_text
                    && pdf.classify(self.config.min_text_length) == PdfKind::Text
                {
                    let text = pdf.extract_text()?;
                    debug!("Using embedded PDF text ({} chars)", text.len());
                    return Ok(DocumentPayload::Text(text));
                }

                debug!("Submitting PDF bytes ({} pages)", pdf.page_count());
                Ok(DocumentPayload::Pdf {
                    data: input.data.clone(),
                    media_type: input.media_type.clone(),
                })
            }
            "text/plain" => Ok(DocumentPayload::Text(
                String::from_utf8_lossy(&input.data).into_owned(),
            )),
            other => Err(RequestError::UnsupportedMediaType(other.to_string()).into()),
        }
    }

    fn collect_warnings(&self, record: &InvoiceRecord) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.config.validate_tax_ids {
            return warnings;
        }

        if let Some(cnpj) = &record.fornecedor.cnpj {
            if !validate_cnpj(cnpj) {
                warnings.push(format!("supplier CNPJ {} fails checksum validation", cnpj));
            }
        }

        if let Some(cpf) = &record.faturado.cpf {
            if !validate_cpf(cpf) {
                warnings.push(format!("billed-to CPF {} fails checksum validation", cpf));
            }
        }

        warnings
    }
}

fn fail(stage: Stage, started: Instant, source: NfxError) -> ExtractionFailure {
    ExtractionFailure {
        stage,
        elapsed_ms: started.elapsed().as_millis() as u64,
        source,
    }
}
