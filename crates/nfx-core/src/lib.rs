//! Core library for invoice data extraction.
//!
//! This crate provides:
//! - The fixed expense-category taxonomy
//! - Field normalizers (dates, currency amounts, CNPJ/CPF tax IDs)
//! - Extraction request building for generative inference backends
//! - Response parsing and validation into the canonical `InvoiceRecord`
//! - The orchestration engine sequencing one extraction end to end

pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod pdf;
pub mod taxonomy;

pub use error::{ExtractionFailure, NfxError, PdfError, RequestError, ResponseError, Result, Stage};
pub use extract::{DocumentInput, DocumentPayload, ExtractionEngine, ExtractionOutcome};
pub use models::config::{ExtractionConfig, InferenceConfig, NfxConfig};
pub use models::record::{BilledTo, InvoiceRecord, Supplier};
pub use taxonomy::{CategoryListing, ExpenseCategory, category_listing, examples_for, list_categories};

/// Re-export inference boundary types.
pub use nfx_inference::{InferenceBackend, InferenceRequest, RequestPart};
