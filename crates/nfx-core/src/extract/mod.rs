//! Extraction pipeline: request building, response parsing, orchestration.

mod engine;
mod parser;
mod request;

pub use engine::{DocumentInput, ExtractionEngine, ExtractionMetadata, ExtractionOutcome};
pub use parser::parse_reply;
pub use request::{DocumentPayload, FieldSpec, TEMPLATE_VERSION, build_request, schema_fields};
