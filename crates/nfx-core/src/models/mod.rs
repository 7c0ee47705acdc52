//! Data models: the canonical invoice record and pipeline configuration.

pub mod config;
pub mod record;
