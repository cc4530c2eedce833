//! Core library for sustainability report metric extraction.
//!
//! This crate provides:
//! - Metric definitions (aliases, unit hints, categories) with a built-in set
//! - Rule-based extraction of numeric and disclosure metrics from page text
//! - Reporting year and company inference
//! - Page text loading from PDF and plain-text documents

pub mod document;
pub mod error;
pub mod extraction;
pub mod models;
pub mod pdf;

pub use document::{load_document, load_pdf_bytes, DocumentKind};
pub use error::{ConfigError, EsgxError, ExtractionError, PdfError, Result};
pub use extraction::{DocumentReport, ExtractionOutcome, MetricExtractor};
pub use models::config::EsgxConfig;
pub use models::document::{DocumentText, PageText};
pub use models::metric::{Category, MetricDefinition, MetricKind, MetricSet};
pub use models::observation::{
    DocumentContext, DocumentSummary, MetricObservation, MetricValue, BOOLEAN_UNIT,
};
pub use pdf::{PdfExtractor, PdfProcessor};
