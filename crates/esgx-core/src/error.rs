//! Error types for the esgx-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the esgx library.
#[derive(Error, Debug)]
pub enum EsgxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Metric or engine configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Metric extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document type cannot be turned into page text.
    #[error("unsupported document format: {0}")]
    UnsupportedDocument(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while loading metric definitions or building the engine.
///
/// These surface before any page is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The metric file could not be read or parsed.
    #[error("failed to load metrics from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// The metric document is not valid JSON for the expected schema.
    #[error("invalid metric configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The metric set contains no definitions.
    #[error("metric configuration defines no metrics")]
    Empty,

    /// A metric definition is structurally invalid.
    #[error("metric '{metric}': {reason}")]
    InvalidMetric { metric: String, reason: String },

    /// An alias or keyword could not be compiled into a search pattern.
    #[error("failed to compile pattern for '{phrase}': {source}")]
    Pattern {
        phrase: String,
        #[source]
        source: regex::Error,
    },

    /// Engine settings are out of range.
    #[error("invalid extraction setting: {0}")]
    Setting(String),
}

/// Errors related to metric value extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Failed to normalize a numeric literal.
    #[error("failed to parse number '{value}': {reason}")]
    Parse { value: String, reason: String },

    /// A well-formed literal larger than the 96-bit decimal range.
    #[error("number '{value}' exceeds the largest supported magnitude")]
    OutOfRange { value: String },
}

/// Result type for the esgx library.
pub type Result<T> = std::result::Result<T, EsgxError>;
