//! Metric extraction from page text.

mod engine;
pub mod rules;

pub use engine::{DocumentReport, ExtractionOutcome, MetricExtractor};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
