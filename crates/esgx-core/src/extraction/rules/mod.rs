//! Rule-based extractors for sustainability report metrics.

pub mod alias;
pub mod context;
pub mod disclosure;
pub mod numbers;
pub mod patterns;
pub mod proximity;
pub mod resolver;

pub use alias::{compile_alias, AliasPattern};
pub use context::{detect_company_name, detect_context, detect_year, YearExtractor};
pub use disclosure::DisclosureDetector;
pub use numbers::normalize_number;
pub use proximity::ProximityExtractor;
pub use resolver::{select_candidate, CompiledMetric};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A raw value/unit pair found near an alias, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Numeric literal as written ("4,500").
    pub value: String,
    /// Unit token following it, possibly empty.
    pub unit: String,
}

impl Candidate {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }
}
