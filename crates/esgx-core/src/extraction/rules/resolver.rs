//! Resolution of one metric on one page into at most one observation.

use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use super::alias::AliasPattern;
use super::disclosure::DisclosureDetector;
use super::numbers::normalize_number;
use super::proximity::ProximityExtractor;
use super::{Candidate, FieldExtractor};
use crate::error::{ConfigError, ExtractionError};
use crate::models::document::PageText;
use crate::models::metric::{MetricDefinition, MetricKind};
use crate::models::observation::{MetricObservation, MetricValue, BOOLEAN_UNIT};

/// A candidate whose value normalized successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCandidate {
    pub value: Decimal,
    pub unit: String,
}

enum Strategy {
    Numeric { extractors: Vec<ProximityExtractor> },
    Boolean { aliases: Vec<AliasPattern> },
}

/// A metric definition with its aliases compiled once.
pub struct CompiledMetric {
    definition: MetricDefinition,
    strategy: Strategy,
}

impl CompiledMetric {
    /// Compile every alias of `definition`.
    pub fn compile(
        definition: MetricDefinition,
        window: usize,
        max_unit_len: usize,
    ) -> Result<Self, ConfigError> {
        let strategy = match definition.kind {
            MetricKind::Numeric { .. } => Strategy::Numeric {
                extractors: definition
                    .aliases
                    .iter()
                    .map(|a| ProximityExtractor::with_limits(a, window, max_unit_len))
                    .collect::<Result<_, _>>()?,
            },
            MetricKind::Boolean => Strategy::Boolean {
                aliases: definition
                    .aliases
                    .iter()
                    .map(|a| AliasPattern::new(a))
                    .collect::<Result<_, _>>()?,
            },
        };

        Ok(Self {
            definition,
            strategy,
        })
    }

    pub fn definition(&self) -> &MetricDefinition {
        &self.definition
    }

    /// Raw hits of all aliases, alias order first, then text order.
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        match &self.strategy {
            Strategy::Numeric { extractors } => extractors
                .iter()
                .flat_map(|e| e.extract_all(text))
                .collect(),
            Strategy::Boolean { .. } => Vec::new(),
        }
    }

    /// Resolve this metric on one page.
    ///
    /// `None` means the metric is not reported on the page.
    pub fn resolve(
        &self,
        page: &PageText,
        disclosure: &DisclosureDetector,
    ) -> Option<MetricObservation> {
        match &self.strategy {
            Strategy::Boolean { aliases } => disclosure
                .is_affirmed(&page.text, aliases)
                .then(|| {
                    debug!(
                        "Page {}: {} affirmed",
                        page.number, self.definition.canonical_name
                    );
                    MetricObservation::new(
                        &self.definition,
                        MetricValue::Flag(true),
                        BOOLEAN_UNIT,
                        page.number,
                    )
                }),
            Strategy::Numeric { .. } => self.resolve_numeric(page),
        }
    }

    fn resolve_numeric(&self, page: &PageText) -> Option<MetricObservation> {
        let parsed: Vec<ParsedCandidate> = self
            .candidates(&page.text)
            .into_iter()
            .filter_map(|c| match normalize_number(&c.value) {
                Ok(value) => Some(ParsedCandidate {
                    value,
                    unit: c.unit,
                }),
                Err(e @ ExtractionError::OutOfRange { .. }) => {
                    warn!(
                        "Page {}: discarding candidate for {}: {}",
                        page.number, self.definition.canonical_name, e
                    );
                    None
                }
                Err(e) => {
                    trace!(
                        "Page {}: discarding candidate for {}: {}",
                        page.number, self.definition.canonical_name, e
                    );
                    None
                }
            })
            .collect();

        let hints = self.definition.unit_hints();
        let best = select_candidate(&parsed, hints)?;
        let unit = if best.unit.is_empty() {
            hints.first().cloned().unwrap_or_default()
        } else {
            best.unit.clone()
        };

        debug!(
            "Page {}: {} = {} {} ({} candidates)",
            page.number,
            self.definition.canonical_name,
            best.value,
            unit,
            parsed.len()
        );

        Some(MetricObservation::new(
            &self.definition,
            MetricValue::Number(best.value),
            unit,
            page.number,
        ))
    }
}

/// Pick the first candidate whose unit is a percentage or contains a hint,
/// falling back to the first candidate in scan order.
pub fn select_candidate<'a>(
    candidates: &'a [ParsedCandidate],
    unit_hints: &[String],
) -> Option<&'a ParsedCandidate> {
    candidates
        .iter()
        .find(|c| unit_matches(&c.unit, unit_hints))
        .or_else(|| candidates.first())
}

fn unit_matches(unit: &str, unit_hints: &[String]) -> bool {
    let unit = unit.to_lowercase();
    unit.contains('%')
        || unit_hints
            .iter()
            .any(|h| !h.is_empty() && unit.contains(&h.to_lowercase()))
}
