//! Page-by-metric extraction over a whole document.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::models::config::ExtractionConfig;
use crate::models::document::{DocumentText, PageText};
use crate::models::metric::MetricSet;
use crate::models::observation::{DocumentContext, DocumentSummary, MetricObservation};

use super::rules::{detect_context, CompiledMetric, DisclosureDetector, YearExtractor};

/// Everything extracted from one readable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub source_file: String,
    pub page_count: usize,
    pub context: DocumentContext,
    /// Rows in (page, metric definition) order.
    pub observations: Vec<MetricObservation>,
    pub summary: DocumentSummary,
}

impl DocumentReport {
    pub fn has_metrics(&self) -> bool {
        !self.observations.is_empty()
    }
}

/// Result of running the extractor on a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Extracted(DocumentReport),
    /// Every page is blank; the document needs OCR before it can be read.
    EmptyText { source_file: String, page_count: usize },
}

impl ExtractionOutcome {
    pub fn into_report(self) -> Option<DocumentReport> {
        match self {
            ExtractionOutcome::Extracted(report) => Some(report),
            ExtractionOutcome::EmptyText { .. } => None,
        }
    }
}

/// Extraction engine for a fixed metric set.
///
/// Holds no per-document state, so one instance can serve many documents.
pub struct MetricExtractor {
    metrics: Vec<CompiledMetric>,
    disclosure: DisclosureDetector,
    years: YearExtractor,
    context_pages: Option<usize>,
}

impl MetricExtractor {
    /// Compile `metrics` with the given settings.
    ///
    /// Every alias is compiled here, so a bad definition fails before any page is read.
    pub fn new(metrics: &MetricSet, config: &ExtractionConfig) -> Result<Self, ConfigError> {
        if config.min_year > config.max_year {
            return Err(ConfigError::Setting(format!(
                "min_year {} is greater than max_year {}",
                config.min_year, config.max_year
            )));
        }
        if config.max_unit_len == 0 {
            return Err(ConfigError::Setting(
                "max_unit_len must be at least 1".to_string(),
            ));
        }

        let compiled = metrics
            .iter()
            .map(|m| CompiledMetric::compile(m.clone(), config.window_chars, config.max_unit_len))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Compiled {} metrics (window {}, unit length {})",
            compiled.len(),
            config.window_chars,
            config.max_unit_len
        );

        Ok(Self {
            metrics: compiled,
            disclosure: DisclosureDetector::with_keywords(config.affirmation_keywords.as_slice())?,
            years: YearExtractor::with_range(config.min_year, config.max_year),
            context_pages: config.context_pages,
        })
    }

    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    /// Observations for one page, in metric definition order.
    pub fn extract_page(&self, page: &PageText) -> Vec<MetricObservation> {
        self.metrics
            .iter()
            .filter_map(|m| m.resolve(page, &self.disclosure))
            .collect()
    }

    /// Observations for all pages, without document context.
    pub fn extract_pages(&self, pages: &[PageText]) -> Vec<MetricObservation> {
        pages.iter().flat_map(|p| self.extract_page(p)).collect()
    }

    /// Company and reporting year for a document.
    pub fn detect_context(&self, document: &DocumentText) -> DocumentContext {
        let content = match self.context_pages {
            Some(n) => document.leading_text(n),
            None => document.full_text(),
        };
        detect_context(&content, &document.source_file, &self.years)
    }

    /// Run the full pipeline on a document.
    pub fn extract(&self, document: &DocumentText) -> ExtractionOutcome {
        if document.is_blank() {
            warn!(
                "No text extracted from {} ({} pages)",
                document.source_file,
                document.page_count()
            );
            return ExtractionOutcome::EmptyText {
                source_file: document.source_file.clone(),
                page_count: document.page_count(),
            };
        }

        info!(
            "Extracting {} metrics from {} ({} pages)",
            self.metrics.len(),
            document.source_file,
            document.page_count()
        );

        let mut observations = self.extract_pages(&document.pages);
        let context = self.detect_context(document);
        for row in &mut observations {
            row.attach_context(&context, &document.source_file);
        }

        let summary = DocumentSummary::from_observations(&context, &observations);

        info!(
            "{}: {} observations, {} distinct metrics (company '{}', year {:?})",
            document.source_file,
            observations.len(),
            summary.len(),
            context.company_name,
            context.report_year
        );

        ExtractionOutcome::Extracted(DocumentReport {
            source_file: document.source_file.clone(),
            page_count: document.page_count(),
            context,
            observations,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::observation::MetricValue;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const METRICS: &str = r#"{
        "metrics": [
            {
                "canonical_name": "Scope 1 Emissions",
                "json_key": "scope1_emissions",
                "category": "environmental",
                "aliases": ["Scope 1 Emissions"],
                "unit_hints": ["tCO2e"]
            },
            {
                "canonical_name": "Board Diversity",
                "json_key": "board_diversity",
                "category": "governance",
                "aliases": ["Board Diversity"],
                "unit_hints": ["%"]
            },
            {
                "canonical_name": "TCFD Alignment",
                "json_key": "tcfd_aligned",
                "category": "governance",
                "aliases": ["TCFD"],
                "unit_hints": [],
                "boolean": true
            }
        ]
    }"#;

    fn extractor() -> MetricExtractor {
        MetricExtractor::new(&MetricSet::from_json(METRICS).unwrap(), &ExtractionConfig::default()).unwrap()
    }

    fn number(s: &str) -> MetricValue {
        MetricValue::Number(Decimal::from_str(s).unwrap())
    }

    fn extracted(outcome: ExtractionOutcome) -> DocumentReport {
        outcome.into_report().expect("document should have text")
    }

    #[test]
    fn test_single_page_three_metrics() {
        let doc = DocumentText::from_pages(
            "ACME_2024_ESG_Report.pdf",
            ["Scope 1 Emissions: 4,500 tCO2e. Board Diversity: 30%. We are aligned with TCFD."],
        );
        let report = extracted(extractor().extract(&doc));

        let rows: Vec<_> = report
            .observations
            .iter()
            .map(|o| (o.json_key.as_str(), o.value.clone(), o.unit.as_str(), o.source_page))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("scope1_emissions", number("4500"), "tCO2e", 1),
                ("board_diversity", number("30"), "%", 1),
                ("tcfd_aligned", MetricValue::Flag(true), "boolean", 1),
            ]
        );

        let first = &report.observations[0];
        assert_eq!(first.company_name, "ACME");
        assert_eq!(first.report_year, Some(2024));
        assert_eq!(first.year, Some(2024));
        assert_eq!(first.source_file, "ACME_2024_ESG_Report.pdf");

        assert_eq!(report.summary.environmental.len(), 1);
        assert_eq!(report.summary.governance.len(), 2);
        assert_eq!(report.summary.get("tcfd_aligned"), Some(&MetricValue::Flag(true)));
    }

    #[test]
    fn test_rows_follow_metric_order_within_page() {
        let doc = DocumentText::from_pages(
            "x.pdf",
            ["Board Diversity: 25%. Scope 1 Emissions 12 tCO2e."],
        );
        let report = extracted(extractor().extract(&doc));
        let keys: Vec<_> = report.observations.iter().map(|o| o.json_key.as_str()).collect();
        assert_eq!(keys, vec!["scope1_emissions", "board_diversity"]);
    }

    #[test]
    fn test_first_page_wins_in_summary() {
        let doc = DocumentText::from_pages(
            "x.pdf",
            [
                "Overview only.",
                "Scope 1 Emissions: 100 tCO2e",
                "Scope 1 Emissions: 200 tCO2e",
            ],
        );
        let report = extracted(extractor().extract(&doc));

        let pages: Vec<_> = report.observations.iter().map(|o| o.source_page).collect();
        assert_eq!(pages, vec![2, 3]);
        assert_eq!(report.summary.get("scope1_emissions"), Some(&number("100")));
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let doc = DocumentText::from_pages(
            "Globex_Sustainability_2023.pdf",
            [
                "FY 2023 highlights. Scope 1 Emissions 1,020.5 tCO2e",
                "Board Diversity 40 %, policies adopted in line with TCFD",
            ],
        );
        let extractor = extractor();
        let first = extracted(extractor.extract(&doc));
        let second = extracted(extractor.extract(&doc));

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_blank_document_signalled() {
        let doc = DocumentText::from_pages("scan.pdf", ["", "  \n "]);
        assert_eq!(
            extractor().extract(&doc),
            ExtractionOutcome::EmptyText {
                source_file: "scan.pdf".to_string(),
                page_count: 2,
            }
        );
    }

    #[test]
    fn test_no_metrics_is_not_an_error() {
        let doc = DocumentText::from_pages("x.pdf", ["Nothing measurable here."]);
        let report = extracted(extractor().extract(&doc));
        assert!(!report.has_metrics());
        assert!(report.summary.is_empty());
    }

    #[test]
    fn test_context_pages_limit() {
        let doc = DocumentText::from_pages(
            "x.pdf",
            ["Published 2019.", "Data for 2022, 2022 and 2022."],
        );
        assert_eq!(extractor().detect_context(&doc).report_year, Some(2022));

        let config = ExtractionConfig {
            context_pages: Some(1),
            ..ExtractionConfig::default()
        };
        let limited = MetricExtractor::new(&MetricSet::from_json(METRICS).unwrap(), &config).unwrap();
        assert_eq!(limited.detect_context(&doc).report_year, Some(2019));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let metrics = MetricSet::from_json(METRICS).unwrap();

        let config = ExtractionConfig {
            min_year: 2050,
            max_year: 2020,
            ..ExtractionConfig::default()
        };
        assert!(matches!(
            MetricExtractor::new(&metrics, &config),
            Err(ConfigError::Setting(_))
        ));

        let config = ExtractionConfig {
            affirmation_keywords: vec![],
            ..ExtractionConfig::default()
        };
        assert!(MetricExtractor::new(&metrics, &config).is_err());
    }

    #[test]
    fn test_builtin_metric_set_compiles() {
        let metrics = MetricSet::builtin().unwrap();
        let extractor = MetricExtractor::new(&metrics, &ExtractionConfig::default()).unwrap();
        assert_eq!(extractor.metric_count(), metrics.len());
    }
}
