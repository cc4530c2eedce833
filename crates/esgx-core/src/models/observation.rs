//! Extraction output: observation rows and the nested per-document summary.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use super::metric::{Category, MetricDefinition};

/// Unit marker recorded for affirmed boolean metrics.
pub const BOOLEAN_UNIT: &str = "boolean";

/// A resolved metric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// An affirmed disclosure.
    Flag(bool),
    /// A normalized figure.
    Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Flag(b) => write!(f, "{}", b),
            MetricValue::Number(d) => write!(f, "{}", d.normalize()),
        }
    }
}

/// Company and reporting year inferred for a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentContext {
    pub company_name: String,
    pub report_year: Option<i32>,
}

/// One metric value attributed to one page of one document.
///
/// Field order matches the column order of the observation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricObservation {
    pub company_name: String,
    pub report_year: Option<i32>,
    pub metric_name: String,
    pub unit: String,
    pub value: MetricValue,
    pub year: Option<i32>,
    pub source_page: u32,
    pub source_file: String,
    pub category: Category,
    pub json_key: String,
}

impl MetricObservation {
    /// Column names of the observation table.
    pub const COLUMNS: [&'static str; 10] = [
        "company_name",
        "report_year",
        "metric_name",
        "unit",
        "value",
        "year",
        "source_page",
        "source_file",
        "category",
        "json_key",
    ];

    /// Create a row for `metric` before document context is known.
    pub fn new(
        metric: &MetricDefinition,
        value: MetricValue,
        unit: impl Into<String>,
        source_page: u32,
    ) -> Self {
        Self {
            company_name: String::new(),
            report_year: None,
            metric_name: metric.canonical_name.clone(),
            unit: unit.into(),
            value,
            year: None,
            source_page,
            source_file: String::new(),
            category: metric.category,
            json_key: metric.json_key.clone(),
        }
    }

    /// Back-fill document-level fields. A locally detected `year` is kept.
    pub fn attach_context(&mut self, context: &DocumentContext, source_file: &str) {
        self.company_name = context.company_name.clone();
        self.report_year = context.report_year;
        if self.year.is_none() {
            self.year = context.report_year;
        }
        self.source_file = source_file.to_string();
    }

    pub fn is_boolean(&self) -> bool {
        self.unit == BOOLEAN_UNIT
    }

    /// Row values in [`Self::COLUMNS`] order; unknown years are empty.
    pub fn to_record(&self) -> [String; 10] {
        let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_default();
        [
            self.company_name.clone(),
            year(self.report_year),
            self.metric_name.clone(),
            self.unit.clone(),
            self.value.to_string(),
            year(self.year),
            self.source_page.to_string(),
            self.source_file.clone(),
            self.category.to_string(),
            self.json_key.clone(),
        ]
    }
}

/// Nested per-document summary keyed by category then `json_key`.
///
/// Keys keep the order their first row was seen in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub company_name: String,
    pub report_year: Option<i32>,
    pub environmental: IndexMap<String, MetricValue>,
    pub social: IndexMap<String, MetricValue>,
    pub governance: IndexMap<String, MetricValue>,
}

impl DocumentSummary {
    /// Group rows by category, keeping the first row seen for each `json_key`.
    pub fn from_observations(context: &DocumentContext, rows: &[MetricObservation]) -> Self {
        let mut summary = Self {
            company_name: context.company_name.clone(),
            report_year: context.report_year,
            ..Self::default()
        };

        let mut seen = HashSet::new();
        for row in rows {
            if !seen.insert(row.json_key.as_str()) {
                continue;
            }
            let value = if row.is_boolean() {
                MetricValue::Flag(true)
            } else {
                row.value.clone()
            };
            summary
                .bucket_mut(row.category)
                .insert(row.json_key.clone(), value);
        }

        summary
    }

    pub fn bucket(&self, category: Category) -> &IndexMap<String, MetricValue> {
        match category {
            Category::Environmental => &self.environmental,
            Category::Social => &self.social,
            Category::Governance => &self.governance,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut IndexMap<String, MetricValue> {
        match category {
            Category::Environmental => &mut self.environmental,
            Category::Social => &mut self.social,
            Category::Governance => &mut self.governance,
        }
    }

    /// Look a key up across all buckets.
    pub fn get(&self, json_key: &str) -> Option<&MetricValue> {
        Category::ALL
            .iter()
            .find_map(|c| self.bucket(*c).get(json_key))
    }

    /// Number of distinct metrics in the summary.
    pub fn len(&self) -> usize {
        self.environmental.len() + self.social.len() + self.governance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
