//! Metric definitions and the metric configuration file.
//!
//! The file format is `{"metrics": [ ... ]}` where every entry carries
//! `canonical_name`, `json_key`, `category`, `aliases`, `unit_hints` and an
//! optional `boolean` flag. Definitions are validated as a whole when loaded,
//! so a broken entry is reported before any document is read.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_METRICS_JSON: &str = include_str!("../../../../config/metrics_config.json");

/// Reporting pillar a metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Environmental,
    Social,
    Governance,
}

impl Category {
    /// All categories in summary order.
    pub const ALL: [Category; 3] = [Category::Environmental, Category::Social, Category::Governance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Environmental => "environmental",
            Category::Social => "social",
            Category::Governance => "governance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric entry exactly as it appears in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDef {
    pub canonical_name: String,
    pub json_key: String,
    pub category: Category,
    pub aliases: Vec<String>,
    pub unit_hints: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub boolean: bool,
}

/// How a metric is extracted from page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricKind {
    /// A figure found near an alias; hints rank candidate units.
    Numeric { unit_hints: Vec<String> },
    /// A yes/no disclosure affirmed somewhere on the page.
    Boolean,
}

/// A validated metric definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDefinition {
    /// Stable display name.
    pub canonical_name: String,
    /// Key used in the nested summary.
    pub json_key: String,
    /// Summary bucket.
    pub category: Category,
    /// Surface forms to search for, in priority order.
    pub aliases: Vec<String>,
    /// Extraction strategy.
    pub kind: MetricKind,
}

impl MetricDefinition {
    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, MetricKind::Boolean)
    }

    /// Preferred unit tokens, empty for boolean metrics.
    pub fn unit_hints(&self) -> &[String] {
        match &self.kind {
            MetricKind::Numeric { unit_hints } => unit_hints,
            MetricKind::Boolean => &[],
        }
    }
}

impl TryFrom<MetricDef> for MetricDefinition {
    type Error = ConfigError;

    fn try_from(def: MetricDef) -> Result<Self, Self::Error> {
        let label = if def.canonical_name.trim().is_empty() {
            def.json_key.clone()
        } else {
            def.canonical_name.clone()
        };
        let invalid = |reason: &str| ConfigError::InvalidMetric {
            metric: label.clone(),
            reason: reason.to_string(),
        };

        if def.canonical_name.trim().is_empty() {
            return Err(invalid("canonical_name must not be empty"));
        }
        if def.json_key.trim().is_empty() {
            return Err(invalid("json_key must not be empty"));
        }
        if def.aliases.is_empty() {
            return Err(invalid("at least one alias is required"));
        }
        if def.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(invalid("aliases must not be blank"));
        }

        let kind = if def.boolean {
            MetricKind::Boolean
        } else {
            if def.unit_hints.iter().any(|h| h.trim().is_empty()) {
                return Err(invalid("unit hints must not be blank"));
            }
            MetricKind::Numeric {
                unit_hints: def.unit_hints,
            }
        };

        Ok(Self {
            canonical_name: def.canonical_name,
            json_key: def.json_key,
            category: def.category,
            aliases: def.aliases,
            kind,
        })
    }
}

impl From<&MetricDefinition> for MetricDef {
    fn from(def: &MetricDefinition) -> Self {
        Self {
            canonical_name: def.canonical_name.clone(),
            json_key: def.json_key.clone(),
            category: def.category,
            aliases: def.aliases.clone(),
            unit_hints: def.unit_hints().to_vec(),
            boolean: def.is_boolean(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MetricFile {
    metrics: Vec<MetricDef>,
}

/// An ordered, validated set of metric definitions.
///
/// Definition order is significant: it is the per-page iteration order and
/// therefore decides which observation wins for a shared `json_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSet {
    metrics: Vec<MetricDefinition>,
}

impl MetricSet {
    /// The metric set shipped with the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_METRICS_JSON)
    }

    /// Load a metric set from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let file: MetricFile = serde_json::from_str(&content).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_definitions(file.metrics)
    }

    /// Parse a metric set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: MetricFile = serde_json::from_str(json)?;
        Self::from_definitions(file.metrics)
    }

    /// Validate raw definitions, failing on the first broken one.
    pub fn from_definitions(defs: Vec<MetricDef>) -> Result<Self, ConfigError> {
        if defs.is_empty() {
            return Err(ConfigError::Empty);
        }
        let metrics = defs
            .into_iter()
            .map(MetricDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { metrics })
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.metrics.iter()
    }

    pub fn as_slice(&self) -> &[MetricDefinition] {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Serialize back into the configuration file format.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        let file = MetricFile {
            metrics: self.metrics.iter().map(MetricDef::from).collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}
