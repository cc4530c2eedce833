//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Phrases that affirm a qualitative disclosure.
pub const DEFAULT_AFFIRMATION_KEYWORDS: [&str; 5] =
    ["aligned", "compliant", "in line with", "adopted", "implemented"];

/// Main configuration for the esgx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EsgxConfig {
    /// Metric extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Metric extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Metric definition file; the built-in set is used when unset.
    pub metrics_path: Option<PathBuf>,

    /// Characters searched after an alias for a number.
    pub window_chars: usize,

    /// Maximum length of a captured unit token.
    pub max_unit_len: usize,

    /// Keywords that affirm a boolean metric on a page.
    pub affirmation_keywords: Vec<String>,

    /// Smallest year counted when inferring the reporting year.
    pub min_year: i32,

    /// Largest year counted when inferring the reporting year.
    pub max_year: i32,

    /// Pages scanned for the reporting year (None = whole document).
    pub context_pages: Option<usize>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            metrics_path: None,
            window_chars: 120,
            max_unit_len: 12,
            affirmation_keywords: DEFAULT_AFFIRMATION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            min_year: 2010,
            max_year: 2100,
            context_pages: None,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { max_pages: 0 }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name of the combined observation table in batch mode.
    pub csv_file_name: String,

    /// Indent JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_file_name: "metrics_extracted.csv".to_string(),
            pretty_json: true,
        }
    }
}

impl EsgxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EsgxConfig =
            serde_json::from_str(r#"{ "extraction": { "window_chars": 80 } }"#).unwrap();
        assert_eq!(config.extraction.window_chars, 80);
        assert_eq!(config.extraction.max_unit_len, 12);
        assert_eq!(config.extraction.affirmation_keywords.len(), 5);
        assert_eq!(config.output.csv_file_name, "metrics_extracted.csv");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = EsgxConfig::default();
        config.extraction.context_pages = Some(2);
        config.save(&path).unwrap();

        let reloaded = EsgxConfig::from_file(&path).unwrap();
        assert_eq!(reloaded.extraction.context_pages, Some(2));
        assert_eq!(reloaded.extraction.min_year, 2010);
    }
}
