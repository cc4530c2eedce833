//! Numeric values found within a bounded window after an alias.

use regex::Regex;

use super::alias::AliasPattern;
use super::patterns::{NUMBER, UNIT};
use super::{Candidate, FieldExtractor};
use crate::error::ConfigError;

/// Finds the first number (and its unit) after every occurrence of one alias.
#[derive(Debug, Clone)]
pub struct ProximityExtractor {
    regex: Regex,
    max_unit_len: usize,
}

impl ProximityExtractor {
    /// Characters searched after an alias.
    pub const DEFAULT_WINDOW: usize = 120;
    /// Longest unit token kept.
    pub const DEFAULT_MAX_UNIT_LEN: usize = 12;

    pub fn new(alias: &str) -> Result<Self, ConfigError> {
        Self::with_limits(alias, Self::DEFAULT_WINDOW, Self::DEFAULT_MAX_UNIT_LEN)
    }

    /// Build with a custom window and unit length bound.
    pub fn with_limits(
        alias: &str,
        window: usize,
        max_unit_len: usize,
    ) -> Result<Self, ConfigError> {
        let alias = AliasPattern::new(alias)?;
        // The window is lazy so the first number after the alias wins.
        let pattern = format!(
            r"(?is){}.{{0,{}}}?({})\s*({})?",
            alias.fragment(),
            window,
            NUMBER,
            UNIT
        );
        let regex = Regex::new(&pattern).map_err(|source| ConfigError::Pattern {
            phrase: alias.alias().to_string(),
            source,
        })?;

        Ok(Self {
            regex,
            max_unit_len,
        })
    }
}

impl FieldExtractor for ProximityExtractor {
    type Output = Candidate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in self.regex.captures_iter(text) {
            let Some(number) = caps.get(1) else {
                continue;
            };
            let unit: String = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .unwrap_or("")
                .chars()
                .take(self.max_unit_len)
                .collect();

            results.push(Candidate::new(number.as_str(), unit));
        }

        results
    }
}
