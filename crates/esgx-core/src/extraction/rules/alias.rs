//! Alias phrases compiled into formatting-tolerant search patterns.
//!
//! Report text is often line-wrapped or hyphen-normalized, so "CO2 Emissions"
//! has to match "CO2\n  emissions" and "CO2-Emissions". Word boundaries inside
//! an alias are never dropped: "CO2Emissions" does not match "CO2 Emissions".

use regex::Regex;

use crate::error::ConfigError;

/// A gap between alias words: one or more whitespace or hyphen characters.
const WORD_GAP: &str = r"[\s\-]+";

/// A hyphen inside an alias word: optional hyphen or whitespace.
const HYPHEN_GAP: &str = r"[\-\s]?";

/// Build the (case-sensitive) regex fragment for an alias.
///
/// Everything except spaces and hyphens is matched literally.
pub fn compile_alias(alias: &str) -> String {
    alias
        .split_whitespace()
        .map(compile_word)
        .collect::<Vec<_>>()
        .join(WORD_GAP)
}

fn compile_word(word: &str) -> String {
    word.split('-')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(HYPHEN_GAP)
}

/// A compiled, case-insensitive alias.
#[derive(Debug, Clone)]
pub struct AliasPattern {
    alias: String,
    fragment: String,
    regex: Regex,
}

impl AliasPattern {
    pub fn new(alias: &str) -> Result<Self, ConfigError> {
        let fragment = compile_alias(alias);
        let regex = Regex::new(&format!("(?i){}", fragment)).map_err(|source| {
            ConfigError::Pattern {
                phrase: alias.to_string(),
                source,
            }
        })?;

        Ok(Self {
            alias: alias.to_string(),
            fragment,
            regex,
        })
    }

    /// The phrase this pattern was built from.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Regex fragment for embedding into larger patterns.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
