//! Detection of affirmed qualitative disclosures ("aligned with TCFD").

use super::alias::AliasPattern;
use crate::error::ConfigError;
use crate::models::config::DEFAULT_AFFIRMATION_KEYWORDS;

/// Page-level co-occurrence test of an alias and an affirmation keyword.
///
/// Alias and keyword may appear anywhere on the page; proximity is not checked.
#[derive(Debug, Clone)]
pub struct DisclosureDetector {
    keywords: Vec<AliasPattern>,
}

impl DisclosureDetector {
    /// Detector using the default affirmation keywords.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_keywords(&DEFAULT_AFFIRMATION_KEYWORDS)
    }

    /// Detector using custom keywords, matched like aliases.
    pub fn with_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<Self, ConfigError> {
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref())
            .filter(|k| !k.trim().is_empty())
            .map(AliasPattern::new)
            .collect::<Result<Vec<_>, _>>()?;

        if keywords.is_empty() {
            return Err(ConfigError::Setting(
                "at least one affirmation keyword is required".to_string(),
            ));
        }

        Ok(Self { keywords })
    }

    /// True when any alias and any keyword both occur in `text`.
    pub fn is_affirmed(&self, text: &str, aliases: &[AliasPattern]) -> bool {
        aliases.iter().any(|a| a.is_match(text)) && self.has_affirmation(text)
    }

    fn has_affirmation(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| k.is_match(text))
    }
}
