//! Reporting year and company inference for a whole document.

use std::path::Path;

use tracing::debug;

use super::patterns::{FILENAME_NOISE, FILENAME_YEAR, FISCAL_YEAR, MULTI_SPACE, YEAR_TOKEN};
use super::FieldExtractor;
use crate::models::observation::DocumentContext;

/// Standalone 20xx years within a plausible reporting range.
#[derive(Debug, Clone, Copy)]
pub struct YearExtractor {
    min_year: i32,
    max_year: i32,
}

impl YearExtractor {
    pub fn new() -> Self {
        Self::with_range(2010, 2100)
    }

    pub fn with_range(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }
}

impl Default for YearExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for YearExtractor {
    type Output = i32;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        YEAR_TOKEN
            .captures_iter(text)
            .filter_map(|caps| caps[1].parse::<i32>().ok())
            .filter(|y| (self.min_year..=self.max_year).contains(y))
            .collect()
    }
}

/// Year of an explicit "FY 20xx" marker, if any.
pub fn detect_fiscal_year(text: &str) -> Option<i32> {
    FISCAL_YEAR
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Most frequent year; among equally frequent years the first seen wins.
pub fn most_frequent_year(years: &[i32]) -> Option<i32> {
    let mut counts: Vec<(i32, usize)> = Vec::new();
    for &year in years {
        match counts.iter_mut().find(|(y, _)| *y == year) {
            Some((_, count)) => *count += 1,
            None => counts.push((year, 1)),
        }
    }

    let mut best: Option<(i32, usize)> = None;
    for (year, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((year, count));
        }
    }
    best.map(|(year, _)| year)
}

fn file_stem(source_file: &str) -> String {
    Path::new(source_file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Infer the reporting year from the joined document text.
///
/// Precedence: an "FY 20xx" marker, then the most frequent in-range year,
/// then a 20xx in the file name.
pub fn detect_year(content: &str, source_file: &str, years: &YearExtractor) -> Option<i32> {
    if let Some(year) = detect_fiscal_year(content) {
        debug!("Report year {} from fiscal year marker", year);
        return Some(year);
    }

    if let Some(year) = most_frequent_year(&years.extract_all(content)) {
        debug!("Report year {} from year frequency", year);
        return Some(year);
    }

    let stem = file_stem(source_file);
    let year = FILENAME_YEAR
        .captures(&stem)
        .and_then(|caps| caps[1].parse().ok());
    if let Some(year) = year {
        debug!("Report year {} from file name", year);
    }
    year
}

/// Guess the company from the file name by stripping report boilerplate.
///
/// Falls back to the bare stem when nothing else is left.
pub fn detect_company_name(source_file: &str) -> String {
    let stem = file_stem(source_file);
    let cleaned = FILENAME_NOISE.replace_all(&stem, " ");
    let cleaned = MULTI_SPACE.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        stem
    } else {
        cleaned.to_string()
    }
}

/// Company and reporting year for a document.
pub fn detect_context(content: &str, source_file: &str, years: &YearExtractor) -> DocumentContext {
    DocumentContext {
        company_name: detect_company_name(source_file),
        report_year: detect_year(content, source_file, years),
    }
}
