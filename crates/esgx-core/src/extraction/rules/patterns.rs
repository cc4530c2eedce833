//! Common regex patterns for report metric extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Numeric literal: plain digits or comma-grouped thousands, optional decimals.
pub const NUMBER: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?";

/// Unit token following a number ("%", "tCO2e", "m3", "$", "MWh/yr").
pub const UNIT: &str = r"[%A-Za-z/$\-][%A-Za-z0-9/$\-]*";

lazy_static! {
    // Whole-string numeric literal
    pub static ref NUMBER_LITERAL: Regex = Regex::new(
        &format!(r"^{}$", NUMBER)
    ).unwrap();

    // Explicit fiscal year ("FY2024", "FY 2023")
    pub static ref FISCAL_YEAR: Regex = Regex::new(
        r"(?i)\bFY\s*(2[01]\d{2})\b"
    ).unwrap();

    // Standalone 20xx year
    pub static ref YEAR_TOKEN: Regex = Regex::new(
        r"\b(20\d{2})\b"
    ).unwrap();

    // 20xx anywhere in a file name
    pub static ref FILENAME_YEAR: Regex = Regex::new(
        r"(20\d{2})"
    ).unwrap();

    // Report boilerplate stripped from file names to leave the company
    pub static ref FILENAME_NOISE: Regex = Regex::new(
        r"(?i)(?:ESG|Sustainability|Report|CSR|Annual|FY|20\d{2}|_|-)+"
    ).unwrap();

    pub static ref MULTI_SPACE: Regex = Regex::new(
        r"\s{2,}"
    ).unwrap();
}
