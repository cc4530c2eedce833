//! Normalization of numeric literals found in report text.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::NUMBER_LITERAL;
use crate::error::ExtractionError;
use crate::extraction::Result;

/// Digits in the integer part of [`Decimal::MAX`].
const MAX_INTEGER_DIGITS: usize = 29;

/// Parse a comma-grouped, dot-decimal literal ("1,234.5") into a decimal.
///
/// Grouping must be exact: every group after the first comma has three digits.
/// Magnitudes above [`Decimal::MAX`] (2^96 - 1) give [`ExtractionError::OutOfRange`].
pub fn normalize_number(s: &str) -> Result<Decimal> {
    let s = s.trim();

    if !NUMBER_LITERAL.is_match(s) {
        return Err(ExtractionError::Parse {
            value: s.to_string(),
            reason: "not a comma-grouped decimal literal".to_string(),
        });
    }

    let cleaned = s.replace(',', "");
    Decimal::from_str(&cleaned).map_err(|e| {
        let integer = cleaned.split('.').next().unwrap_or_default();
        if integer.trim_start_matches('0').len() >= MAX_INTEGER_DIGITS {
            ExtractionError::OutOfRange {
                value: s.to_string(),
            }
        } else {
            ExtractionError::Parse {
                value: s.to_string(),
                reason: e.to_string(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_grouped_decimal() {
        assert_eq!(normalize_number("1,234.5").unwrap(), dec("1234.5"));
        assert_eq!(normalize_number("12").unwrap(), dec("12"));
        assert_eq!(normalize_number("0.25").unwrap(), dec("0.25"));
    }

    #[test]
    fn test_normalize_any_magnitude() {
        assert_eq!(normalize_number("999").unwrap(), dec("999"));
        assert_eq!(normalize_number("1,000").unwrap(), dec("1000"));
        assert_eq!(normalize_number("12,345,678").unwrap(), dec("12345678"));
        assert_eq!(
            normalize_number("1,234,567,890,123.75").unwrap(),
            dec("1234567890123.75")
        );
        assert_eq!(normalize_number("1234567").unwrap(), dec("1234567"));
        assert_eq!(
            normalize_number("9,999,999,999,999,999,999,999,999,999").unwrap(),
            dec("9999999999999999999999999999")
        );
    }

    #[test]
    fn test_largest_magnitude() {
        assert_eq!(
            normalize_number("79,228,162,514,264,337,593,543,950,335").unwrap(),
            Decimal::MAX
        );

        let err = normalize_number("79,228,162,514,264,337,593,543,950,336").unwrap_err();
        assert!(matches!(err, ExtractionError::OutOfRange { ref value } if value.ends_with("336")));

        let err = normalize_number("1,000,000,000,000,000,000,000,000,000,000,000").unwrap_err();
        assert!(matches!(err, ExtractionError::OutOfRange { .. }));
    }

    #[test]
    fn test_reject_invalid_grouping() {
        assert!(normalize_number("12,34").is_err());
        assert!(normalize_number("1,2345").is_err());
        assert!(normalize_number("1234,567").is_err());
        assert!(normalize_number(",123").is_err());
    }

    #[test]
    fn test_reject_non_numeric() {
        let err = normalize_number("abc").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { ref value, .. } if value == "abc"));
        assert!(normalize_number("").is_err());
        assert!(normalize_number("1.2.3").is_err());
    }

    #[test]
    fn test_reject_non_ascii_digits() {
        // Matched by the Unicode-aware pattern but not a decimal literal.
        assert!(normalize_number("\u{0664}\u{0665}").is_err());
    }
}
