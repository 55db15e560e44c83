use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ConversionError;

static NON_AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.]").expect("valid amount filter regex"));

/// Integer parts with more significant digits than this are at least 10^12.
const MAX_INTEGER_DIGITS: usize = 12;
const MAX_FRACTION_DIGITS: usize = 2;

/// An amount split into its yuan digits and at most two sub-unit digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAmount {
    pub integer_digits: String,
    pub fraction_digits: String,
}

impl ParsedAmount {
    /// Strips noise characters, splits on the decimal point and checks the
    /// magnitude against one trillion on the digit string itself.
    pub fn parse(raw: &str) -> Result<Self, ConversionError> {
        let cleaned = sanitize(raw);
        let mut parts = cleaned.split('.');
        let integer_part = parts.next().unwrap_or_default();
        let fraction_part = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(ConversionError::MalformedInput);
        }

        let significant = integer_part.trim_start_matches('0');
        if significant.len() > MAX_INTEGER_DIGITS {
            return Err(ConversionError::OutOfRange);
        }
        let integer_digits = if significant.is_empty() {
            String::from("0")
        } else {
            significant.to_string()
        };

        // ASCII only after sanitizing, so byte slicing is char slicing.
        let fraction_digits =
            fraction_part[..fraction_part.len().min(MAX_FRACTION_DIGITS)].to_string();

        Ok(Self {
            integer_digits,
            fraction_digits,
        })
    }

    pub fn is_whole_zero(&self) -> bool {
        self.integer_digits == "0"
    }
}

pub fn sanitize(raw: &str) -> String {
    NON_AMOUNT_RE.replace_all(raw, "").into_owned()
}

/// Whether the input denotes a complete, non-trivial amount worth keeping,
/// as opposed to a half-typed value such as ".5", "00" or "1.2.".
pub fn is_valid_amount(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }
    let cleaned = sanitize(raw);
    if cleaned.is_empty() {
        return false;
    }
    let has_point = cleaned.contains('.');
    if cleaned.matches('.').count() > 1 {
        return false;
    }
    let integer_part = cleaned.split('.').next().unwrap_or_default();
    if integer_part.is_empty() && has_point {
        return false;
    }
    if !has_point && integer_part.bytes().all(|b| b == b'0') {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> ParsedAmount {
        ParsedAmount::parse(raw).expect("parsable amount")
    }

    #[test]
    fn strips_currency_noise() {
        assert_eq!(sanitize("¥ 1,024.50 元"), "1024.50");
        assert_eq!(sanitize("１２3"), "3");
    }

    #[test]
    fn splits_and_defaults_integer_part() {
        let amount = parsed(".5");
        assert_eq!(amount.integer_digits, "0");
        assert_eq!(amount.fraction_digits, "5");
        assert!(amount.is_whole_zero());

        let amount = parsed("12.");
        assert_eq!(amount.integer_digits, "12");
        assert_eq!(amount.fraction_digits, "");
    }

    #[test]
    fn truncates_fraction_without_rounding() {
        assert_eq!(parsed("1.999").fraction_digits, "99");
        assert_eq!(parsed("1.234567").fraction_digits, "23");
    }

    #[test]
    fn parsed_parts_are_ascii_digits_only() {
        for raw in ["¥ 1,0a24.5b9", "x.y", "12元3角", "..", "-7.5"] {
            let Ok(amount) = ParsedAmount::parse(raw) else {
                continue;
            };
            assert!(!amount.integer_digits.is_empty());
            assert!(amount.integer_digits.bytes().all(|b| b.is_ascii_digit()));
            assert!(amount.fraction_digits.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn removes_leading_zeros() {
        assert_eq!(parsed("000120").integer_digits, "120");
        assert_eq!(parsed("0000").integer_digits, "0");
    }

    #[test]
    fn rejects_multiple_points() {
        assert_eq!(
            ParsedAmount::parse("1.2.3"),
            Err(ConversionError::MalformedInput)
        );
        assert_eq!(
            ParsedAmount::parse("1..2"),
            Err(ConversionError::MalformedInput)
        );
    }

    #[test]
    fn range_check_uses_significant_digits() {
        assert!(ParsedAmount::parse("999999999999").is_ok());
        assert!(ParsedAmount::parse("000999999999999.99").is_ok());
        assert_eq!(
            ParsedAmount::parse("1000000000000"),
            Err(ConversionError::OutOfRange)
        );
        assert_eq!(
            ParsedAmount::parse("123456789012345678901234567890"),
            Err(ConversionError::OutOfRange)
        );
    }

    #[test]
    fn valid_amount_gate() {
        assert!(is_valid_amount("12"));
        assert!(is_valid_amount("0.5"));
        assert!(is_valid_amount("0."));
        assert!(is_valid_amount("¥3"));
        assert!(!is_valid_amount(""));
        assert!(!is_valid_amount("  "));
        assert!(!is_valid_amount("abc"));
        assert!(!is_valid_amount(".5"));
        assert!(!is_valid_amount("000"));
        assert!(!is_valid_amount("1.2.3"));
    }
}
