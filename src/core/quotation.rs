//! Quotation number formatting and parsing

use regex::Regex;
use std::sync::OnceLock;

/// Pattern a quotation number prefix must match
const PREFIX_PATTERN: &str = "[A-Z][A-Z0-9]*";

/// Whether `prefix` can start a quotation number, e.g. `QUO` or `Q2`
pub fn is_valid_prefix(prefix: &str) -> bool {
    static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    PREFIX_REGEX
        .get_or_init(|| Regex::new(&format!("^{}$", PREFIX_PATTERN)).unwrap())
        .is_match(prefix)
}

/// Build a quotation number such as `QUO-2026-004`
///
/// The sequence is the record id, zero-padded to at least three digits.
pub fn format_quotation_number(prefix: &str, year: i32, id: i64) -> String {
    format!("{}-{}-{:03}", prefix, year, id)
}

/// The parts of a quotation number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationNumber {
    pub prefix: String,
    pub year: i32,
    pub sequence: u64,
}

impl QuotationNumber {
    /// Parse a quotation number, returning `None` if it is malformed
    pub fn parse(value: &str) -> Option<Self> {
        static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = NUMBER_REGEX.get_or_init(|| {
            Regex::new(&format!(r"^({})-(\d{{4}})-(\d{{3,}})$", PREFIX_PATTERN)).unwrap()
        });

        let captures = regex.captures(value)?;
        Some(Self {
            prefix: captures[1].to_string(),
            year: captures[2].parse().ok()?,
            sequence: captures[3].parse().ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_three_digits() {
        assert_eq!(format_quotation_number("QUO", 2026, 1), "QUO-2026-001");
        assert_eq!(format_quotation_number("QUO", 2026, 42), "QUO-2026-042");
    }

    #[test]
    fn test_format_keeps_longer_sequences() {
        assert_eq!(format_quotation_number("QUO", 2025, 1234), "QUO-2025-1234");
    }

    #[test]
    fn test_parse_valid_number() {
        let parsed = QuotationNumber::parse("QUO-2026-007").unwrap();
        assert_eq!(parsed.prefix, "QUO");
        assert_eq!(parsed.year, 2026);
        assert_eq!(parsed.sequence, 7);
    }

    #[test]
    fn test_prefix_rule_matches_parser() {
        for prefix in ["QUO", "Q2", "INV"] {
            assert!(is_valid_prefix(prefix));
            let number = format_quotation_number(prefix, 2026, 5);
            assert_eq!(QuotationNumber::parse(&number).unwrap().prefix, prefix);
        }
        for prefix in ["quo", "", "2Q", "QU-O"] {
            assert!(!is_valid_prefix(prefix));
        }
    }

    #[test]
    fn test_parse_rejects_malformed_numbers() {
        assert!(QuotationNumber::parse("QUO-26-001").is_none());
        assert!(QuotationNumber::parse("quo-2026-001").is_none());
        assert!(QuotationNumber::parse("QUO-2026-01").is_none());
        assert!(QuotationNumber::parse("").is_none());
    }
}
