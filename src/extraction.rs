//! Phone number extraction from raw OCR text.
//!
//! Extraction runs in two passes. The first pass locates loosely formatted
//! number-like spans (a `+` or digit followed by 7 to 20 digits, hyphens or
//! whitespace). The second pass strips every character except digits and `+`
//! and keeps the result only if it has the shape of a phone number: an
//! optional leading `+`, a non-zero first digit, 8 to 15 digits in total.
//!
//! "Digit" means any Unicode decimal digit (`\d`), so fullwidth or
//! Arabic-Indic digits coming out of OCR are kept as-is. The first digit
//! after the optional `+` must still be an ASCII `1`-`9`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static CANDIDATE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\d][\d\-\s]{7,20}").expect("valid span pattern"));

static NON_NUMBER_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d+]").expect("valid strip pattern"));

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$").expect("valid number pattern"));

/// Find candidate spans, leftmost-first, greedy and non-overlapping.
pub fn find_candidate_spans(text: &str) -> Vec<&str> {
    CANDIDATE_SPAN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Drop every character that is neither a decimal digit nor `+`.
pub fn normalize_candidate(span: &str) -> String {
    NON_NUMBER_CHAR.replace_all(span, "").into_owned()
}

/// Normalize a span and return it only if it is a plausible phone number.
pub fn validate_candidate(span: &str) -> Option<String> {
    let normalized = normalize_candidate(span);
    PHONE_NUMBER.is_match(&normalized).then_some(normalized)
}

/// Extract the set of normalized phone numbers found in `text`.
pub fn extract_numbers(text: &str) -> BTreeSet<String> {
    find_candidate_spans(text)
        .into_iter()
        .filter_map(validate_candidate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_international_number_with_separators() {
        let numbers = extract_numbers("Call me at +1 555-123-4567 today");
        assert_eq!(numbers, set(&["+15551234567"]));
    }

    #[test]
    fn test_leading_zero_and_short_fragments_rejected() {
        let numbers = extract_numbers("tel 021-987654321 and 12-3");
        assert!(numbers.is_empty(), "got {:?}", numbers);
    }

    #[test]
    fn test_uk_number_with_spaces() {
        let numbers = extract_numbers("+44 20 7946 0958");
        assert_eq!(numbers, set(&["+442079460958"]));
    }

    #[test]
    fn test_spans_are_greedy_and_non_overlapping() {
        let spans = find_candidate_spans("a 1234567890123456789012345 b");
        // 1 anchor + 20 continuation characters, then a 4-digit remainder
        // that is too short to start another span.
        assert_eq!(spans, vec!["123456789012345678901"]);
    }

    #[test]
    fn test_span_requires_seven_continuation_characters() {
        assert!(find_candidate_spans("1234567").is_empty());
        assert_eq!(find_candidate_spans("12345678"), vec!["12345678"]);
    }

    #[test]
    fn test_plus_only_anchors_a_span() {
        // A `+` in the middle ends the current run and anchors the next one.
        let spans = find_candidate_spans("5551234+4915112345678");
        assert_eq!(spans, vec!["+4915112345678"]);
    }

    #[test]
    fn test_normalize_keeps_digits_and_plus() {
        assert_eq!(normalize_candidate("+1 (555) 123-4567\n"), "+15551234567");
        assert_eq!(normalize_candidate("--  --"), "");
    }

    #[test]
    fn test_validate_digit_count_bounds() {
        assert_eq!(validate_candidate("1234567"), None);
        assert_eq!(validate_candidate("12345678"), Some("12345678".to_string()));
        assert_eq!(
            validate_candidate("123456789012345"),
            Some("123456789012345".to_string())
        );
        assert_eq!(validate_candidate("1234567890123456"), None);
        assert_eq!(validate_candidate("+0123456789"), None);
    }

    #[test]
    fn test_validate_rejects_plus_after_first_position() {
        assert_eq!(validate_candidate("1234+56789"), None);
        assert_eq!(validate_candidate("++12345678"), None);
    }

    #[test]
    fn test_non_ascii_digits_are_kept() {
        assert_eq!(extract_numbers("Call 555 １２３ 4567"), set(&["555１２３4567"]));
        assert_eq!(extract_numbers("tel 5٥٥ 123 4567"), set(&["5٥٥1234567"]));
    }

    #[test]
    fn test_non_ascii_first_digit_rejected() {
        // The leading digit must be ASCII 1-9, as in the strict shape check.
        assert_eq!(validate_candidate("５５５１２３４５６７"), None);
        assert_eq!(
            normalize_candidate("５５５-１２３ ４５６７"),
            "５５５１２３４５６７"
        );
    }

    #[test]
    fn test_too_long_digit_run_rejected() {
        assert!(extract_numbers("1234567890123456789012345").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let numbers = extract_numbers("555 123 4567\nagain: 555-123-4567\n");
        assert_eq!(numbers, set(&["5551234567"]));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let text = "Office +49 30 1234567, mobile 0151 2345678, fax 30 987 6543";
        assert_eq!(extract_numbers(text), extract_numbers(text));
    }

    #[test]
    fn test_accepted_numbers_have_phone_shape() {
        let text = "+1 555 000 1111 / 0044 20 1234 5678 / 99-88-77-66 / 7 7 7 7 7 7 7 7 7 7 7";
        for n in extract_numbers(text) {
            assert!(PHONE_NUMBER.is_match(&n), "{n} does not look like a phone number");
            let digits = n.trim_start_matches('+').chars().count();
            assert!((8..=15).contains(&digits), "{n} has {digits} digits");
        }
    }
}
