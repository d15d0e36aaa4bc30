//! Pure per-value transforms behind each rule.
//!
//! Every function here is total: any [`CellValue`] goes in, a [`CellValue`]
//! comes out, and inputs a transform does not apply to are returned as-is.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::kind::CaseMode;
use crate::model::CellValue;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

/// Optional minus, digits, optional fraction. No grouping commas, no exponents.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap());

/// YYYY-MM-DD or YYYY/MM/DD.
static YEAR_FIRST_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})([-/])([0-9]{2})([-/])([0-9]{2})$").unwrap());

/// DD-MM-YYYY or DD/MM/YYYY.
static DAY_FIRST_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})([-/])([0-9]{2})([-/])([0-9]{4})$").unwrap());

/// Month D, YYYY.
static MONTH_NAME_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+) ([0-9]{1,2}), ([0-9]{4})$").unwrap());

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

// =============================================================================
// WHITESPACE
// =============================================================================

pub fn has_surrounding_whitespace(value: &CellValue) -> bool {
    value.as_str().is_some_and(|s| s.trim() != s)
}

pub fn trim(value: &CellValue) -> CellValue {
    match value {
        CellValue::Text(s) => CellValue::Text(s.trim().to_string()),
        other => other.clone(),
    }
}

// =============================================================================
// EMPTY-LIKE
// =============================================================================

/// Text that only stands in for a missing value: blank, "n/a", "na" or "null".
pub fn is_empty_like(value: &CellValue) -> bool {
    value.as_str().is_some_and(|s| {
        let v = s.trim().to_lowercase();
        matches!(v.as_str(), "" | "n/a" | "na" | "null")
    })
}

pub fn empty_to_null(value: &CellValue) -> CellValue {
    if is_empty_like(value) {
        CellValue::Null
    } else {
        value.clone()
    }
}

// =============================================================================
// CASE
// =============================================================================

/// Lower-case everything, then capitalize each ASCII letter or digit that
/// starts a word. Word characters are `[A-Za-z0-9_]`; anything else,
/// including non-ASCII letters, is a boundary and is never capitalized.
pub fn title_case(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_word = false;
    for ch in lowered.chars() {
        let word_char = ch.is_ascii_alphanumeric() || ch == '_';
        if word_char && !in_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        in_word = word_char;
    }
    out
}

pub fn change_case(value: &CellValue, mode: CaseMode) -> CellValue {
    match value {
        CellValue::Text(s) => CellValue::Text(match mode {
            CaseMode::Lower => s.to_lowercase(),
            CaseMode::Upper => s.to_uppercase(),
            CaseMode::Title => title_case(s),
        }),
        other => other.clone(),
    }
}

// =============================================================================
// NUMBERS
// =============================================================================

/// Numeric value of a strictly numeric string, ignoring surrounding whitespace.
pub fn parse_strict_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if !NUMBER_PATTERN.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn is_numeric_string(value: &CellValue) -> bool {
    value.as_str().and_then(parse_strict_number).is_some()
}

pub fn parse_number(value: &CellValue) -> CellValue {
    match value.as_str().and_then(parse_strict_number) {
        Some(n) => CellValue::Number(n),
        None => value.clone(),
    }
}

// =============================================================================
// DATES
// =============================================================================

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    if lower == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|m| *m == lower || (lower.len() == 3 && m.starts_with(lower.as_str())))
        .map(|i| i as u32 + 1)
}

fn iso_date(year: &str, month: &str, day: &str) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// ISO `YYYY-MM-DD` rendering of a recognized date string.
///
/// Returns `None` for unrecognized shapes, mixed separators, and dates that
/// do not exist on the calendar.
pub fn parse_date_safe(value: &str) -> Option<String> {
    let v = value.trim();

    if let Some(caps) = YEAR_FIRST_DATE.captures(v) {
        if caps[2] != caps[4] {
            return None;
        }
        return iso_date(&caps[1], &caps[3], &caps[5]);
    }

    if let Some(caps) = DAY_FIRST_DATE.captures(v) {
        if caps[2] != caps[4] {
            return None;
        }
        return iso_date(&caps[5], &caps[3], &caps[1]);
    }

    if let Some(caps) = MONTH_NAME_DATE.captures(v) {
        let month = month_number(&caps[1])?;
        return iso_date(&caps[3], &month.to_string(), &caps[2]);
    }

    None
}

/// Whether parsing would change the value: it is a recognized date that is
/// not already written as `YYYY-MM-DD`.
pub fn is_convertible_date(value: &CellValue) -> bool {
    value
        .as_str()
        .is_some_and(|s| parse_date_safe(s).is_some_and(|iso| iso != s))
}

pub fn parse_date(value: &CellValue) -> CellValue {
    match value.as_str().and_then(parse_date_safe) {
        Some(iso) => CellValue::Text(iso),
        None => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn test_trim() {
        assert!(has_surrounding_whitespace(&text(" Bob ")));
        assert!(!has_surrounding_whitespace(&text("Bob")));
        assert!(!has_surrounding_whitespace(&CellValue::Number(1.0)));
        assert_eq!(trim(&text("\t x \n")), text("x"));
        assert_eq!(trim(&CellValue::Null), CellValue::Null);
    }

    #[test]
    fn test_empty_like() {
        for v in ["", "  ", "N/A", "na", " NULL ", "n/A"] {
            assert!(is_empty_like(&text(v)), "{v:?} should be empty-like");
        }
        for v in ["none", "0", "-", "nan"] {
            assert!(!is_empty_like(&text(v)), "{v:?} should not be empty-like");
        }
        assert!(!is_empty_like(&CellValue::Null));
        assert_eq!(empty_to_null(&text("N/A")), CellValue::Null);
        assert_eq!(empty_to_null(&text("x")), text("x"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello WORLD"), "Hello World");
        assert_eq!(title_case(" bob "), " Bob ");
        assert_eq!(title_case("o'neil-smith"), "O'Neil-Smith");
        assert_eq!(title_case("snake_case word"), "Snake_case Word");
        assert_eq!(title_case("2nd place"), "2nd Place");
    }

    #[test]
    fn test_title_case_non_ascii_is_stable() {
        assert_eq!(title_case("ßa"), "ßa");
        assert_eq!(title_case("ﬁx"), "ﬁx");
        assert_eq!(title_case("ÉLAN vital"), "éLan Vital");
        assert_eq!(title_case("naïve"), "NaïVe");

        for input in ["ßa", "ﬁx", "ŉa", "aİb", "ÉLAN", "naïve café"] {
            let once = title_case(input);
            assert_eq!(title_case(&once), once, "{input:?}");
        }
    }

    #[test]
    fn test_change_case() {
        assert_eq!(change_case(&text("MiXed"), CaseMode::Lower), text("mixed"));
        assert_eq!(change_case(&text("MiXed"), CaseMode::Upper), text("MIXED"));
        assert_eq!(change_case(&text("miXED up"), CaseMode::Title), text("Mixed Up"));
        assert_eq!(
            change_case(&CellValue::Number(3.0), CaseMode::Upper),
            CellValue::Number(3.0)
        );
    }

    #[test]
    fn test_parse_number_strict() {
        assert_eq!(parse_strict_number(" 42 "), Some(42.0));
        assert_eq!(parse_strict_number("-0.5"), Some(-0.5));
        assert_eq!(parse_strict_number("1,000"), None);
        assert_eq!(parse_strict_number("1e5"), None);
        assert_eq!(parse_strict_number(".5"), None);
        assert_eq!(parse_strict_number("5."), None);
        assert_eq!(parse_strict_number("+5"), None);
        assert_eq!(parse_strict_number("٣"), None);
        assert_eq!(parse_number(&text("30")), CellValue::Number(30.0));
        assert_eq!(parse_number(&text("abc")), text("abc"));
        assert_eq!(parse_number(&CellValue::Null), CellValue::Null);
    }

    #[test]
    fn test_parse_number_rejects_non_finite() {
        let huge = "9".repeat(400);
        assert_eq!(parse_strict_number(&huge), None);
        assert_eq!(parse_number(&text(&huge)), text(&huge));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date_safe("2024/03/15").as_deref(), Some("2024-03-15"));
        assert_eq!(parse_date_safe("15-03-2024").as_deref(), Some("2024-03-15"));
        assert_eq!(parse_date_safe("15/03/2024").as_deref(), Some("2024-03-15"));
        assert_eq!(parse_date_safe("March 5, 2024").as_deref(), Some("2024-03-05"));
        assert_eq!(parse_date_safe("Sep 30, 2023").as_deref(), Some("2023-09-30"));
        assert_eq!(parse_date_safe(" 2024-01-02 ").as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_parse_date_rejects_invalid() {
        assert_eq!(parse_date_safe("2023-02-29"), None);
        assert_eq!(parse_date_safe("31/04/2024"), None);
        assert_eq!(parse_date_safe("2024-01/15"), None);
        assert_eq!(parse_date_safe("Smarch 1, 2024"), None);
        assert_eq!(parse_date_safe("2024-1-5"), None);
        assert_eq!(parse_date_safe("yesterday"), None);
    }

    #[test]
    fn test_convertible_date_skips_canonical() {
        assert!(!is_convertible_date(&text("2024-03-15")));
        assert!(is_convertible_date(&text("2024/03/15")));
        assert!(is_convertible_date(&text(" 2024-03-15")));
        assert_eq!(parse_date(&text("2024-02-30")), text("2024-02-30"));
        assert_eq!(parse_date(&CellValue::Number(2024.0)), CellValue::Number(2024.0));
    }
}
