//! Request parameter parsing shared by the entity services.
//!
//! Query-string values arrive as strings and JSON body values arrive as
//! [`serde_json::Value`]. Both go through the same lenient numeric rule so an
//! id of `"7"`, `7`, `" 7 "` or `7.0` is accepted everywhere.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{CatalogError, CatalogResult};

/// Fixed page size for every paginated listing.
pub const PAGE_SIZE: i64 = 10;

/// Parse a numeric string, truncating any fractional part toward zero.
///
/// Accepts surrounding whitespace, a leading sign, a decimal point and an
/// exponent. Rejects empty strings, hex, `inf` and `NaN`.
pub fn parse_numeric(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let plain = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !plain || !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() < i64::MAX as f64)
        .map(|value| value.trunc() as i64)
}

/// Optional integer id from the query string.
pub fn optional_id(params: &HashMap<String, String>, key: &str) -> CatalogResult<Option<i64>> {
    match params.get(key) {
        None => Ok(None),
        Some(raw) => parse_numeric(raw)
            .map(Some)
            .ok_or_else(|| CatalogError::validation(format!("Invalid {key}. Must be an integer."))),
    }
}

/// Optional 1-indexed page number from the query string.
pub fn optional_page(params: &HashMap<String, String>) -> CatalogResult<Option<i64>> {
    match params.get("page") {
        None => Ok(None),
        Some(raw) => parse_numeric(raw)
            .filter(|page| *page >= 1)
            .map(Some)
            .ok_or_else(|| CatalogError::validation("Invalid page. Must be a positive integer.")),
    }
}

/// `OFFSET` for a 1-indexed page. Saturates instead of overflowing, so an
/// absurdly large page reads past the end and yields no rows.
pub fn page_offset(page: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

/// An integer field read from a decoded JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyInt {
    /// Absent or `null`.
    Missing,
    /// Present but not numeric.
    Invalid,
    Value(i64),
}

impl BodyInt {
    pub fn read(body: &Map<String, Value>, key: &str) -> Self {
        match body.get(key) {
            None | Some(Value::Null) => BodyInt::Missing,
            Some(Value::Number(number)) => number
                .as_i64()
                .or_else(|| {
                    number
                        .as_f64()
                        .filter(|value| value.is_finite() && value.abs() < i64::MAX as f64)
                        .map(|value| value.trunc() as i64)
                })
                .map_or(BodyInt::Invalid, BodyInt::Value),
            Some(Value::String(raw)) => parse_numeric(raw).map_or(BodyInt::Invalid, BodyInt::Value),
            Some(_) => BodyInt::Invalid,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, BodyInt::Missing)
    }
}

/// A string field read from a decoded JSON body. `Err(())` when present but
/// not a JSON string.
pub fn body_string(body: &Map<String, Value>, key: &str) -> Option<Result<String, ()>> {
    match body.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(Ok(value.clone())),
        Some(_) => Some(Err(())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn numeric_strings_follow_the_lenient_rule() {
        assert_eq!(parse_numeric("42"), Some(42));
        assert_eq!(parse_numeric(" 42 "), Some(42));
        assert_eq!(parse_numeric("-3"), Some(-3));
        assert_eq!(parse_numeric("+8"), Some(8));
        assert_eq!(parse_numeric("7.9"), Some(7));
        assert_eq!(parse_numeric("1e2"), Some(100));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("12abc"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("."), None);
    }

    #[test]
    fn invalid_id_names_the_parameter() {
        let err = optional_id(&query(&[("author_id", "x")]), "author_id").unwrap_err();
        assert_eq!(err.to_string(), "Invalid author_id. Must be an integer.");
        assert_eq!(optional_id(&query(&[]), "author_id").unwrap(), None);
        assert_eq!(
            optional_id(&query(&[("content_id", "5")]), "content_id").unwrap(),
            Some(5)
        );
    }

    #[test]
    fn page_must_be_positive() {
        for bad in ["0", "-1", "abc", ""] {
            let err = optional_page(&query(&[("page", bad)])).unwrap_err();
            assert_eq!(err.to_string(), "Invalid page. Must be a positive integer.");
        }
        assert_eq!(optional_page(&query(&[("page", "3")])).unwrap(), Some(3));
        assert_eq!(
            optional_page(&query(&[("page", "5000000000")])).unwrap(),
            Some(5_000_000_000)
        );
        assert_eq!(optional_page(&query(&[])).unwrap(), None);
    }

    #[test]
    fn offsets_are_one_indexed() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), 10);
        assert_eq!(page_offset(11), 100);
        assert_eq!(page_offset(i64::MAX), i64::MAX);
    }

    #[test]
    fn body_ints_accept_numbers_and_numeric_strings() {
        let body = json!({
            "a": 3,
            "b": "4",
            "c": 5.5,
            "d": "five",
            "e": null,
            "f": [1],
            "g": true,
        });
        let body = body.as_object().unwrap();
        assert_eq!(BodyInt::read(body, "a"), BodyInt::Value(3));
        assert_eq!(BodyInt::read(body, "b"), BodyInt::Value(4));
        assert_eq!(BodyInt::read(body, "c"), BodyInt::Value(5));
        assert_eq!(BodyInt::read(body, "d"), BodyInt::Invalid);
        assert_eq!(BodyInt::read(body, "e"), BodyInt::Missing);
        assert_eq!(BodyInt::read(body, "f"), BodyInt::Invalid);
        assert_eq!(BodyInt::read(body, "g"), BodyInt::Invalid);
        assert_eq!(BodyInt::read(body, "zzz"), BodyInt::Missing);
    }

    #[test]
    fn body_strings_reject_non_strings() {
        let body = json!({ "name": "Best Paper", "n": 1, "z": null });
        let body = body.as_object().unwrap();
        assert_eq!(body_string(body, "name"), Some(Ok("Best Paper".to_string())));
        assert_eq!(body_string(body, "n"), Some(Err(())));
        assert_eq!(body_string(body, "z"), None);
        assert_eq!(body_string(body, "missing"), None);
    }
}
