//! Input sanitization.
//!
//! Every function here takes its input by value and returns a cleaned copy;
//! nothing mutates request state in place. Escaping covers the five HTML
//! special characters only. Values still reach SQL exclusively through bound
//! parameters.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// HTML-escape `&`, `"`, `'`, `<` and `>`.
pub fn escape_special_chars(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape every value of a query-string map. Keys are left as sent.
pub fn sanitize_params(params: HashMap<String, String>) -> HashMap<String, String> {
    params
        .into_iter()
        .map(|(key, value)| (key, escape_special_chars(&value)))
        .collect()
}

/// Escape every top-level string value of a decoded JSON body.
///
/// Numbers, booleans and `null` pass through unchanged so numeric ids keep
/// their type. Nested arrays and objects are not descended into.
pub fn sanitize_body(body: Map<String, Value>) -> Map<String, Value> {
    body.into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => (key, Value::String(escape_special_chars(&text))),
            other => (key, other),
        })
        .collect()
}
