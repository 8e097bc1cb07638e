//! Client-side free-text filtering
//!
//! Every directory page filters its fetched collection with the same
//! case-insensitive substring predicate instead of rolling its own. The
//! filter is a pure function: it never mutates its input, and filtering an
//! already-filtered collection with the same query is a no-op.

use serde_json::Value;

/// Filters rows to those where any named field contains the query
///
/// An empty or all-whitespace query returns the full collection in its
/// original order. Matching is case-insensitive substring containment over
/// the named fields; a field name may be a `.`-separated path into an
/// embedded resource (`profiles.full_name`). Missing fields read as empty
/// strings and never match a non-empty query.
pub fn filter_rows(rows: &[Value], query: &str, fields: &[&str]) -> Vec<Value> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .filter(|row| {
            fields
                .iter()
                .any(|field| field_text(row, field).to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Reads a field as text, following `.`-separated paths into nested objects
///
/// Non-string scalars render with their JSON representation so numeric
/// fields are still searchable; missing and null values read as empty.
pub fn field_text(row: &Value, path: &str) -> String {
    let mut current = row;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return String::new(),
        }
    }

    match current {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
