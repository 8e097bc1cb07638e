//! Collection aggregation
//!
//! Pure, synchronous operations over fetched row collections. Every page
//! that needs a total, a recency ranking, or a histogram goes through these
//! instead of reimplementing the reduction inline. Inputs are never
//! mutated; each operation produces a new derived collection.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

/// Sums the `amount` field across all rows
///
/// JSON numbers pass through (negative amounts included, no clamping);
/// numeric strings coerce; a missing field or non-numeric value counts as
/// zero. An empty collection sums to zero.
pub fn sum_amounts(rows: &[Value]) -> f64 {
    rows.iter()
        .map(|row| coerce_amount(row.get("amount")))
        .sum()
}

fn coerce_amount(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Returns the `n` most recent rows by the named date field
///
/// Rows sort descending by the parsed timestamp. The sort is stable, so
/// equal timestamps keep their insertion order, and rows whose field is
/// missing or unparseable sort after every dated row — output is
/// deterministic for a fixed input. Asking for more rows than exist returns
/// them all.
pub fn most_recent(rows: &[Value], n: usize, date_field: &str) -> Vec<Value> {
    let mut ordered: Vec<&Value> = rows.iter().collect();
    ordered.sort_by(|a, b| row_timestamp(b, date_field).cmp(&row_timestamp(a, date_field)));
    ordered.into_iter().take(n).cloned().collect()
}

fn row_timestamp(row: &Value, date_field: &str) -> Option<DateTime<Utc>> {
    row.get(date_field).and_then(Value::as_str).and_then(parse_timestamp)
}

// The store serializes timestamptz columns as RFC 3339 and date columns as
// bare dates; accept both.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

/// Counts rows per value of the named key field
///
/// Rows whose key is missing or null are dropped from the result rather
/// than bucketed under a sentinel; the histogram only ever contains keys
/// that actually occur. An empty collection yields an empty map. The map
/// carries no ordering guarantee; treat it as a mapping, not a list.
pub fn group_count(rows: &[Value], key_field: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for row in rows {
        match row.get(key_field) {
            None | Some(Value::Null) => continue,
            Some(Value::String(key)) => *counts.entry(key.clone()).or_insert(0) += 1,
            Some(other) => *counts.entry(other.to_string()).or_insert(0) += 1,
        }
    }
    counts
}
