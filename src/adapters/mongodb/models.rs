//! MongoDB Data API request/response models and extended JSON handling

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Request body for the Data API `find` action
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindRequest<'a> {
    /// Linked cluster name
    pub data_source: &'a str,
    /// Database name
    pub database: &'a str,
    /// Collection name
    pub collection: &'a str,
    /// Query filter (empty object matches everything)
    pub filter: Value,
    /// Sort specification, used for stable paging
    pub sort: Value,
    /// Documents to skip
    pub skip: u64,
    /// Maximum documents to return
    pub limit: u64,
}

/// Response body of the Data API `find` action
#[derive(Debug, Deserialize)]
pub struct FindResponse {
    /// Matching documents in relaxed extended JSON
    pub documents: Vec<Value>,
}

/// Reduces MongoDB extended JSON wrappers to plain JSON scalars
///
/// Handles `$oid`, `$date`, `$numberLong`, `$numberInt`, `$numberDouble`
/// and `$numberDecimal`, recursively through arrays and objects. Dates are
/// rendered as RFC 3339 strings in UTC.
pub fn normalize_extended_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some((key, inner)) = map.iter().next() {
                    if let Some(scalar) = unwrap_wrapper(key, inner) {
                        return scalar;
                    }
                }
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, normalize_extended_json(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(normalize_extended_json).collect())
        }
        other => other,
    }
}

fn unwrap_wrapper(key: &str, inner: &Value) -> Option<Value> {
    match (key, inner) {
        ("$oid", Value::String(s)) => Some(Value::String(s.clone())),
        ("$date", Value::String(s)) => Some(Value::String(s.clone())),
        ("$date", Value::Number(n)) => n.as_i64().and_then(millis_to_rfc3339),
        ("$date", Value::Object(m)) => m
            .get("$numberLong")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(millis_to_rfc3339),
        ("$numberLong" | "$numberInt", Value::String(s)) => {
            s.parse::<i64>().ok().map(|i| Value::Number(i.into()))
        }
        ("$numberDouble" | "$numberDecimal", Value::String(s)) => Some(
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                // NaN, Infinity and out-of-range decimals stay textual
                .unwrap_or_else(|| Value::String(s.clone())),
        ),
        _ => None,
    }
}

fn millis_to_rfc3339(millis: i64) -> Option<Value> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
}
