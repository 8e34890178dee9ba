//! Field access over raw MAL API records.
//!
//! Records arrive as parsed JSON. Keys are addressed by dotted path
//! (`statistics.status.watching`) so that a missing nested key is reported
//! with its full location.

use crate::error::ModelError;
use serde_json::Value;

/// Look up a dotted path, treating JSON `null` as absent
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |value, key| value.get(key))
        .filter(|value| !value.is_null())
}

/// Look up a dotted path that must be present
pub fn require<'a>(record: &'a Value, path: &str) -> Result<&'a Value, ModelError> {
    lookup(record, path).ok_or_else(|| ModelError::missing(path))
}

/// Read a catalog identifier
pub fn require_id(record: &Value, path: &str) -> Result<u32, ModelError> {
    let value = require(record, path)?;
    value
        .as_u64()
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(|| ModelError::invalid(path, "catalog id"))
}

/// Read a non-negative count.
///
/// MAL returns status counts as strings (`"plan_to_watch": "1234"`) and
/// favorites as numbers, so both are accepted.
pub fn require_count(record: &Value, path: &str) -> Result<u64, ModelError> {
    let value = require(record, path)?;
    let count = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    count.ok_or_else(|| ModelError::invalid(path, "non-negative count"))
}

/// Read a popularity rank (1 = most popular)
pub fn require_rank(record: &Value, path: &str) -> Result<u32, ModelError> {
    let value = require(record, path)?;
    value
        .as_u64()
        .and_then(|rank| u32::try_from(rank).ok())
        .filter(|rank| *rank >= 1)
        .ok_or_else(|| ModelError::invalid(path, "rank"))
}

/// Read a text field. Numeric titles (an anime called "86") are stringified.
pub fn require_text(record: &Value, path: &str) -> Result<String, ModelError> {
    match require(record, path)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ModelError::invalid(path, "string")),
    }
}

pub fn optional_text(record: &Value, path: &str) -> Option<String> {
    lookup(record, path)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Read a score permissively: absent, null, zero or non-numeric values
/// yield `fallback`.
pub fn score_or(record: &Value, path: &str, fallback: f64) -> f64 {
    lookup(record, path)
        .and_then(Value::as_f64)
        .filter(|score| *score != 0.0)
        .unwrap_or(fallback)
}
