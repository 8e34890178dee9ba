//! Error types for the catalog record model.
//!
//! Application code wraps these in `anyhow::Error`; they stay typed here so
//! callers can tell a malformed record from a degenerate metric.

use thiserror::Error;

/// Failure to build an entity from a raw API record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A required key is absent (or null) in the raw record
    #[error("missing required field `{key}`")]
    MissingField { key: String },

    /// A required key is present but holds the wrong kind of value
    #[error("field `{key}` is not a valid {expected}")]
    InvalidField { key: String, expected: &'static str },
}

impl ModelError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidField {
            key: key.into(),
            expected,
        }
    }
}

/// Failure to compute a derived metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("{metric} is undefined: denominator is zero")]
    DivisionByZero { metric: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_key() {
        let err = ModelError::missing("statistics.status.watching");
        assert_eq!(
            err.to_string(),
            "missing required field `statistics.status.watching`"
        );
    }

    #[test]
    fn test_invalid_field_message() {
        let err = ModelError::invalid("rank", "unsigned integer");
        assert_eq!(err.to_string(), "field `rank` is not a valid unsigned integer");
    }
}
