//! # Validation Issues
//!
//! Validators return `Option<ValidationIssue>`: `None` on success, otherwise
//! the first violation found.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path of the offending field, e.g. `operations[2].asset_id`.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
    /// Offending value as supplied, or null when absent.
    pub value: Value,
}

impl ValidationIssue {
    /// Issue on `field` with no recorded value.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Value::Null,
        }
    }

    /// Record the offending value.
    #[must_use]
    pub fn with_value(mut self, value: impl Serialize) -> Self {
        self.value = serde_json::to_value(value).unwrap_or(Value::Null);
        self
    }

    /// Qualify the field with a parent path.
    #[must_use]
    pub fn prefixed(mut self, parent: &str) -> Self {
        self.field = format!("{parent}.{}", self.field);
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
