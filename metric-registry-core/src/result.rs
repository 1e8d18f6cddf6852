//! Metric results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Standard structure for metric results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// The computed value.
    pub value: f64,
    /// Name of the metric that produced the value.
    pub name: String,
    /// Version of the metric that produced the value.
    pub version: String,
    /// Free-form details (errors, per-field breakdowns, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl MetricResult {
    /// Create a result with no metadata.
    pub fn new(value: f64, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
            version: version.into(),
            metadata: None,
        }
    }

    /// A zero-valued result recording why the metric could not be computed.
    pub fn failed(name: impl Into<String>, version: impl Into<String>, error: impl Display) -> Self {
        Self::new(0.0, name, version).with_metadata("error", Value::String(error.to_string()))
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Look up a metadata entry.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref()?.get(key)
    }

    /// The recorded error message, if this result represents a failure.
    pub fn error(&self) -> Option<&str> {
        self.metadata_value("error")?.as_str()
    }
}
