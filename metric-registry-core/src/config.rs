//! Metric configuration records.

use crate::metric::Params;
use serde::{Deserialize, Serialize};

/// One entry of an evaluation's metric list.
///
/// ```json
/// {"name": "anls", "version": "1.0.0", "backend": "evalscope", "params": {}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Registered metric name, or a dotted class identifier.
    pub name: String,
    /// Requested version; the latest registered version when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Requested backend; the preferred backend when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Parameters forwarded to `Metric::compute`.
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
}

impl MetricConfig {
    /// A config that selects `name` with default version and backend.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pin the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Pin the backend.
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Set one parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_minimal_entries() {
        let configs: Vec<MetricConfig> = serde_json::from_value(json!([
            {"name": "dummy", "version": "1.0.0"},
            {"name": "multi_b", "backend": "b1", "params": {"threshold": 0.5}},
        ]))
        .unwrap();

        assert_eq!(configs[0], MetricConfig::new("dummy").with_version("1.0.0"));
        assert_eq!(
            configs[1],
            MetricConfig::new("multi_b")
                .with_backend("b1")
                .with_param("threshold", json!(0.5))
        );
    }
}
