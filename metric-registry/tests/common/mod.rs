#![allow(dead_code)]

use metric_registry::{BoxError, Metric, MetricResult, Params, Value};

/// Dotted identifier of an item under this test crate's root module.
pub fn identifier(path: &str) -> String {
    format!("{}.{path}", env!("CARGO_CRATE_NAME"))
}

fn score(name: &str, version: &str, value: f64) -> Result<MetricResult, BoxError> {
    Ok(MetricResult::new(value, name, version))
}

// ============================================================================
// Exported Test Metrics
// ============================================================================

pub mod metrics {
    pub mod custom {
        use super::super::score;
        use metric_registry::{BoxError, Metric, MetricResult, Params, Value, metric};

        /// Exported for identifier lookup only.
        #[metric]
        #[derive(Debug, Default)]
        pub struct Accuracy;

        impl Metric for Accuracy {
            fn name(&self) -> &str {
                "accuracy"
            }

            fn version(&self) -> &str {
                "1.0.0"
            }

            fn compute(
                &self,
                prediction: &Value,
                target: &Value,
                _: &Params,
            ) -> Result<MetricResult, BoxError> {
                score("accuracy", "1.0.0", if prediction == target { 1.0 } else { 0.0 })
            }
        }

        #[metric(name = "exact_match", version = "1.0.0")]
        #[derive(Debug, Default)]
        pub struct ExactMatch;

        impl Metric for ExactMatch {
            fn name(&self) -> &str {
                "exact_match"
            }

            fn version(&self) -> &str {
                "1.0.0"
            }

            fn compute(
                &self,
                prediction: &Value,
                target: &Value,
                _: &Params,
            ) -> Result<MetricResult, BoxError> {
                score("exact_match", "1.0.0", if prediction == target { 1.0 } else { 0.0 })
            }
        }

        /// Case-insensitive for string values.
        #[metric(name = "exact_match", version = "2.0.0")]
        #[derive(Debug, Default)]
        pub struct ExactMatchV2;

        impl Metric for ExactMatchV2 {
            fn name(&self) -> &str {
                "exact_match"
            }

            fn version(&self) -> &str {
                "2.0.0"
            }

            fn compute(
                &self,
                prediction: &Value,
                target: &Value,
                _: &Params,
            ) -> Result<MetricResult, BoxError> {
                let equal = match (prediction.as_str(), target.as_str()) {
                    (Some(p), Some(t)) => p.eq_ignore_ascii_case(t),
                    _ => prediction == target,
                };
                score("exact_match", "2.0.0", if equal { 1.0 } else { 0.0 })
            }
        }
    }

    pub mod latency {
        use super::super::score;
        use metric_registry::{BoxError, Metric, MetricResult, Params, Value, metric};

        #[metric(name = "latency", version = "1.0.0", backend = "evalscope")]
        #[derive(Debug, Default)]
        pub struct Latency;

        impl Metric for Latency {
            fn name(&self) -> &str {
                "latency"
            }

            fn version(&self) -> &str {
                "1.0.0"
            }

            fn compute(&self, _: &Value, _: &Value, _: &Params) -> Result<MetricResult, BoxError> {
                score("latency", "1.0.0", 0.25)
            }
        }
    }
}

// ============================================================================
// Declaratively Exported Metrics
// ============================================================================

pub mod declarative {
    use super::score;
    use metric_registry::{BoxError, Metric, MetricResult, Params, Value};

    #[derive(Debug, Default)]
    pub struct Recall;

    impl Metric for Recall {
        fn name(&self) -> &str {
            "recall"
        }

        fn version(&self) -> &str {
            "0.1.0"
        }

        fn compute(&self, _: &Value, _: &Value, _: &Params) -> Result<MetricResult, BoxError> {
            score("recall", "0.1.0", 0.5)
        }
    }

    metric_registry::export_metric!(Recall, name = "recall");
}

/// Not exported anywhere.
#[derive(Debug, Default)]
pub struct Unexported;

impl Metric for Unexported {
    fn name(&self) -> &str {
        "unexported"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn compute(&self, _: &Value, _: &Value, _: &Params) -> Result<MetricResult, BoxError> {
        score("unexported", "1.0.0", 0.0)
    }
}
