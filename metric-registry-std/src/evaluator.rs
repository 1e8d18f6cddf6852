//! # Metric Evaluation
//!
//! The evaluator runs a configured list of metrics over one
//! prediction/target pair, looking each metric up in a [`MetricRegistry`],
//! and aggregates per-item results into summary scores.
//!
//! # Example
//!
//! ```rust,ignore
//! let evaluator = MetricEvaluator::new(&registry);
//! let configs: Vec<MetricConfig> = serde_json::from_str(r#"[
//!     {"name": "exact_match", "version": "1.0.0"},
//!     {"name": "structural_fidelity"}
//! ]"#)?;
//!
//! let item = evaluator.evaluate_item(&prediction, &target, &configs, Some(&schema), None)?;
//! let summary = evaluator.aggregate_results(&[item], AggregationStrategy::General);
//! ```

use crate::{
    log,
    registry::{MetricRegistry, default_registry},
};
use metric_registry_core::{MetricConfig, MetricResult, Params, RegistryError, Value};
use std::{collections::BTreeMap, str::FromStr};
use thiserror::Error;

/// Name of the metric that validates output structure.
///
/// When configured, it runs before every other metric and receives the
/// evaluation's schema as its `schema` parameter.
pub const STRUCTURAL_FIDELITY: &str = "structural_fidelity";

/// Per-item results keyed by metric name.
pub type EvaluationResults = BTreeMap<String, MetricResult>;

/// How per-item results are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationStrategy {
    /// Arithmetic mean of each metric over the items that report it.
    #[default]
    General,
}

/// Error returned when parsing an unknown aggregation strategy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown aggregation strategy `{0}`")]
pub struct ParseStrategyError(String);

impl FromStr for AggregationStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(AggregationStrategy::General),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

// A metric runs unless both the evaluation and the config name a backend
// and they differ.
fn backend_selected(active_backend: Option<&str>, config_backend: Option<&str>) -> bool {
    match (active_backend, config_backend) {
        (Some(active), Some(configured)) => active == configured,
        _ => true,
    }
}

/// Orchestrates the evaluation process using registered metrics.
#[derive(Debug, Clone, Copy)]
pub struct MetricEvaluator<'r> {
    registry: &'r MetricRegistry,
}

impl<'r> MetricEvaluator<'r> {
    /// Create an evaluator that looks metrics up in `registry`.
    pub fn new(registry: &'r MetricRegistry) -> Self {
        Self { registry }
    }

    /// The registry metrics are looked up in.
    pub fn registry(&self) -> &'r MetricRegistry {
        self.registry
    }

    /// Evaluate a single item against multiple metrics.
    ///
    /// A [`STRUCTURAL_FIDELITY`] config is evaluated first with `schema`
    /// added to its params; any failure there is returned. Every other
    /// metric's lookup or compute failure is recorded as a failed
    /// [`MetricResult`] instead. When `active_backend` is set, configs
    /// naming a different backend are skipped. Results are keyed by metric
    /// name, so a later config overwrites an earlier one with the same name.
    pub fn evaluate_item(
        &self,
        prediction: &Value,
        target: &Value,
        metrics: &[MetricConfig],
        schema: Option<&Value>,
        active_backend: Option<&str>,
    ) -> Result<EvaluationResults, RegistryError> {
        let mut results = EvaluationResults::new();

        if let Some(config) = metrics.iter().find(|m| m.name == STRUCTURAL_FIDELITY) {
            if backend_selected(active_backend, config.backend.as_deref()) {
                let mut params = config.params.clone();
                if let Some(schema) = schema {
                    params.insert("schema".to_string(), schema.clone());
                }
                let result = self.run(config, prediction, target, &params)?;
                results.insert(STRUCTURAL_FIDELITY.to_string(), result);
            }
        }

        for config in metrics {
            if config.name == STRUCTURAL_FIDELITY {
                continue;
            }
            if !backend_selected(active_backend, config.backend.as_deref()) {
                log::debug!(
                    metric = %config.name,
                    backend = ?config.backend,
                    "skipping metric for inactive backend"
                );
                continue;
            }

            let result = self
                .run(config, prediction, target, &config.params)
                .unwrap_or_else(|err| {
                    let message = match err {
                        RegistryError::Metric { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    log::warning!(metric = %config.name, error = %message, "metric evaluation failed");
                    MetricResult::failed(
                        &config.name,
                        config.version.as_deref().unwrap_or("unknown"),
                        message,
                    )
                });
            results.insert(config.name.clone(), result);
        }

        Ok(results)
    }

    fn run(
        &self,
        config: &MetricConfig,
        prediction: &Value,
        target: &Value,
        params: &Params,
    ) -> Result<MetricResult, RegistryError> {
        let class = self.registry.find(
            &config.name,
            config.version.as_deref(),
            config.backend.as_deref(),
        )?;
        class
            .instantiate()
            .compute(prediction, target, params)
            .map_err(|err| RegistryError::metric(&config.name, err))
    }

    /// Aggregate results from multiple items.
    ///
    /// Items that lack a metric do not count towards that metric's mean.
    pub fn aggregate_results(
        &self,
        results: &[EvaluationResults],
        strategy: AggregationStrategy,
    ) -> BTreeMap<String, f64> {
        match strategy {
            AggregationStrategy::General => {
                let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
                for (name, result) in results.iter().flatten() {
                    let (sum, count) = totals.entry(name.as_str()).or_default();
                    *sum += result.value;
                    *count += 1;
                }
                totals
                    .into_iter()
                    .map(|(name, (sum, count))| (name.to_string(), sum / count as f64))
                    .collect()
            }
        }
    }
}

impl Default for MetricEvaluator<'static> {
    fn default() -> Self {
        Self::new(default_registry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EchoMetric, EqualityMetric, FailingMetric, UnitMetric};
    use metric_registry_core::{BoxError, LookupError, Metric, MetricClass};
    use serde_json::json;

    /// Records the backend label in its metadata.
    #[derive(Default)]
    struct BackendOne;

    impl Metric for BackendOne {
        fn name(&self) -> &str {
            "multi_b"
        }
        fn version(&self) -> &str {
            "1.0.0"
        }
        fn compute(&self, _: &Value, _: &Value, _: &Params) -> Result<MetricResult, BoxError> {
            Ok(MetricResult::new(1.0, "multi_b", "1.0.0").with_metadata("b", json!("b1")))
        }
    }

    #[derive(Default)]
    struct BackendTwo;

    impl Metric for BackendTwo {
        fn name(&self) -> &str {
            "multi_b"
        }
        fn version(&self) -> &str {
            "1.0.0"
        }
        fn compute(&self, _: &Value, _: &Value, _: &Params) -> Result<MetricResult, BoxError> {
            Ok(MetricResult::new(2.0, "multi_b", "1.0.0").with_metadata("b", json!("b2")))
        }
    }

    /// Scores 1.0 when a schema parameter is present.
    #[derive(Default)]
    struct SchemaPresence;

    impl Metric for SchemaPresence {
        fn name(&self) -> &str {
            STRUCTURAL_FIDELITY
        }
        fn version(&self) -> &str {
            "1.0.0"
        }
        fn compute(&self, _: &Value, _: &Value, params: &Params) -> Result<MetricResult, BoxError> {
            let value = if params.contains_key("schema") { 1.0 } else { 0.0 };
            Ok(MetricResult::new(value, STRUCTURAL_FIDELITY, "1.0.0"))
        }
    }

    const MODULE: &str = "bench::evaluator";

    fn registry() -> MetricRegistry {
        MetricRegistry::builder()
            .register("dummy", "1.0.0", MetricClass::new::<EqualityMetric>(MODULE, "Dummy"))
            .register("echo", "1.0.0", MetricClass::new::<EchoMetric>(MODULE, "Echo"))
            .register("failing", "1.0.0", MetricClass::new::<FailingMetric>(MODULE, "Failing"))
            .register_backend("multi_b", "1.0.0", "b1", MetricClass::new::<BackendOne>(MODULE, "One"))
            .register_backend("multi_b", "1.0.0", "b2", MetricClass::new::<BackendTwo>(MODULE, "Two"))
            .register(
                STRUCTURAL_FIDELITY,
                "1.0.0",
                MetricClass::new::<SchemaPresence>(MODULE, "SchemaPresence"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn evaluates_configured_metrics() {
        let registry = registry();
        let evaluator = MetricEvaluator::new(&registry);
        let configs = [
            MetricConfig::new("dummy").with_version("1.0.0"),
            MetricConfig::new(STRUCTURAL_FIDELITY).with_version("1.0.0"),
        ];

        let results = evaluator
            .evaluate_item(
                &json!({"text": "hello"}),
                &json!({"text": "hello"}),
                &configs,
                Some(&json!({"type": "object"})),
                None,
            )
            .unwrap();

        assert_eq!(results["dummy"].value, 1.0);
        assert_eq!(results[STRUCTURAL_FIDELITY].value, 1.0);
    }

    #[test]
    fn backend_filter() {
        let registry = registry();
        let evaluator = MetricEvaluator::new(&registry);
        let configs = [
            MetricConfig::new("multi_b").with_backend("b1"),
            MetricConfig::new("multi_b").with_backend("b2"),
        ];
        let p = json!("p");
        let t = json!("t");

        let all = evaluator.evaluate_item(&p, &t, &configs, None, None).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["multi_b"].metadata_value("b"), Some(&json!("b2")));

        let b1 = evaluator.evaluate_item(&p, &t, &configs, None, Some("b1")).unwrap();
        assert_eq!(b1["multi_b"].metadata_value("b"), Some(&json!("b1")));

        let b2 = evaluator.evaluate_item(&p, &t, &configs, None, Some("b2")).unwrap();
        assert_eq!(b2["multi_b"].metadata_value("b"), Some(&json!("b2")));

        // Configs without a backend run under any active backend.
        let unpinned = [MetricConfig::new("dummy")];
        let results = evaluator.evaluate_item(&p, &t, &unpinned, None, Some("b1")).unwrap();
        assert!(results.contains_key("dummy"));
    }

    #[test]
    fn failures_are_captured() {
        let registry = registry();
        let evaluator = MetricEvaluator::new(&registry);
        let configs = [
            MetricConfig::new("failing"),
            MetricConfig::new("missing_metric"),
            MetricConfig::new("echo").with_version("9.9.9"),
        ];

        let results = evaluator
            .evaluate_item(&json!(1), &json!(1), &configs, None, None)
            .unwrap();

        assert_eq!(results["failing"].value, 0.0);
        assert_eq!(results["failing"].version, "unknown");
        assert_eq!(results["failing"].error(), Some("intentional failure"));

        assert!(
            results["missing_metric"]
                .error()
                .is_some_and(|e| e.contains("missing_metric"))
        );

        assert_eq!(results["echo"].version, "9.9.9");
        assert!(results["echo"].error().is_some());
    }

    #[test]
    fn params_reach_metric() {
        let registry = registry();
        let evaluator = MetricEvaluator::new(&registry);
        let configs = [MetricConfig::new("echo").with_param("scale", json!(2.0))];

        let results = evaluator
            .evaluate_item(&json!(1.5), &Value::Null, &configs, None, None)
            .unwrap();
        assert_eq!(results["echo"].value, 3.0);
    }

    #[test]
    fn structural_fidelity_errors_propagate() {
        let registry = MetricRegistry::builder()
            .register(
                "unit",
                "1.0.0",
                MetricClass::new::<UnitMetric>(MODULE, "Unit"),
            )
            .build()
            .unwrap();
        let evaluator = MetricEvaluator::new(&registry);
        let configs = [MetricConfig::new(STRUCTURAL_FIDELITY), MetricConfig::new("unit")];

        let err = evaluator
            .evaluate_item(&Value::Null, &Value::Null, &configs, None, None)
            .unwrap_err();
        assert!(matches!(
            err.as_lookup(),
            Some(LookupError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn structural_fidelity_respects_backend_filter() {
        let registry = registry();
        let evaluator = MetricEvaluator::new(&registry);
        let configs = [MetricConfig::new(STRUCTURAL_FIDELITY).with_backend("native")];

        let results = evaluator
            .evaluate_item(&Value::Null, &Value::Null, &configs, None, Some("b1"))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn aggregate_means() {
        let evaluator = MetricEvaluator::new(default_registry());
        let item = |pairs: &[(&str, f64)]| -> EvaluationResults {
            pairs
                .iter()
                .map(|(name, value)| (name.to_string(), MetricResult::new(*value, *name, "1.0.0")))
                .collect()
        };

        let summary = evaluator.aggregate_results(
            &[
                item(&[("a", 1.0), ("b", 0.0)]),
                item(&[("a", 0.0)]),
                item(&[("a", 0.5), ("b", 1.0)]),
            ],
            AggregationStrategy::General,
        );
        assert_eq!(summary["a"], 0.5);
        assert_eq!(summary["b"], 0.5);

        assert!(evaluator.aggregate_results(&[], AggregationStrategy::General).is_empty());
    }

    #[test]
    fn parses_strategy() {
        assert_eq!(
            "general".parse::<AggregationStrategy>(),
            Ok(AggregationStrategy::General)
        );
        assert!("median".parse::<AggregationStrategy>().is_err());
    }
}
