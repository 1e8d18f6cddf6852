//! Testing utilities for the metric registry.
//!
//! This module provides small, predictable metric implementations for
//! exercising registries and evaluators without real scoring logic.
//!
//! # Metrics
//!
//! - [`UnitMetric`]: always scores `1.0`
//! - [`EqualityMetric`]: scores `1.0` when prediction equals target
//! - [`EchoMetric`]: scores the numeric prediction, optionally scaled
//! - [`FailingMetric`]: always returns an error

use metric_registry_core::{BoxError, Metric, MetricResult, Params, Value};

// ============================================================================
// Unit Metric
// ============================================================================

/// A metric that always returns `1.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitMetric;

impl Metric for UnitMetric {
    fn name(&self) -> &str {
        "unit"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn compute(&self, _: &Value, _: &Value, _: &Params) -> Result<MetricResult, BoxError> {
        Ok(MetricResult::new(1.0, self.name(), self.version()))
    }
}

// ============================================================================
// Equality Metric
// ============================================================================

/// A metric that returns `1.0` if prediction and target are equal JSON
/// values, `0.0` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualityMetric;

impl Metric for EqualityMetric {
    fn name(&self) -> &str {
        "equality"
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
        let value = if prediction == target { 1.0 } else { 0.0 };
        Ok(MetricResult::new(value, self.name(), self.version()))
    }
}

// ============================================================================
// Echo Metric
// ============================================================================

/// A metric that reports the prediction itself as its value.
///
/// The prediction must be a JSON number. A numeric `scale` parameter
/// multiplies the result.
///
/// # Example
///
/// ```rust,ignore
/// let params = json!({"scale": 1000.0}).as_object().unwrap().clone();
/// let result = EchoMetric.compute(&json!(0.25), &Value::Null, &params)?;
/// assert_eq!(result.value, 250.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoMetric;

impl Metric for EchoMetric {
    fn name(&self) -> &str {
        "echo"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn compute(
        &self,
        prediction: &Value,
        _: &Value,
        params: &Params,
    ) -> Result<MetricResult, BoxError> {
        let value = prediction
            .as_f64()
            .ok_or_else(|| format!("prediction is not a number: {prediction}"))?;
        let scale = params.get("scale").and_then(Value::as_f64).unwrap_or(1.0);
        Ok(MetricResult::new(value * scale, self.name(), self.version()))
    }
}

// ============================================================================
// Failing Metric
// ============================================================================

/// A metric whose `compute` always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingMetric;

impl Metric for FailingMetric {
    fn name(&self) -> &str {
        "failing"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn compute(&self, _: &Value, _: &Value, _: &Params) -> Result<MetricResult, BoxError> {
        Err("intentional failure".into())
    }
}
