//! The metric interface.
//!
//! A metric compares a model prediction with a ground-truth target and
//! produces a [`MetricResult`]. Predictions, targets and parameters are
//! arbitrary JSON values, since the framework does not know what shape a
//! user-supplied metric expects.

use crate::{error::BoxError, result::MetricResult};
use serde_json::{Map, Value};
use std::any::Any;

/// Keyword parameters passed to [`Metric::compute`].
pub type Params = Map<String, Value>;

/// Upcast helper so a `&dyn Metric` can be inspected as `&dyn Any`.
///
/// Implemented for every sized `'static` type; never implement it by hand.
pub trait AsAny: Any {
    /// View `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A metric implementation.
///
/// Types implementing this trait (plus `Default`) can be exported with
/// `#[metric]` and then located by name or dotted identifier at runtime.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// #[metric(name = "exact_match", version = "1.0.0")]
/// struct ExactMatch;
///
/// impl Metric for ExactMatch {
///     fn name(&self) -> &str { "exact_match" }
///     fn version(&self) -> &str { "1.0.0" }
///
///     fn compute(&self, prediction: &Value, target: &Value, _params: &Params)
///         -> Result<MetricResult, BoxError>
///     {
///         let value = if prediction == target { 1.0 } else { 0.0 };
///         Ok(MetricResult::new(value, self.name(), self.version()))
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a metric",
    label = "missing `Metric` implementation",
    note = "Implement `Metric` (and `Default`) to export this type as a metric class."
)]
pub trait Metric: AsAny + Send + Sync {
    /// The metric's registered name.
    fn name(&self) -> &str;

    /// The metric's version string.
    fn version(&self) -> &str;

    /// Compute the metric for one prediction/target pair.
    fn compute(
        &self,
        prediction: &Value,
        target: &Value,
        params: &Params,
    ) -> Result<MetricResult, BoxError>;
}

impl dyn Metric {
    /// Returns `true` if the concrete metric type is `T`.
    pub fn is<T: Metric>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to the concrete metric type.
    pub fn downcast_ref<T: Metric>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
