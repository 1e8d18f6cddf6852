//! # metric-registry - Dotted-Identifier Metric Class Registry
//!
//! `metric-registry` lets configuration files name metric implementations
//! the framework was not compiled against, using dotted identifiers like
//! `my_bench.metrics.custom.Accuracy`. Identifiers are resolved against a
//! link-time table of exported types; resolutions are memoized.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use metric_registry::prelude::*;
//!
//! #[metric]
//! #[derive(Default)]
//! pub struct Accuracy;
//!
//! impl Metric for Accuracy {
//!     fn name(&self) -> &str { "accuracy" }
//!     fn version(&self) -> &str { "1.0.0" }
//!     fn compute(&self, p: &Value, t: &Value, _: &Params) -> Result<MetricResult, BoxError> {
//!         Ok(MetricResult::new(if p == t { 1.0 } else { 0.0 }, "accuracy", "1.0.0"))
//!     }
//! }
//!
//! // Inside crate `my_bench`, module `metrics::custom`:
//! let class = default_registry().get("my_bench.metrics.custom.Accuracy")?;
//! assert!(class.is::<Accuracy>());
//! let metric = class.instantiate();
//! ```
//!
//! ## Named Metrics
//!
//! Types can also be registered under a metric name, version and backend,
//! either with `#[metric(name = "...", version = "...")]` or explicitly on a
//! [`MetricRegistryBuilder`]. Registered names are looked up before dotted
//! identifiers.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use metric_registry_core::{
    // Metric trait
    AsAny,
    // Errors
    BoxError,
    // Identifiers
    Identifier,
    LookupError,
    Metric,
    // Class handle
    MetricClass,
    // Configuration
    MetricConfig,
    MetricResult,
    Params,
    RegistrationError,
    RegistryError,
    Value,
    Version,
    dotted_module_path,
    latest,
    module_ancestors,
};

// Class resolution
pub use metric_registry_std::classes::{
    ClassRegistration, ClassResolver, ClassTable, ClassTableBuilder,
};

#[cfg(feature = "phf")]
pub use metric_registry_std::classes::PhfClassTable;

// Named registry
pub use metric_registry_std::registry::{
    DEFAULT_BACKEND, MetricEntry, MetricRegistration, MetricRegistry, MetricRegistryBuilder,
    default_registry,
};

// Evaluation
pub use metric_registry_std::evaluator::{
    AggregationStrategy, EvaluationResults, MetricEvaluator, ParseStrategyError,
    STRUCTURAL_FIDELITY,
};

pub use metric_registry_std::export_metric;

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use metric_registry_std::testing::*;
}

/// Prelude module - common imports for the metric registry.
///
/// # Usage
///
/// ```rust,ignore
/// use metric_registry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Metric, MetricClass, MetricConfig, MetricRegistry, MetricResult, Params,
        RegistryError, Value, default_registry,
    };

    #[cfg(feature = "macros")]
    pub use crate::metric;
}

#[cfg(feature = "macros")]
pub use metric_registry_macros::metric;

pub use inventory;

#[cfg(feature = "phf")]
pub use phf;
