//! # metric-registry-std
//!
//! Standard implementations for the metric registry.
//!
//! This crate provides:
//! - **Class tables**: [`ClassTable`], [`ClassResolver`], and the link-time
//!   [`ClassRegistration`] collection
//! - **Named registry**: [`MetricRegistry`] with version and backend selection
//! - **Evaluation**: [`MetricEvaluator`] and result aggregation
//! - **Declarative export**: the [`export_metric!`] macro
//! - **Testing utilities**: small deterministic metrics in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use metric_registry_core;

pub use inventory;

mod export;
mod log;

pub mod classes;
pub mod evaluator;
pub mod registry;
pub mod testing;

pub use classes::{ClassRegistration, ClassResolver, ClassTable, ClassTableBuilder};
pub use evaluator::{
    AggregationStrategy, EvaluationResults, MetricEvaluator, ParseStrategyError,
    STRUCTURAL_FIDELITY,
};
pub use registry::{
    DEFAULT_BACKEND, MetricEntry, MetricRegistration, MetricRegistry, MetricRegistryBuilder,
    default_registry,
};

#[cfg(feature = "phf")]
pub use classes::PhfClassTable;
