//! # metric-registry-core
//!
//! Core types for the metric registry.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! crates that implement metrics but don't need the registry itself.
//!
//! # Building Blocks
//!
//! ## [`Identifier`]
//!
//! A dotted `module.path.ClassName` string, split at its last dot. This is
//! what configuration files use to name a metric class that the framework
//! was not compiled against.
//!
//! ## [`MetricClass`]
//!
//! The class handle an identifier resolves to. It is `Copy`, compares by
//! [`TypeId`](std::any::TypeId), and can construct instances or check
//! whether an existing instance is of its type.
//!
//! ## [`Metric`]
//!
//! The trait every metric implements: JSON prediction and target in,
//! [`MetricResult`] out.
//!
//! # Error Types
//!
//! - [`RegistryError`] - Top-level error type
//! - [`LookupError`] - Name and identifier resolution errors
//! - [`RegistrationError`] - Registry construction errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod class;
mod config;
mod error;
mod identifier;
mod metric;
mod result;
mod version;

// Re-exports
pub use class::MetricClass;
pub use config::MetricConfig;
pub use error::{BoxError, LookupError, RegistrationError, RegistryError};
pub use identifier::{Identifier, dotted_module_path, module_ancestors};
pub use metric::{AsAny, Metric, Params};
pub use result::MetricResult;
pub use version::{Version, latest};

/// JSON value type used for predictions, targets and parameters.
pub use serde_json::Value;
