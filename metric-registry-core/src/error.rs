//! Error types for the metric registry.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RegistryError`] - Top-level error type for all registry operations
//! - [`LookupError`] - Errors while resolving a name or identifier to a class
//! - [`RegistrationError`] - Errors while building a registry or class table

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A name or identifier could not be resolved.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// A registration was rejected.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// A metric failed while computing its value.
    #[error("metric `{name}` failed")]
    Metric {
        /// Name of the metric that failed.
        name: String,
        /// The error returned by the metric.
        #[source]
        source: BoxError,
    },
}

/// Errors that can occur while resolving a class handle.
///
/// Every variant carries the string the caller asked for, so the error alone
/// is enough to diagnose a bad configuration entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The identifier is not of the form `module.path.ClassName`.
    #[error("invalid metric identifier `{identifier}`: {reason}")]
    InvalidIdentifier {
        /// The identifier as given.
        identifier: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// No registered class lives in the requested module or below it.
    #[error("module `{module}` not found while resolving `{identifier}`")]
    ModuleNotFound {
        /// The identifier as given.
        identifier: String,
        /// The module path part of the identifier.
        module: String,
    },

    /// The module exists but has no class with the requested name.
    #[error("module `{module}` has no metric class `{class}` (resolving `{identifier}`)")]
    ClassNotFound {
        /// The identifier as given.
        identifier: String,
        /// The module path part of the identifier.
        module: String,
        /// The class name part of the identifier.
        class: String,
    },

    /// No metric is registered under the name.
    #[error("metric `{name}` is not registered")]
    MetricNotFound {
        /// The requested metric name.
        name: String,
    },

    /// The metric name is registered, but not with the requested version.
    #[error("metric `{name}` has no version `{version}`")]
    VersionNotFound {
        /// The registered metric name.
        name: String,
        /// The requested version.
        version: String,
    },

    /// The metric name is registered, but no version offers the backend.
    #[error("metric `{name}` (version {version}) has no backend `{backend}`")]
    BackendNotFound {
        /// The registered metric name.
        name: String,
        /// The requested version, or `*` when any version was acceptable.
        version: String,
        /// The requested backend.
        backend: String,
    },
}

impl LookupError {
    /// The name or identifier the caller asked for.
    pub fn identifier(&self) -> &str {
        match self {
            LookupError::InvalidIdentifier { identifier, .. }
            | LookupError::ModuleNotFound { identifier, .. }
            | LookupError::ClassNotFound { identifier, .. } => identifier,
            LookupError::MetricNotFound { name }
            | LookupError::VersionNotFound { name, .. }
            | LookupError::BackendNotFound { name, .. } => name,
        }
    }
}

/// Errors that can occur while building a registry or class table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Two different classes were registered under the same key.
    #[error("duplicate registration for {key}")]
    Duplicate {
        /// Human-readable form of the conflicting key.
        key: String,
    },

    /// A registration has an empty or otherwise unusable field.
    #[error("invalid registration: {reason}")]
    InvalidEntry {
        /// What is wrong with the entry.
        reason: String,
    },
}

impl RegistryError {
    /// Wrap an error returned by a metric's `compute`.
    pub fn metric(name: impl Into<String>, source: BoxError) -> Self {
        RegistryError::Metric {
            name: name.into(),
            source,
        }
    }

    /// The lookup error behind this error, if any.
    pub fn as_lookup(&self) -> Option<&LookupError> {
        match self {
            RegistryError::Lookup(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_errors_carry_identifier() {
        let err = LookupError::ClassNotFound {
            identifier: "pkg.mod.Missing".to_string(),
            module: "pkg.mod".to_string(),
            class: "Missing".to_string(),
        };
        assert_eq!(err.identifier(), "pkg.mod.Missing");
        assert!(err.to_string().contains("pkg.mod.Missing"));
    }

    #[test]
    fn registry_error_wraps_lookup() {
        let err: RegistryError = LookupError::ModuleNotFound {
            identifier: "a.b.C".to_string(),
            module: "a.b".to_string(),
        }
        .into();
        assert!(matches!(
            err.as_lookup(),
            Some(LookupError::ModuleNotFound { .. })
        ));
    }

    #[test]
    fn metric_error_keeps_source() {
        let err = RegistryError::metric("latency", "boom".into());
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("boom"));
    }
}
