//! PHF-based class table.
//!
//! Provides a compile-time perfect hash map of dotted identifiers to class
//! handles. This table is immutable and must be constructed with a static
//! map reference.

use super::ClassResolver;
use metric_registry_core::{Identifier, MetricClass};

/// A class table based on `phf::Map`, keyed by full dotted identifier.
///
/// # Example
///
/// ```rust,ignore
/// static CLASSES: phf::Map<&'static str, MetricClass> = phf::phf_map! {
///     "bench.metrics.Accuracy" => MetricClass::new::<Accuracy>("bench::metrics", "Accuracy"),
/// };
///
/// let registry = MetricRegistry::builder()
///     .with_resolver(PhfClassTable::new(&CLASSES))
///     .build()?;
/// ```
pub struct PhfClassTable {
    map: &'static phf::Map<&'static str, MetricClass>,
}

impl PhfClassTable {
    /// Create a new table from a static PHF map.
    pub const fn new(map: &'static phf::Map<&'static str, MetricClass>) -> Self {
        Self { map }
    }

    /// Get the number of classes in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl ClassResolver for PhfClassTable {
    // Linear in the table size; PHF tables are small and fixed.
    fn has_module(&self, module: &str) -> bool {
        self.map.keys().any(|key| {
            Identifier::parse(key).is_ok_and(|id| {
                let owner = id.module_path();
                owner == module
                    || owner
                        .strip_prefix(module)
                        .is_some_and(|rest| rest.starts_with('.'))
            })
        })
    }

    fn class(&self, module: &str, class_name: &str) -> Option<MetricClass> {
        self.map.get(format!("{module}.{class_name}").as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metric_registry_core::LookupError;
    use crate::testing::{EqualityMetric, UnitMetric};

    static CLASSES: phf::Map<&'static str, MetricClass> = phf::phf_map! {
        "bench.metrics.custom.Unit" => MetricClass::new::<UnitMetric>("bench::metrics::custom", "Unit"),
        "bench.metrics.custom.Equality" => MetricClass::new::<EqualityMetric>("bench::metrics::custom", "Equality"),
    };

    #[test]
    fn resolves_static_entries() {
        let table = PhfClassTable::new(&CLASSES);
        let class = table
            .resolve(&Identifier::parse("bench.metrics.custom.Equality").unwrap())
            .unwrap();
        assert!(class.is::<EqualityMetric>());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn module_and_class_errors() {
        let table = PhfClassTable::new(&CLASSES);
        assert!(table.has_module("bench.metrics"));
        assert!(!table.has_module("bench.met"));

        let err = table
            .resolve(&Identifier::parse("bench.metrics.custom.Nope").unwrap())
            .unwrap_err();
        assert!(matches!(err, LookupError::ClassNotFound { .. }));

        let err = table
            .resolve(&Identifier::parse("other.Unit").unwrap())
            .unwrap_err();
        assert!(matches!(err, LookupError::ModuleNotFound { .. }));
    }
}
