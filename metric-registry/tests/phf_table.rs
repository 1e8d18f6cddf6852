#![cfg(feature = "phf")]

use metric_registry::{
    ClassResolver, Identifier, LookupError, MetricClass, MetricRegistry, PhfClassTable, phf,
    testing::{EqualityMetric, UnitMetric},
};

static CLASSES: phf::Map<&'static str, MetricClass> = phf::phf_map! {
    "bench.metrics.exact.Equality" => MetricClass::new::<EqualityMetric>("bench::metrics::exact", "Equality"),
    "bench.metrics.Unit" => MetricClass::new::<UnitMetric>("bench::metrics", "Unit"),
};

#[test]
fn resolves_from_static_map() {
    let table = PhfClassTable::new(&CLASSES);
    assert_eq!(table.len(), 2);

    let id = Identifier::parse("bench.metrics.exact.Equality").unwrap();
    assert!(table.resolve(&id).unwrap().is::<EqualityMetric>());
    assert!(table.has_module("bench"));
    assert!(table.has_module("bench.metrics.exact"));
    assert!(!table.has_module("bench.met"));
}

#[test]
fn registry_uses_phf_resolver() {
    let registry = MetricRegistry::builder()
        .with_resolver(PhfClassTable::new(&CLASSES))
        .build()
        .unwrap();

    assert!(
        registry
            .get("bench.metrics.Unit")
            .unwrap()
            .is::<UnitMetric>()
    );
    assert!(matches!(
        registry.get("bench.metrics.Missing").unwrap_err().as_lookup(),
        Some(LookupError::ClassNotFound { .. })
    ));
    assert!(matches!(
        registry.get("other.metrics.Unit").unwrap_err().as_lookup(),
        Some(LookupError::ModuleNotFound { .. })
    ));
}
