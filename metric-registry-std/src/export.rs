//! Declarative export of metric types.
//!
//! [`export_metric!`](crate::export_metric) is the `macro_rules!` equivalent of the `#[metric]`
//! attribute, for crates that do not want a proc-macro dependency.

/// Exports a metric type so it can be resolved by dotted identifier.
///
/// The type must be declared in the invoking module, implement
/// `Metric + Default`, and be non-generic. The macro adds a
/// `METRIC_CLASS` associated constant and submits the class to the
/// link-time table. With `name = ...`, the type is also registered as a
/// named metric (`version` defaults to `"0.1.0"`, `backend` to `"native"`).
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// pub struct Accuracy;
/// impl Metric for Accuracy { ... }
///
/// // Resolvable as "my_bench.metrics.custom.Accuracy"
/// export_metric!(Accuracy);
///
/// #[derive(Default)]
/// pub struct Latency;
/// impl Metric for Latency { ... }
///
/// // Also registered as "latency" 1.0.0 on the native backend
/// export_metric!(Latency, name = "latency", version = "1.0.0");
/// ```
#[macro_export]
macro_rules! export_metric {
    (@version) => {
        "0.1.0"
    };
    (@version $version:literal) => {
        $version
    };
    ($ty:ident) => {
        impl $ty {
            /// Class handle for this metric type.
            #[allow(dead_code)]
            pub const METRIC_CLASS: $crate::metric_registry_core::MetricClass =
                $crate::metric_registry_core::MetricClass::new::<$ty>(
                    ::core::module_path!(),
                    ::core::stringify!($ty),
                );
        }

        $crate::inventory::submit! {
            $crate::classes::ClassRegistration::new(<$ty>::METRIC_CLASS)
        }
    };
    ($ty:ident, name = $name:literal $(, version = $version:literal)? $(, backend = $backend:literal)? $(,)?) => {
        $crate::export_metric!($ty);

        $crate::inventory::submit! {
            $crate::registry::MetricRegistration::new(
                $name,
                $crate::export_metric!(@version $($version)?),
                <$ty>::METRIC_CLASS,
            )
            $(.with_backend($backend))?
        }
    };
}
