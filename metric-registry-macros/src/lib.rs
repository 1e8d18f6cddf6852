//! Procedural macros for the metric registry.
//!
//! Use these through the `metric-registry` facade crate, which re-exports
//! them when the `macros` feature is enabled.

use proc_macro::TokenStream;

mod metric;

/// Export a metric type for lookup by dotted identifier.
///
/// The type must implement `Metric + Default` and must not be generic. It
/// becomes resolvable as `<crate>.<module path>.<TypeName>` and gains a
/// `METRIC_CLASS` associated constant.
///
/// With `name = "..."` the type is also registered as a named metric.
/// `version` defaults to `"0.1.0"` and `backend` to `"native"`.
///
/// # Example
///
/// ```rust,ignore
/// use metric_registry::{metric, Metric};
///
/// #[metric]
/// #[derive(Default)]
/// pub struct Accuracy;
///
/// #[metric(name = "latency", version = "1.0.0", backend = "evalscope")]
/// #[derive(Default)]
/// pub struct Latency;
/// ```
#[proc_macro_attribute]
pub fn metric(attr: TokenStream, item: TokenStream) -> TokenStream {
    metric::metric_impl(attr, item)
}
