//! Class handles.
//!
//! A [`MetricClass`] is the runtime stand-in for "the metric type itself":
//! it knows where the type was declared, can check whether a metric instance
//! is of that type, and can construct fresh instances. Handles are `Copy`
//! and compare by [`TypeId`], so a handle obtained from a registry lookup is
//! equal to one taken directly from `Type::METRIC_CLASS`.

use crate::{identifier::dotted_module_path, metric::Metric};
use std::{
    any::TypeId,
    fmt,
    hash::{Hash, Hasher},
};

/// An opaque, copyable reference to a metric type.
#[derive(Clone, Copy)]
pub struct MetricClass {
    module_path: &'static str,
    class_name: &'static str,
    type_id: fn() -> TypeId,
    factory: fn() -> Box<dyn Metric>,
}

fn construct<T: Metric + Default>() -> Box<dyn Metric> {
    Box::new(T::default())
}

impl MetricClass {
    /// Describe the metric type `T`, declared in `module_path` (as given by
    /// `module_path!()`) under the name `class_name`.
    ///
    /// This is a `const fn` so handles can live in statics and in
    /// link-time registration tables.
    pub const fn new<T: Metric + Default>(
        module_path: &'static str,
        class_name: &'static str,
    ) -> Self {
        Self {
            module_path,
            class_name,
            type_id: TypeId::of::<T>,
            factory: construct::<T>,
        }
    }

    /// The Rust module path the type was declared in (`a::b::c`).
    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// The module path with `.` separators (`a.b.c`).
    pub fn dotted_module_path(&self) -> String {
        dotted_module_path(self.module_path)
    }

    /// The type name.
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// The full dotted identifier that resolves to this class.
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.dotted_module_path(), self.class_name)
    }

    /// The [`TypeId`] of the described type.
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Returns `true` if this handle describes `T`.
    pub fn is<T: Metric>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }

    /// Returns `true` if `metric` is an instance of the described type.
    pub fn is_instance(&self, metric: &dyn Metric) -> bool {
        metric.as_any().type_id() == self.type_id()
    }

    /// Construct a new instance with the type's `Default` implementation.
    pub fn instantiate(&self) -> Box<dyn Metric> {
        (self.factory)()
    }
}

impl PartialEq for MetricClass {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for MetricClass {}

impl Hash for MetricClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl fmt::Debug for MetricClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricClass")
            .field("module_path", &self.module_path)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for MetricClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module_path, self.class_name)
    }
}
