//! # Class Resolution
//!
//! Rust cannot import a module by name at runtime, so metric classes are
//! located through a link-time registration table instead. Every type
//! exported with `#[metric]` (or [`export_metric!`](crate::export_metric))
//! submits a [`ClassRegistration`] via `inventory`; [`ClassTable::collected`]
//! gathers them into a table keyed by dotted module path and type name.
//!
//! # Choosing a Resolver
//!
//! | Resolver | Use Case |
//! |----------|----------|
//! | `ClassTable::collected()` | Any exported type linked into the binary |
//! | `ClassTableBuilder` | An explicit, hand-picked set of classes |
//! | `PhfClassTable` | A `phf_map!` built at compile time (feature `phf`) |

#[cfg(feature = "phf")]
pub mod phf;

#[cfg(feature = "phf")]
pub use self::phf::PhfClassTable;

use crate::log;
use metric_registry_core::{
    Identifier, LookupError, MetricClass, RegistrationError, module_ancestors,
};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

/// Something that can locate a metric class by module path and name.
///
/// This is the "import" step of identifier resolution. Implementors only
/// answer two questions; [`resolve`](ClassResolver::resolve) turns the
/// answers into the error taxonomy callers see.
pub trait ClassResolver: Send + Sync {
    /// Whether `module` (dotted) exists, i.e. a class is registered in it or
    /// in one of its submodules.
    fn has_module(&self, module: &str) -> bool;

    /// The class named `class_name` declared directly in `module`.
    fn class(&self, module: &str, class_name: &str) -> Option<MetricClass>;

    /// Resolve a parsed identifier.
    fn resolve(&self, identifier: &Identifier) -> Result<MetricClass, LookupError> {
        let module = identifier.module_path();
        let class_name = identifier.class_name();

        if let Some(class) = self.class(module, class_name) {
            return Ok(class);
        }

        if self.has_module(module) {
            Err(LookupError::ClassNotFound {
                identifier: identifier.to_string(),
                module: module.to_string(),
                class: class_name.to_string(),
            })
        } else {
            Err(LookupError::ModuleNotFound {
                identifier: identifier.to_string(),
                module: module.to_string(),
            })
        }
    }
}

impl<R: ClassResolver + ?Sized> ClassResolver for Arc<R> {
    fn has_module(&self, module: &str) -> bool {
        (**self).has_module(module)
    }

    fn class(&self, module: &str, class_name: &str) -> Option<MetricClass> {
        (**self).class(module, class_name)
    }

    fn resolve(&self, identifier: &Identifier) -> Result<MetricClass, LookupError> {
        (**self).resolve(identifier)
    }
}

impl<R: ClassResolver + ?Sized> ClassResolver for Box<R> {
    fn has_module(&self, module: &str) -> bool {
        (**self).has_module(module)
    }

    fn class(&self, module: &str, class_name: &str) -> Option<MetricClass> {
        (**self).class(module, class_name)
    }

    fn resolve(&self, identifier: &Identifier) -> Result<MetricClass, LookupError> {
        (**self).resolve(identifier)
    }
}

/// Registration entry for a metric class in the link-time table.
///
/// This struct is submitted to `inventory` for automatic collection.
pub struct ClassRegistration {
    class: MetricClass,
}

impl ClassRegistration {
    /// Create a registration entry.
    pub const fn new(class: MetricClass) -> Self {
        Self { class }
    }

    /// The registered class.
    pub fn class(&self) -> MetricClass {
        self.class
    }
}

inventory::collect!(ClassRegistration);

fn check_class(class: &MetricClass) -> Result<(), RegistrationError> {
    let invalid = |reason: &str| RegistrationError::InvalidEntry {
        reason: format!("{reason} (class `{class}`)"),
    };

    if class.module_path().is_empty() {
        return Err(invalid("empty module path"));
    }
    if class.class_name().is_empty() || class.class_name().contains(['.', ':']) {
        return Err(invalid("class name must be a bare type name"));
    }
    Ok(())
}

/// A table of metric classes keyed by dotted module path and type name.
#[derive(Default)]
pub struct ClassTable {
    modules: HashMap<String, HashMap<&'static str, MetricClass>>,
    known_modules: HashSet<String>,
}

impl ClassTable {
    /// Create an empty table builder.
    pub fn builder() -> ClassTableBuilder {
        ClassTableBuilder::default()
    }

    /// Build a table from every class registered via `inventory`.
    ///
    /// Conflicting registrations (two different types claiming the same
    /// path) keep the first one seen.
    pub fn collected() -> Self {
        let mut builder = ClassTableBuilder::default();
        for registration in inventory::iter::<ClassRegistration> {
            if let Err(_err) = builder.insert(registration.class()) {
                log::warning!(error = %_err, "skipping collected metric class");
            }
        }
        builder.table
    }

    /// Get the number of classes in the table.
    pub fn len(&self) -> usize {
        self.modules.values().map(HashMap::len).sum()
    }

    /// Check if the table has no classes.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate over all classes in the table, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = MetricClass> + '_ {
        self.modules.values().flat_map(|classes| classes.values().copied())
    }

    /// The dotted identifiers of all classes, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.iter().map(|class| class.identifier()).collect();
        ids.sort();
        ids
    }
}

impl ClassResolver for ClassTable {
    fn has_module(&self, module: &str) -> bool {
        self.known_modules.contains(module)
    }

    fn class(&self, module: &str, class_name: &str) -> Option<MetricClass> {
        self.modules.get(module)?.get(class_name).copied()
    }
}

/// Builder for [`ClassTable`].
#[derive(Default)]
pub struct ClassTableBuilder {
    table: ClassTable,
}

impl From<ClassTable> for ClassTableBuilder {
    fn from(table: ClassTable) -> Self {
        Self { table }
    }
}

impl ClassTableBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class.
    ///
    /// Inserting the same type at the same path twice is a no-op; a
    /// different type at an occupied path is a duplicate.
    pub fn insert(&mut self, class: MetricClass) -> Result<(), RegistrationError> {
        check_class(&class)?;

        let module = class.dotted_module_path();
        let classes = self.table.modules.entry(module.clone()).or_default();
        match classes.get(class.class_name()) {
            Some(existing) if *existing == class => return Ok(()),
            Some(_) => {
                return Err(RegistrationError::Duplicate {
                    key: format!("class `{}`", class.identifier()),
                });
            }
            None => {
                classes.insert(class.class_name(), class);
            }
        }

        for ancestor in module_ancestors(&module) {
            if !self.table.known_modules.insert(ancestor.to_string()) {
                break;
            }
        }
        Ok(())
    }

    /// Insert a class (chaining version).
    pub fn with(mut self, class: MetricClass) -> Result<Self, RegistrationError> {
        self.insert(class)?;
        Ok(self)
    }

    /// Insert every class registered via `inventory`.
    pub fn collected(mut self) -> Result<Self, RegistrationError> {
        for registration in inventory::iter::<ClassRegistration> {
            self.insert(registration.class())?;
        }
        Ok(self)
    }

    /// Build the table.
    pub fn build(self) -> ClassTable {
        self.table
    }
}
