//! Registry module for metric lookup.
//!
//! This module provides a builder pattern for registering metrics under a
//! name, version and backend, and a frozen registry that resolves both
//! registered names and dotted class identifiers.

mod cache;

use self::cache::ResolutionCache;
use crate::{
    classes::{ClassResolver, ClassTable, ClassTableBuilder},
    log,
};
use metric_registry_core::{
    Identifier, LookupError, MetricClass, RegistrationError, RegistryError, Version, latest,
};
use std::{collections::HashMap, fmt, sync::OnceLock};

/// Backend assumed for registrations that do not name one, and preferred
/// when a lookup does not ask for one.
pub const DEFAULT_BACKEND: &str = "native";

/// Registration entry for a named metric in the link-time table.
///
/// This struct is submitted to `inventory` by `#[metric(name = ...)]` and
/// collected by [`MetricRegistry::collected`] and [`default_registry`].
pub struct MetricRegistration {
    name: &'static str,
    version: &'static str,
    backend: &'static str,
    class: MetricClass,
}

impl MetricRegistration {
    /// Register `class` as `name` at `version` on the default backend.
    pub const fn new(name: &'static str, version: &'static str, class: MetricClass) -> Self {
        Self {
            name,
            version,
            backend: DEFAULT_BACKEND,
            class,
        }
    }

    /// Set the backend.
    pub const fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = backend;
        self
    }

    /// The registered class.
    pub fn class(&self) -> MetricClass {
        self.class
    }

    fn to_entry(&self) -> MetricEntry {
        MetricEntry::new(self.name, self.version, self.backend, self.class)
    }
}

inventory::collect!(MetricRegistration);

/// A named metric with its version, backend and class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricEntry {
    name: String,
    version: String,
    backend: String,
    class: MetricClass,
}

impl MetricEntry {
    /// Create a new entry.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        backend: impl Into<String>,
        class: MetricClass,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            backend: backend.into(),
            class,
        }
    }

    /// The registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registered version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The registered backend.
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// The class handle.
    pub fn class(&self) -> MetricClass {
        self.class
    }

    fn key(&self) -> String {
        format!(
            "metric `{}` version `{}` backend `{}`",
            self.name, self.version, self.backend
        )
    }
}

fn same_version(a: &str, b: &str) -> bool {
    Version::new(a) == Version::new(b)
}

fn insert_entry(
    metrics: &mut HashMap<String, Vec<MetricEntry>>,
    entry: MetricEntry,
) -> Result<(), RegistrationError> {
    for (field, value) in [
        ("name", &entry.name),
        ("version", &entry.version),
        ("backend", &entry.backend),
    ] {
        if value.trim().is_empty() {
            return Err(RegistrationError::InvalidEntry {
                reason: format!("empty {field} for class `{}`", entry.class),
            });
        }
    }

    let entries = metrics.entry(entry.name.clone()).or_default();
    // One spelling per version, so lookups and `latest` stay deterministic.
    if let Some(existing) = entries
        .iter()
        .find(|e| e.version != entry.version && same_version(&e.version, &entry.version))
    {
        return Err(RegistrationError::Duplicate {
            key: format!(
                "{} (already registered as version `{}`)",
                entry.key(),
                existing.version
            ),
        });
    }

    match entries
        .iter()
        .find(|e| e.version == entry.version && e.backend == entry.backend)
    {
        Some(existing) if existing.class == entry.class => Ok(()),
        Some(_) => Err(RegistrationError::Duplicate { key: entry.key() }),
        None => {
            entries.push(entry);
            Ok(())
        }
    }
}

// ============================================================================
// MetricRegistryBuilder - for constructing registries
// ============================================================================

/// Builder for constructing a [`MetricRegistry`].
///
/// Use this to register metrics, then call `.build()` to create an
/// immutable, thread-safe registry.
///
/// # Example
/// ```ignore
/// let registry = MetricRegistry::builder()
///     .register("exact_match", "1.0.0", ExactMatch::METRIC_CLASS)
///     .register_backend("anls", "1.0.0", "evalscope", Anls::METRIC_CLASS)
///     .build()?;
/// ```
#[derive(Default)]
pub struct MetricRegistryBuilder {
    entries: Vec<MetricEntry>,
    resolver: Option<Box<dyn ClassResolver>>,
}

impl MetricRegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric on the default backend.
    pub fn register(self, name: &str, version: &str, class: MetricClass) -> Self {
        self.register_backend(name, version, DEFAULT_BACKEND, class)
    }

    /// Register a metric on a specific backend.
    pub fn register_backend(
        mut self,
        name: &str,
        version: &str,
        backend: &str,
        class: MetricClass,
    ) -> Self {
        self.register_entry_mut(MetricEntry::new(name, version, backend, class));
        self
    }

    /// Register a prepared entry (mutable version).
    pub fn register_entry_mut(&mut self, entry: MetricEntry) {
        self.entries.push(entry);
    }

    /// Add every named metric registered via `inventory`.
    pub fn collected(mut self) -> Self {
        self.entries.extend(
            inventory::iter::<MetricRegistration>
                .into_iter()
                .map(MetricRegistration::to_entry),
        );
        self
    }

    /// Resolve dotted identifiers with `resolver` instead of the collected
    /// class table.
    pub fn with_resolver<R: ClassResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the builder has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the immutable registry.
    ///
    /// Without an explicit resolver, dotted identifiers resolve against every
    /// collected class plus the classes registered on this builder.
    pub fn build(self) -> Result<MetricRegistry, RegistrationError> {
        let mut metrics = HashMap::new();
        for entry in &self.entries {
            insert_entry(&mut metrics, entry.clone())?;
        }

        let resolver: Box<dyn ClassResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => {
                let mut table = ClassTableBuilder::from(ClassTable::collected());
                for entry in &self.entries {
                    table.insert(entry.class)?;
                }
                Box::new(table.build())
            }
        };

        Ok(MetricRegistry::from_parts(metrics, resolver))
    }
}

// ============================================================================
// MetricRegistry - immutable, thread-safe metric lookup
// ============================================================================

/// An immutable, thread-safe registry of metric classes.
///
/// Lookups accept either a registered metric name or a dotted
/// `module.path.ClassName` identifier. Identifier resolutions are memoized,
/// so repeated lookups return the same handle without touching the resolver.
///
/// # Example
/// ```ignore
/// let registry = MetricRegistry::new();
/// let class = registry.get("my_bench.metrics.custom.Accuracy")?;
/// let metric = class.instantiate();
/// ```
pub struct MetricRegistry {
    metrics: HashMap<String, Vec<MetricEntry>>,
    resolver: Box<dyn ClassResolver>,
    cache: ResolutionCache,
}

impl MetricRegistry {
    /// Create a registry with no named metrics that resolves identifiers
    /// against every collected class.
    pub fn new() -> Self {
        Self::from_parts(HashMap::new(), Box::new(ClassTable::collected()))
    }

    /// Create a registry builder.
    pub fn builder() -> MetricRegistryBuilder {
        MetricRegistryBuilder::new()
    }

    /// Create a registry holding every collected class and named metric.
    ///
    /// Unlike [`MetricRegistryBuilder::build`], conflicting registrations do
    /// not fail: the first one seen is kept.
    pub fn collected() -> Self {
        let mut metrics = HashMap::new();
        for registration in inventory::iter::<MetricRegistration> {
            if let Err(_err) = insert_entry(&mut metrics, registration.to_entry()) {
                log::warning!(error = %_err, "skipping collected metric registration");
            }
        }
        Self::from_parts(metrics, Box::new(ClassTable::collected()))
    }

    fn from_parts(
        metrics: HashMap<String, Vec<MetricEntry>>,
        resolver: Box<dyn ClassResolver>,
    ) -> Self {
        Self {
            metrics,
            resolver,
            cache: ResolutionCache::default(),
        }
    }

    /// Look up a metric class by registered name or dotted identifier.
    ///
    /// Registered names win. Anything else must be a valid identifier, and
    /// fails with [`LookupError::InvalidIdentifier`],
    /// [`LookupError::ModuleNotFound`] or [`LookupError::ClassNotFound`].
    pub fn get(&self, identifier: &str) -> Result<MetricClass, RegistryError> {
        self.find(identifier, None, None)
    }

    /// Look up a metric class with an optional version and backend.
    ///
    /// For a registered name, `version = None` selects the latest version
    /// (among those offering `backend`, if given) and `backend = None`
    /// prefers [`DEFAULT_BACKEND`], then the first backend registered for
    /// that version. Unregistered names are resolved as dotted identifiers,
    /// ignoring `version` and `backend`.
    pub fn find(
        &self,
        name: &str,
        version: Option<&str>,
        backend: Option<&str>,
    ) -> Result<MetricClass, RegistryError> {
        if self.metrics.contains_key(name) {
            return Ok(self.entry(name, version, backend)?.class);
        }
        Ok(self.resolve(name)?)
    }

    /// Select the registered entry for `name`.
    pub fn entry(
        &self,
        name: &str,
        version: Option<&str>,
        backend: Option<&str>,
    ) -> Result<&MetricEntry, LookupError> {
        let entries = self
            .metrics
            .get(name)
            .ok_or_else(|| LookupError::MetricNotFound {
                name: name.to_string(),
            })?;
        let offers = |e: &&MetricEntry| backend.is_none_or(|b| e.backend == b);

        let version = match version {
            Some(version) => version,
            None => latest(entries.iter().filter(offers).map(|e| e.version.as_str())).ok_or_else(
                || LookupError::BackendNotFound {
                    name: name.to_string(),
                    version: "*".to_string(),
                    backend: backend.unwrap_or(DEFAULT_BACKEND).to_string(),
                },
            )?,
        };

        let mut at_version = entries
            .iter()
            .filter(|e| same_version(&e.version, version))
            .peekable();
        if at_version.peek().is_none() {
            return Err(LookupError::VersionNotFound {
                name: name.to_string(),
                version: version.to_string(),
            });
        }

        let selected = match backend {
            Some(backend) => at_version.find(|e| e.backend == backend),
            None => {
                let candidates: Vec<_> = at_version.collect();
                candidates
                    .iter()
                    .find(|e| e.backend == DEFAULT_BACKEND)
                    .or(candidates.first())
                    .copied()
            }
        };

        selected.ok_or_else(|| LookupError::BackendNotFound {
            name: name.to_string(),
            version: version.to_string(),
            backend: backend.unwrap_or(DEFAULT_BACKEND).to_string(),
        })
    }

    /// Resolve a dotted `module.path.ClassName` identifier, bypassing
    /// registered names.
    pub fn resolve(&self, identifier: &str) -> Result<MetricClass, LookupError> {
        if let Some(class) = self.cache.get(identifier) {
            log::debug!(identifier = %identifier, "metric class cache hit");
            return Ok(class);
        }

        let class = Identifier::parse(identifier)
            .and_then(|parsed| self.resolver.resolve(&parsed))
            .inspect_err(|_err| {
                log::debug!(identifier = %identifier, error = %_err, "metric lookup failed");
            })?;

        log::debug!(identifier = %identifier, class = %class, "resolved metric class");
        Ok(self.cache.insert(identifier, class))
    }

    /// Check whether `name` is a registered metric name.
    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    /// All registered metric names, sorted.
    pub fn list_metrics(&self) -> Vec<String> {
        let mut names: Vec<_> = self.metrics.keys().cloned().collect();
        names.sort();
        names
    }

    /// Distinct versions registered for `name`, oldest first.
    pub fn versions(&self, name: &str) -> Vec<&str> {
        let mut versions: Vec<&str> = self
            .metrics
            .get(name)
            .into_iter()
            .flatten()
            .map(|e| e.version.as_str())
            .collect();
        versions.sort_by_key(|v| Version::new(*v));
        versions.dedup();
        versions
    }

    /// Backends registered for `name` at `version`, in registration order.
    pub fn backends(&self, name: &str, version: &str) -> Vec<&str> {
        self.metrics
            .get(name)
            .into_iter()
            .flatten()
            .filter(|e| same_version(&e.version, version))
            .map(|e| e.backend.as_str())
            .collect()
    }

    /// Iterate over all registered entries.
    pub fn entries(&self) -> impl Iterator<Item = &MetricEntry> {
        self.metrics.values().flatten()
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.metrics.values().map(Vec::len).sum()
    }

    /// Check if the registry has no named metrics.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Number of memoized identifier resolutions.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop all memoized identifier resolutions.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("metrics", &self.list_metrics())
            .field("cached", &self.cached_len())
            .finish_non_exhaustive()
    }
}

/// The process-wide registry of every collected class and named metric.
///
/// Built on first use with [`MetricRegistry::collected`].
pub fn default_registry() -> &'static MetricRegistry {
    static DEFAULT: OnceLock<MetricRegistry> = OnceLock::new();
    DEFAULT.get_or_init(MetricRegistry::collected)
}
