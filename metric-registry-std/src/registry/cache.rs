//! Memoization of resolved identifiers.

use metric_registry_core::MetricClass;
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

/// A concurrent cache of identifier resolutions.
///
/// Class identity is fixed once the binary is linked, so entries never
/// expire. Only successful resolutions are stored.
#[derive(Default)]
pub(crate) struct ResolutionCache {
    entries: RwLock<HashMap<String, MetricClass>>,
}

impl ResolutionCache {
    pub(crate) fn get(&self, identifier: &str) -> Option<MetricClass> {
        // Entries are plain `Copy` values, so a poisoned lock still holds a
        // consistent map.
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(identifier)
            .copied()
    }

    pub(crate) fn insert(&self, identifier: &str, class: MetricClass) -> MetricClass {
        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(identifier.to_string())
            .or_insert(class)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub(crate) fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
