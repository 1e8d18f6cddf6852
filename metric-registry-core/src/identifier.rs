//! Dotted metric identifiers.
//!
//! An identifier names a metric class by the module it lives in and its type
//! name, joined with dots: `my_bench.metrics.custom.Accuracy`. Rust module
//! paths (`my_bench::metrics::custom`) are rendered with `.` separators so
//! configuration files do not need to know they are talking to Rust.

use crate::error::LookupError;
use std::{fmt, str::FromStr};

/// A parsed `module.path.ClassName` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    raw: String,
    split: usize,
}

impl Identifier {
    /// Parse an identifier, splitting it at the last `.`.
    ///
    /// Fails with [`LookupError::InvalidIdentifier`] if the string is empty,
    /// has no `.`, or contains an empty segment.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let invalid = |reason| LookupError::InvalidIdentifier {
            identifier: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("identifier is empty"));
        }
        let Some(split) = raw.rfind('.') else {
            return Err(invalid("expected `module.path.ClassName`"));
        };
        if raw.split('.').any(str::is_empty) {
            return Err(invalid("identifier has an empty segment"));
        }

        Ok(Self {
            raw: raw.to_string(),
            split,
        })
    }

    /// The module path, e.g. `pkg.mod` for `pkg.mod.Cls`.
    pub fn module_path(&self) -> &str {
        &self.raw[..self.split]
    }

    /// The class name, e.g. `Cls` for `pkg.mod.Cls`.
    pub fn class_name(&self) -> &str {
        &self.raw[self.split + 1..]
    }

    /// The identifier as originally given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Identifier {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

/// Render a Rust module path (`a::b::c`) as a dotted module path (`a.b.c`).
pub fn dotted_module_path(rust_path: &str) -> String {
    rust_path.replace("::", ".")
}

/// Iterate over a dotted module path and all of its ancestors,
/// longest first: `a.b.c`, `a.b`, `a`.
pub fn module_ancestors(module: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(module);
    std::iter::from_fn(move || {
        let current = next?;
        next = current.rfind('.').map(|i| &current[..i]);
        Some(current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_last_dot() {
        let id = Identifier::parse("metrics.custom.Accuracy").unwrap();
        assert_eq!(id.module_path(), "metrics.custom");
        assert_eq!(id.class_name(), "Accuracy");
        assert_eq!(id.to_string(), "metrics.custom.Accuracy");
    }

    #[test]
    fn single_dot_is_enough() {
        let id: Identifier = "pkg.Cls".parse().unwrap();
        assert_eq!(id.module_path(), "pkg");
        assert_eq!(id.class_name(), "Cls");
    }

    #[test]
    fn rejects_malformed() {
        for raw in ["", "no_dots_here", ".Cls", "pkg.", "pkg..Cls", "."] {
            let err = Identifier::parse(raw).unwrap_err();
            match err {
                LookupError::InvalidIdentifier { identifier, .. } => assert_eq!(identifier, raw),
                other => panic!("unexpected error for {raw:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn renders_rust_paths() {
        assert_eq!(dotted_module_path("bench::metrics::custom"), "bench.metrics.custom");
        assert_eq!(dotted_module_path("bench"), "bench");
    }

    #[test]
    fn ancestors_longest_first() {
        let all: Vec<_> = module_ancestors("a.b.c").collect();
        assert_eq!(all, ["a.b.c", "a.b", "a"]);
    }
}
