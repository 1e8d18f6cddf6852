//! Version ordering for registered metrics.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Numeric(u64),
    Text(&'a str),
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
            (Segment::Numeric(_), Segment::Text(_)) => Ordering::Less,
            (Segment::Text(_), Segment::Numeric(_)) => Ordering::Greater,
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A borrowed, comparable view of a dotted version string.
///
/// Segments compare numerically when both are numbers (`1.10.0 > 1.9.0`),
/// text sorts after numbers, and missing trailing segments count as `0`.
/// A `-suffix` marks a pre-release, which sorts before the release it
/// precedes (`1.0.0-rc1 < 1.0.0`).
#[derive(Debug, Clone, Copy)]
pub struct Version<'a>(&'a str);

impl<'a> Version<'a> {
    /// Wrap a version string.
    pub const fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    /// The version string as given.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    // Splits `v1.2.0-rc.1` into `1.2.0` and `Some("rc.1")`.
    fn parts(&self) -> (&'a str, Option<&'a str>) {
        let raw = self.0.trim_start_matches(['v', 'V']);
        match raw.split_once('-') {
            Some((release, pre)) => (release, Some(pre)),
            None => (raw, None),
        }
    }
}

fn segments(s: &str) -> impl Iterator<Item = Segment<'_>> {
    s.split('.').map(|s| match s.parse::<u64>() {
        Ok(n) => Segment::Numeric(n),
        Err(_) => Segment::Text(s),
    })
}

fn cmp_release(lhs: &str, rhs: &str) -> Ordering {
    let mut lhs = segments(lhs);
    let mut rhs = segments(rhs);
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return Ordering::Equal,
            (a, b) => {
                let a = a.unwrap_or(Segment::Numeric(0));
                let b = b.unwrap_or(Segment::Numeric(0));
                match a.cmp(&b) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                }
            }
        }
    }
}

impl Ord for Version<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, lhs_pre) = self.parts();
        let (rhs, rhs_pre) = other.parts();
        cmp_release(lhs, rhs).then_with(|| match (lhs_pre, rhs_pre) {
            (None, None) => Ordering::Equal,
            // A pre-release precedes its release.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => segments(a).cmp(segments(b)),
        })
    }
}

impl PartialOrd for Version<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version<'_> {}

/// Pick the greatest version from an iterator of version strings.
pub fn latest<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().map(Version::new).max().map(|v| v.as_str())
}
