//! The configured set of libraries intros are restricted to.

use std::collections::HashSet;

use serde::Serialize;

use crate::host::LibraryInfo;

/// Library names intros are restricted to.
///
/// Parsed once from the comma-separated `included_libraries` setting. An
/// empty list means no filtering: every movie is eligible. Matching is
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TargetLibraries {
    names: Vec<String>,
}

impl TargetLibraries {
    /// Split on commas, trim each segment, and drop empty ones. Order is
    /// preserved.
    ///
    /// ```
    /// use introgate::filter::TargetLibraries;
    ///
    /// let targets = TargetLibraries::parse("Movies, Kids Movies ,, 4K");
    /// assert_eq!(targets.names(), ["Movies", "Kids Movies", "4K"]);
    /// assert!(TargetLibraries::parse("").is_empty());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let names = raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();

        Self { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `library_name` matches any target, ignoring case.
    pub fn contains(&self, library_name: &str) -> bool {
        self.names.iter().any(|name| same_name(name, library_name))
    }

    /// Whether intros apply to `library`: every library when no targets are
    /// configured, otherwise only the named ones.
    pub fn allows(&self, library: &LibraryInfo) -> bool {
        self.is_empty() || self.contains(&library.name)
    }

    /// Target names that match none of `libraries`, in configured order.
    pub fn missing_from(&self, libraries: &[LibraryInfo]) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| !libraries.iter().any(|library| same_name(name, &library.name)))
            .map(String::as_str)
            .collect()
    }

    /// Names that appear more than once, ignoring case. Reported once each,
    /// in the spelling of their first repeat.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut dupes = Vec::new();

        for name in &self.names {
            let key = name.to_lowercase();
            if !seen.insert(key.clone()) && reported.insert(key) {
                dupes.push(name.as_str());
            }
        }

        dupes
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl<S: Into<String>> FromIterator<S> for TargetLibraries {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
