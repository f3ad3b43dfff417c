//! The dispatch table: an exact-match index plus a length-sorted prefix list.
//!
//! Patterns ending in the separator are registered twice: once in the exact
//! index and once in the prefix list. Lookup tries the exact index first and
//! then scans the prefix list from the longest pattern down.
//!
//! The table is not synchronized. [`ServeMux`] guards it with a single
//! reader/writer lock so both indices change together.
//!
//! [`ServeMux`]: crate::ServeMux

use pathmux_core::RegisterError;
use std::collections::HashMap;

/// The default separator.
pub const DEFAULT_SEPARATOR: char = '/';

/// How a lookup matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The path equals the pattern.
    Exact,
    /// The pattern is a prefix of the path.
    Prefix,
}

/// A successful lookup.
#[derive(Debug, PartialEq, Eq)]
pub struct Route<'a, H> {
    /// The registered pattern that matched.
    pub pattern: &'a str,
    /// The handler stored for the pattern.
    pub handler: &'a H,
    /// Whether the match was exact or by prefix.
    pub kind: MatchKind,
}

/// Result of a routing lookup.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteResult<'a, H> {
    /// A pattern matched.
    Matched(Route<'a, H>),
    /// No matching pattern found.
    NotFound,
}

impl<'a, H> RouteResult<'a, H> {
    /// Returns true if a pattern matched.
    pub fn is_matched(&self) -> bool {
        matches!(self, RouteResult::Matched(_))
    }

    /// Returns the match, if any.
    pub fn matched(self) -> Option<Route<'a, H>> {
        match self {
            RouteResult::Matched(route) => Some(route),
            RouteResult::NotFound => None,
        }
    }
}

struct Entry<H> {
    pattern: String,
    handler: H,
}

/// Registered patterns and their handlers.
pub struct DispatchTable<H> {
    separator: char,
    exact: HashMap<String, H>,
    // Ascending by pattern length. Same-length entries keep registration
    // order, earliest at the higher index.
    prefixes: Vec<Entry<H>>,
}

impl<H> Default for DispatchTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> DispatchTable<H> {
    /// Create an empty table using `/` as separator.
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create an empty table with a custom separator.
    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            exact: HashMap::new(),
            prefixes: Vec::new(),
        }
    }

    /// The separator that marks prefix patterns.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns true if `pattern` takes part in prefix matching.
    pub fn is_prefix_pattern(&self, pattern: &str) -> bool {
        pattern.ends_with(self.separator)
    }

    /// Returns true if `pattern` is registered.
    pub fn contains(&self, pattern: &str) -> bool {
        self.exact.contains_key(pattern)
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// All registered patterns, sorted.
    pub fn patterns(&self) -> Vec<&str> {
        let mut patterns: Vec<&str> = self.exact.keys().map(String::as_str).collect();
        patterns.sort_unstable();
        patterns
    }

    /// Prefix patterns in list order, shortest first. Lookup scans from the end.
    pub fn prefix_patterns(&self) -> Vec<&str> {
        self.prefixes.iter().map(|e| e.pattern.as_str()).collect()
    }

    /// Check that `pattern` could be inserted.
    pub fn check(&self, pattern: &str) -> Result<(), RegisterError> {
        if pattern.is_empty() {
            return Err(RegisterError::EmptyPattern);
        }
        if self.exact.contains_key(pattern) {
            return Err(RegisterError::Duplicate(pattern.to_owned()));
        }
        Ok(())
    }

    /// Remove `pattern`, returning its handler. Unknown patterns are a no-op.
    pub fn remove(&mut self, pattern: &str) -> Option<H> {
        let handler = self.exact.remove(pattern)?;
        if self.is_prefix_pattern(pattern) {
            if let Some(index) = self.prefixes.iter().position(|e| e.pattern == pattern) {
                self.prefixes.remove(index);
            }
        }
        Some(handler)
    }

    /// Find the handler for `path`.
    ///
    /// An exact match wins over any prefix match. Otherwise the longest
    /// prefix pattern that `path` starts with wins.
    pub fn lookup(&self, path: &str) -> RouteResult<'_, H> {
        if let Some((pattern, handler)) = self.exact.get_key_value(path) {
            return RouteResult::Matched(Route {
                pattern: pattern.as_str(),
                handler,
                kind: MatchKind::Exact,
            });
        }

        self.prefixes
            .iter()
            .rev()
            .find(|e| path.starts_with(e.pattern.as_str()))
            .map_or(RouteResult::NotFound, |e| {
                RouteResult::Matched(Route {
                    pattern: &e.pattern,
                    handler: &e.handler,
                    kind: MatchKind::Prefix,
                })
            })
    }
}

impl<H: Clone> DispatchTable<H> {
    /// Register `handler` under `pattern`.
    ///
    /// Fails on an empty or already registered pattern, leaving the table
    /// unchanged.
    pub fn insert(&mut self, pattern: &str, handler: H) -> Result<(), RegisterError> {
        self.check(pattern)?;

        if self.is_prefix_pattern(pattern) {
            let index = self
                .prefixes
                .partition_point(|e| e.pattern.len() < pattern.len());
            self.prefixes.insert(
                index,
                Entry {
                    pattern: pattern.to_owned(),
                    handler: handler.clone(),
                },
            );
        }
        self.exact.insert(pattern.to_owned(), handler);
        Ok(())
    }
}
