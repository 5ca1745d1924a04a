//! Segment and whole-path matching
//!
//! Matching never special-cases hidden files: `*` matches `.hidden` like any
//! other name. The `.`/`..` pseudo-entries are simply never presented to the
//! matcher by the traversal layer.

use std::collections::HashMap;

use crate::error::Result;
use crate::pattern::{Pattern, Segment};

impl Segment {
    /// Decide whether a single path component matches this segment.
    ///
    /// The recursive marker matches any single name; its zero-or-more-levels
    /// behavior lives in [`match_segments`] and in the traversal engine.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == name,
            Self::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
            Self::Regex(regex) => regex.is_match(name),
            Self::Recursive => true,
        }
    }
}

/// Match a compiled segment sequence against path components, expanding the
/// recursive marker to zero or more levels.
fn match_segments(segments: &[Segment], components: &[&str]) -> bool {
    match segments.split_first() {
        None => components.is_empty(),
        Some((Segment::Recursive, rest)) => {
            // Match here, or consume one or more components and stay deeper.
            (0..=components.len()).any(|skip| match_segments(rest, &components[skip..]))
        }
        Some((segment, rest)) => components
            .split_first()
            .map(|(first, tail)| segment.matches(first) && match_segments(rest, tail))
            .unwrap_or(false),
    }
}

/// Cache of compiled patterns for repeated one-off matching
#[derive(Debug, Default)]
pub struct MatchCache {
    patterns: HashMap<String, Pattern>,
}

impl MatchCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a compiled pattern, compiling and storing it on first use
    pub fn get_or_compile(&mut self, pattern: &str) -> Result<&Pattern> {
        if !self.patterns.contains_key(pattern) {
            let compiled = Pattern::compile(pattern)?;
            self.patterns.insert(pattern.to_string(), compiled);
        }
        Ok(&self.patterns[pattern])
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Match a pattern against a relative path string without any traversal.
///
/// Uses the same compiler and semantics as the traversal engine, including
/// recursive `**` expansion.
///
/// ```
/// assert!(globtree::matches("foo/**/*", "foo/bar/baz").unwrap());
/// assert!(!globtree::matches("foo/**/*", "foo").unwrap());
/// ```
pub fn matches(pattern: &str, path: &str) -> Result<bool> {
    let compiled = Pattern::compile(pattern)?;
    let components: Vec<&str> = path.split('/').collect();
    Ok(match_segments(compiled.segments(), &components))
}

/// [`matches`] with a caller-owned compiled-pattern cache
pub fn matches_with_cache(pattern: &str, path: &str, cache: &mut MatchCache) -> Result<bool> {
    let compiled = cache.get_or_compile(pattern)?;
    let components: Vec<&str> = path.split('/').collect();
    Ok(match_segments(compiled.segments(), &components))
}
