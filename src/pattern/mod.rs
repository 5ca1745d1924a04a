//! Pattern compilation and matching
//!
//! Provides the tokenizing pattern compiler and the per-segment matchers
//! driven by the traversal engine. Wildcard semantics deliberately diverge
//! from shell globs: hidden files are not special-cased, and bracket/brace
//! syntax is rejected outright.

mod compiler;
mod matcher;

pub use compiler::{Pattern, Segment};
pub use matcher::{matches, matches_with_cache, MatchCache};
