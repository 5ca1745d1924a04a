//! Traversal engine and public builder API
//!
//! Walks the directory tree from a root, driving segment matchers level by
//! level, forking concurrent work for fan-out, and assembling a
//! deduplicated, sorted result.

mod builder;
mod engine;

pub use builder::GlobBuilder;
