//! Content fingerprinting
//!
//! Incremental hash accumulation used by callers to build cache keys over
//! glob inputs (patterns, roots, options). The glob engine itself performs
//! no caching.

mod fingerprint;

pub use fingerprint::{hex_digest_of, Fingerprint};
