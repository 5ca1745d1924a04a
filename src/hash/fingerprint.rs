//! Incremental fingerprint accumulation
//!
//! A convenience wrapper around SHA-256 for computing cache keys over mixed
//! inputs. Variable-length inputs are length-prefixed so that split updates
//! and joined updates never collide ("ab" + "c" vs "a" + "bc").

use std::collections::HashMap;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Incremental hash accumulator over bytes, strings, paths, booleans and
/// string maps
#[derive(Debug, Default, Clone)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Start a fresh fingerprint
    pub fn new() -> Self {
        Self::default()
    }

    /// Add raw bytes, unprefixed
    pub fn add_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.hasher.update(bytes);
        self
    }

    /// Add a string, length-prefixed
    pub fn add_string(&mut self, s: &str) -> &mut Self {
        self.add_len(s.len());
        self.hasher.update(s.as_bytes());
        self
    }

    /// Add a list of strings. The count prefix keeps a list distinct from
    /// the same strings added individually.
    pub fn add_strings<I, S>(&mut self, strings: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let strings: Vec<S> = strings.into_iter().collect();
        self.add_len(strings.len());
        for s in &strings {
            self.add_string(s.as_ref());
        }
        self
    }

    /// Add a path by its string representation
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.add_string(&path.as_ref().to_string_lossy())
    }

    /// Add a boolean
    pub fn add_boolean(&mut self, value: bool) -> &mut Self {
        self.hasher.update([value as u8]);
        self
    }

    /// Add a string map. Entries are hashed in key order so the digest does
    /// not depend on map iteration order.
    pub fn add_string_map(&mut self, map: &HashMap<String, String>) -> &mut Self {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        self.add_len(keys.len());
        for key in keys {
            self.add_string(key);
            self.add_string(&map[key]);
        }
        self
    }

    fn add_len(&mut self, len: usize) {
        self.hasher.update((len as u64).to_be_bytes());
    }

    /// Finalize and return the digest as lowercase hex. The accumulator is
    /// consumed; clone it first to take an intermediate digest.
    pub fn hex_digest(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

/// One-shot fingerprint of a single string
pub fn hex_digest_of(s: &str) -> String {
    let mut f = Fingerprint::new();
    f.add_string(s);
    f.hex_digest()
}
