//! Error types for GlobTree
//!
//! This module defines all error types used throughout the engine,
//! providing detailed error information for debugging and user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for glob operations
#[derive(Error, Debug)]
pub enum GlobError {
    /// Malformed glob pattern, detected at compile time before any
    /// filesystem access
    #[error("{reason} in glob pattern '{pattern}'")]
    InvalidPattern {
        /// The offending pattern text
        pattern: String,
        /// What is wrong with it
        reason: String,
    },

    /// I/O failure reported by the filesystem layer during traversal
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Path the failing operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Traversal was cancelled before producing an authoritative result
    #[error("Glob traversal cancelled")]
    Cancelled,

    /// Worker pool could not be constructed
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl GlobError {
    /// Create an invalid-pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is a cancellation outcome rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for glob operations
pub type Result<T> = std::result::Result<T, GlobError>;
