//! # GlobTree - Concurrent Glob Matching Engine
//!
//! GlobTree enumerates every path under a root directory that matches a set
//! of shell-style glob patterns and none of the exclusion patterns. It is
//! built for build-tool workloads: a tokenizing pattern compiler, a
//! concurrent directory-tree walk over a pluggable filesystem layer, and an
//! explicit two-mode cancellation contract on a caller-supplied thread pool.
//!
//! ## Pattern grammar
//!
//! - `?` matches exactly one arbitrary character within a segment
//! - `*` matches zero or more arbitrary characters within a segment
//! - a segment that is exactly `**` matches zero or more whole directory
//!   levels
//! - hidden files are **not** special-cased: `*` matches `.hidden`
//! - bracket expressions (`[...]`) and brace expansion (`{...}`) are
//!   rejected as invalid patterns
//!
//! ## Quick Start
//!
//! ```no_run
//! use globtree::GlobBuilder;
//!
//! let matches = GlobBuilder::new("/repo")
//!     .add_pattern("src/**/*.rs")
//!     .add_exclude("src/generated/*")
//!     .glob()
//!     .unwrap();
//!
//! for path in matches {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! ## Cancellation
//!
//! ```no_run
//! use globtree::GlobBuilder;
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! let cancel = Arc::new(AtomicBool::new(false));
//! let result = GlobBuilder::new("/repo")
//!     .add_pattern("**")
//!     .cancel_flag(Arc::clone(&cancel))
//!     .glob_interruptible();
//! // result is Err(GlobError::Cancelled) if the flag was set mid-walk.
//! ```
//!
//! ## One-off matching
//!
//! ```
//! assert!(globtree::matches("foo/**/*", "foo/bar/baz").unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hash;
pub mod pattern;
pub mod vfs;
pub mod walk;

// Re-export commonly used types
pub use error::{GlobError, Result};
pub use pattern::{matches, matches_with_cache, MatchCache, Pattern};
pub use walk::GlobBuilder;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use globtree::prelude::*;
    //! ```

    pub use crate::error::{GlobError, Result};
    pub use crate::hash::Fingerprint;
    pub use crate::pattern::{matches, matches_with_cache, MatchCache, Pattern};
    pub use crate::vfs::{Dirent, FileStatus, FileType, FilesystemCalls, Symlinks};
    pub use crate::vfs::{InMemoryFilesystem, LocalFilesystem};
    pub use crate::walk::GlobBuilder;
}
