//! Filesystem capability layer
//!
//! The traversal engine depends only on the narrow [`FilesystemCalls`]
//! interface, never on a concrete filesystem, so it can be tested against
//! the in-memory double in [`memory`].

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::InMemoryFilesystem;

use std::io;
use std::path::Path;

/// Symlink resolution policy for stat and readdir calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symlinks {
    /// Resolve symlinks to their targets
    Follow,
    /// Report symlinks as symlinks
    NoFollow,
}

/// Type of a directory entry or statted path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link (only reported under [`Symlinks::NoFollow`])
    Symlink,
    /// Anything else (fifo, socket, device)
    Other,
}

/// Status snapshot for a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatus {
    /// Type of the entity at the path
    pub file_type: FileType,
}

impl FileStatus {
    /// Create a status of the given type
    pub fn new(file_type: FileType) -> Self {
        Self { file_type }
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// A snapshot of one directory entry, not live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirent {
    /// Entry name, a single path component
    pub name: String,
    /// Entry type as reported by the directory listing
    pub file_type: FileType,
}

impl Dirent {
    /// Create a directory entry snapshot
    pub fn new(name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            name: name.into(),
            file_type,
        }
    }
}

/// The filesystem capability consumed by the traversal engine.
///
/// Implementations must be safe for concurrent invocation from multiple
/// traversal tasks; the engine treats them as read-only.
///
/// Absent paths and I/O failures are distinguishable here: `stat_nullable`
/// reports absence as `None`, while `readdir` reports a missing or
/// non-directory path through `io::ErrorKind` and genuine failures (such as
/// permission errors) through any other error kind.
pub trait FilesystemCalls: Send + Sync {
    /// Stat a path, returning `None` if nothing exists there
    fn stat_nullable(&self, path: &Path, symlinks: Symlinks) -> Option<FileStatus>;

    /// List a directory, ordered by entry name
    fn readdir(&self, path: &Path, symlinks: Symlinks) -> io::Result<Vec<Dirent>>;
}
