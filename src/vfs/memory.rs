//! In-memory filesystem double
//!
//! A thread-safe tree of named nodes implementing [`FilesystemCalls`], used
//! to test the traversal engine without touching the real filesystem.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path};
use std::sync::RwLock;

use super::{Dirent, FileStatus, FileType, FilesystemCalls, Symlinks};

#[derive(Debug)]
enum Node {
    Dir(BTreeMap<String, Node>),
    File,
}

impl Node {
    fn file_type(&self) -> FileType {
        match self {
            Self::Dir(_) => FileType::Directory,
            Self::File => FileType::File,
        }
    }
}

/// An in-memory [`FilesystemCalls`] implementation.
///
/// Every path is interpreted relative to a single tree; the absolute prefix
/// is ignored, so `/globtmp/foo` and `globtmp/foo` name the same node.
#[derive(Debug, Default)]
pub struct InMemoryFilesystem {
    root: RwLock<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Self::Dir(BTreeMap::new())
    }
}

fn components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

impl InMemoryFilesystem {
    /// Create an empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory and all missing parents
    pub fn create_dir_all(&self, path: impl AsRef<Path>) {
        let mut root = self.root.write().unwrap();
        let mut node = &mut *root;
        for name in components(path.as_ref()) {
            let Node::Dir(children) = node else {
                panic!("not a directory: {}", path.as_ref().display());
            };
            node = children.entry(name).or_default();
        }
    }

    /// Create an empty file, creating missing parent directories
    pub fn create_file(&self, path: impl AsRef<Path>) {
        let names = components(path.as_ref());
        let (file_name, parents) = names.split_last().expect("empty path");

        let mut root = self.root.write().unwrap();
        let mut node = &mut *root;
        for name in parents {
            let Node::Dir(children) = node else {
                panic!("not a directory: {}", path.as_ref().display());
            };
            node = children.entry(name.clone()).or_default();
        }
        let Node::Dir(children) = node else {
            panic!("not a directory: {}", path.as_ref().display());
        };
        children.insert(file_name.clone(), Node::File);
    }

    fn with_node<R>(&self, path: &Path, f: impl FnOnce(Option<&Node>) -> R) -> R {
        let root = self.root.read().unwrap();
        let mut node = &*root;
        for name in components(path) {
            match node {
                Node::Dir(children) => match children.get(&name) {
                    Some(child) => node = child,
                    None => return f(None),
                },
                Node::File => return f(None),
            }
        }
        f(Some(node))
    }
}

impl FilesystemCalls for InMemoryFilesystem {
    fn stat_nullable(&self, path: &Path, _symlinks: Symlinks) -> Option<FileStatus> {
        self.with_node(path, |node| node.map(|n| FileStatus::new(n.file_type())))
    }

    fn readdir(&self, path: &Path, _symlinks: Symlinks) -> io::Result<Vec<Dirent>> {
        self.with_node(path, |node| match node {
            Some(Node::Dir(children)) => Ok(children
                .iter()
                .map(|(name, child)| Dirent::new(name.clone(), child.file_type()))
                .collect()),
            Some(Node::File) => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {}", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_create_and_stat() {
        let fs = InMemoryFilesystem::new();
        fs.create_dir_all("/tmp/foo/bar");
        fs.create_file("/tmp/foo/bar/file");

        let status = fs
            .stat_nullable(&PathBuf::from("/tmp/foo/bar"), Symlinks::Follow)
            .unwrap();
        assert!(status.is_dir());

        let status = fs
            .stat_nullable(&PathBuf::from("/tmp/foo/bar/file"), Symlinks::Follow)
            .unwrap();
        assert_eq!(status.file_type, FileType::File);

        assert!(fs
            .stat_nullable(&PathBuf::from("/tmp/missing"), Symlinks::Follow)
            .is_none());
    }

    #[test]
    fn test_readdir_sorted_with_types() {
        let fs = InMemoryFilesystem::new();
        fs.create_dir_all("/tmp/zebra");
        fs.create_dir_all("/tmp/alpha");
        fs.create_file("/tmp/mango");

        let entries = fs.readdir(&PathBuf::from("/tmp"), Symlinks::Follow).unwrap();
        let names: Vec<&str> = entries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mango", "zebra"]);
        assert_eq!(entries[0].file_type, FileType::Directory);
        assert_eq!(entries[1].file_type, FileType::File);
    }

    #[test]
    fn test_readdir_errors_distinguish_absent_from_file() {
        let fs = InMemoryFilesystem::new();
        fs.create_file("/tmp/plain");

        let err = fs
            .readdir(&PathBuf::from("/tmp/plain"), Symlinks::Follow)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);

        let err = fs
            .readdir(&PathBuf::from("/nope"), Symlinks::Follow)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_dot_prefixed_names_are_ordinary() {
        let fs = InMemoryFilesystem::new();
        fs.create_dir_all("/tmp/.hidden");
        fs.create_file("/tmp/visible");

        let entries = fs.readdir(&PathBuf::from("/tmp"), Symlinks::Follow).unwrap();
        let names: Vec<&str> = entries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec![".hidden", "visible"]);
    }
}
