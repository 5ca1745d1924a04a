//! Local filesystem implementation of the capability interface

use std::fs;
use std::io;
use std::path::Path;

use super::{Dirent, FileStatus, FileType, FilesystemCalls, Symlinks};

/// [`FilesystemCalls`] backed by the operating system filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a local filesystem capability
    pub fn new() -> Self {
        Self
    }
}

fn file_type_of(meta: &fs::Metadata) -> FileType {
    if meta.is_dir() {
        FileType::Directory
    } else if meta.is_file() {
        FileType::File
    } else if meta.is_symlink() {
        FileType::Symlink
    } else {
        FileType::Other
    }
}

impl FilesystemCalls for LocalFilesystem {
    fn stat_nullable(&self, path: &Path, symlinks: Symlinks) -> Option<FileStatus> {
        let meta = match symlinks {
            Symlinks::Follow => fs::metadata(path),
            Symlinks::NoFollow => fs::symlink_metadata(path),
        };
        meta.ok().map(|m| FileStatus::new(file_type_of(&m)))
    }

    fn readdir(&self, path: &Path, symlinks: Symlinks) -> io::Result<Vec<Dirent>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = match symlinks {
                Symlinks::Follow => match fs::metadata(entry.path()) {
                    Ok(meta) => file_type_of(&meta),
                    // Dangling symlink: fall back to the link itself.
                    Err(_) => FileType::Symlink,
                },
                Symlinks::NoFollow => {
                    let ft = entry.file_type()?;
                    if ft.is_dir() {
                        FileType::Directory
                    } else if ft.is_file() {
                        FileType::File
                    } else if ft.is_symlink() {
                        FileType::Symlink
                    } else {
                        FileType::Other
                    }
                }
            };
            entries.push(Dirent::new(name, file_type));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
