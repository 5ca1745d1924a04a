//! Concurrent directory-tree traversal
//!
//! Walks the tree from a root, consuming one pattern segment per directory
//! level and forking independent tasks onto a rayon scope for wide fan-outs.
//! Matches flow through a crossbeam channel into a single-writer set, so
//! concurrently executing branches need no ordering between them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::error::{GlobError, Result};
use crate::pattern::{Pattern, Segment};
use crate::vfs::{Dirent, FileType, FilesystemCalls, Symlinks};

/// Fan-outs at or below this size run inline on the invoking thread instead
/// of paying task-submission overhead. Not observable except through timing.
const INLINE_FANOUT: usize = 2;

/// How a traversal responds to the cancellation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CancelMode {
    /// Abort as soon as the flag is observed and report a cancelled outcome
    Interruptible,
    /// Ignore the flag, compute the full result, leave the flag set
    BestEffort,
}

/// Discriminated traversal result
#[derive(Debug)]
pub(crate) enum GlobOutcome {
    /// Traversal ran to completion with this deduplicated match set
    Completed(HashSet<PathBuf>),
    /// The flag was observed in interruptible mode; no authoritative result
    Cancelled,
}

/// Directory-filter predicate. Invoked without any engine lock held; its own
/// thread-safety is the caller's responsibility.
pub(crate) type DirectoryFilter = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Fixed configuration for one traversal call
pub(crate) struct TraversalOptions {
    pub root: PathBuf,
    pub exclude_directories: bool,
    pub symlinks: Symlinks,
}

/// One traversal call over a compiled pattern set.
///
/// The engine owns no threads: fan-out is submitted to a caller-provided
/// rayon pool (or the global pool) through a scope that joins before
/// `execute` returns, so the pool is always left runnable.
pub(crate) struct GlobEngine {
    fs: Arc<dyn FilesystemCalls>,
    options: TraversalOptions,
    patterns: Vec<Pattern>,
    directory_filter: Option<DirectoryFilter>,
    cancel: Arc<AtomicBool>,
    mode: CancelMode,
    pool: Option<Arc<rayon::ThreadPool>>,
    sender: Sender<PathBuf>,
    receiver: Receiver<PathBuf>,
    error: Mutex<Option<GlobError>>,
    aborted: AtomicBool,
}

impl GlobEngine {
    pub(crate) fn new(
        fs: Arc<dyn FilesystemCalls>,
        options: TraversalOptions,
        patterns: Vec<Pattern>,
        directory_filter: Option<DirectoryFilter>,
        cancel: Arc<AtomicBool>,
        mode: CancelMode,
        pool: Option<Arc<rayon::ThreadPool>>,
    ) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            fs,
            options,
            patterns,
            directory_filter,
            cancel,
            mode,
            pool,
            sender,
            receiver,
            error: Mutex::new(None),
            aborted: AtomicBool::new(false),
        }
    }

    /// Run the traversal to a discriminated outcome.
    pub(crate) fn execute(&self) -> Result<GlobOutcome> {
        tracing::debug!(
            "globbing {} pattern(s) under {}",
            self.patterns.len(),
            self.options.root.display()
        );

        // The root is itself a candidate directory for the filter.
        if !self.allows_dir(&self.options.root) {
            return Ok(GlobOutcome::Completed(HashSet::new()));
        }
        if self.should_abort() {
            return Ok(GlobOutcome::Cancelled);
        }

        // A nonexistent root, or a root that is a plain file, matches nothing.
        match self.fs.stat_nullable(&self.options.root, self.options.symlinks) {
            Some(status) if status.is_dir() => {}
            _ => return Ok(GlobOutcome::Completed(HashSet::new())),
        }

        match &self.pool {
            Some(pool) => pool.scope(|scope| self.walk_roots(scope)),
            None => rayon::scope(|scope| self.walk_roots(scope)),
        }

        if self.aborted.load(Ordering::SeqCst) {
            return Ok(GlobOutcome::Cancelled);
        }
        if let Some(err) = self.error.lock().unwrap().take() {
            return Err(err);
        }

        // All tasks have joined; drain whatever they sent.
        let matches: HashSet<PathBuf> = self.receiver.try_iter().collect();
        Ok(GlobOutcome::Completed(matches))
    }

    fn walk_roots<'s>(&'s self, scope: &rayon::Scope<'s>) {
        for pattern in &self.patterns {
            self.visit(scope, self.options.root.clone(), pattern, 0);
        }
    }

    /// Match the pattern suffix starting at `idx` against `dir`.
    fn visit<'s>(&'s self, scope: &rayon::Scope<'s>, dir: PathBuf, pattern: &'s Pattern, idx: usize) {
        if self.should_abort() {
            return;
        }

        // Wildcard-free suffixes resolve by direct stat, never readdir.
        if pattern.is_literal_from(idx) {
            self.resolve_literal(&dir, &pattern.segments()[idx..]);
            return;
        }

        let segments = pattern.segments();
        let segment = &segments[idx];
        let last = idx + 1 == segments.len();

        match segment {
            Segment::Recursive if last => {
                // Depth 0: the current directory itself is a match.
                self.emit_directory(dir.clone());
                let Some(entries) = self.list_dir(&dir) else {
                    return;
                };
                let mut subdirs = Vec::new();
                for entry in entries {
                    let child = dir.join(&entry.name);
                    if entry.file_type == FileType::Directory {
                        if self.allows_dir(&child) {
                            subdirs.push(child);
                        }
                    } else {
                        self.emit(child);
                    }
                }
                self.fork(scope, subdirs, pattern, idx);
            }
            Segment::Recursive => {
                // Depth 0: try the remainder at this level, then keep the
                // recursive segment active one level down.
                self.visit(scope, dir.clone(), pattern, idx + 1);
                if self.should_abort() {
                    return;
                }
                let Some(entries) = self.list_dir(&dir) else {
                    return;
                };
                let subdirs = self.subdirs_of(&dir, &entries);
                self.fork(scope, subdirs, pattern, idx);
            }
            _ => {
                let Some(entries) = self.list_dir(&dir) else {
                    return;
                };
                let mut subdirs = Vec::new();
                for entry in &entries {
                    if !segment.matches(&entry.name) {
                        continue;
                    }
                    let child = dir.join(&entry.name);
                    if last {
                        if entry.file_type == FileType::Directory {
                            if self.allows_dir(&child) {
                                self.emit_directory(child);
                            }
                        } else {
                            self.emit(child);
                        }
                    } else if entry.file_type == FileType::Directory && self.allows_dir(&child) {
                        subdirs.push(child);
                    }
                }
                self.fork(scope, subdirs, pattern, idx + 1);
            }
        }
    }

    /// Subdirectories of `dir` passing the directory filter
    fn subdirs_of(&self, dir: &Path, entries: &[Dirent]) -> Vec<PathBuf> {
        entries
            .iter()
            .filter(|e| e.file_type == FileType::Directory)
            .map(|e| dir.join(&e.name))
            .filter(|child| self.allows_dir(child))
            .collect()
    }

    /// Fork one continuation per directory, spawning onto the scope past the
    /// inline threshold. Total work is identical either way.
    fn fork<'s>(
        &'s self,
        scope: &rayon::Scope<'s>,
        dirs: Vec<PathBuf>,
        pattern: &'s Pattern,
        idx: usize,
    ) {
        if dirs.len() <= INLINE_FANOUT {
            for dir in dirs {
                self.visit(scope, dir, pattern, idx);
            }
        } else {
            for dir in dirs {
                scope.spawn(move |scope| self.visit(scope, dir, pattern, idx));
            }
        }
    }

    /// Resolve a wildcard-free segment suffix with a single stat call.
    /// Directory matches stay subject to the directory filter.
    fn resolve_literal(&self, dir: &Path, segments: &[Segment]) {
        let mut path = dir.to_path_buf();
        for segment in segments {
            match segment {
                Segment::Literal(name) => path.push(name),
                _ => unreachable!("caller checked the suffix is literal"),
            }
        }
        match self.fs.stat_nullable(&path, self.options.symlinks) {
            Some(status) if status.is_dir() => {
                if self.allows_dir(&path) {
                    self.emit_directory(path);
                }
            }
            Some(_) => self.emit(path),
            None => {}
        }
    }

    /// List a directory, absorbing missing-path conditions and recording any
    /// genuine I/O failure for the caller.
    fn list_dir(&self, dir: &Path) -> Option<Vec<Dirent>> {
        if self.should_abort() {
            return None;
        }
        match self.fs.readdir(dir, self.options.symlinks) {
            Ok(entries) => Some(entries),
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
                ) =>
            {
                None
            }
            Err(e) => {
                self.record_error(GlobError::io(dir, e));
                None
            }
        }
    }

    fn allows_dir(&self, dir: &Path) -> bool {
        match &self.directory_filter {
            Some(filter) => filter(dir),
            None => true,
        }
    }

    fn should_abort(&self) -> bool {
        if !self.cancel.load(Ordering::SeqCst) {
            return false;
        }
        match self.mode {
            CancelMode::Interruptible => {
                self.aborted.store(true, Ordering::SeqCst);
                true
            }
            CancelMode::BestEffort => false,
        }
    }

    fn emit_directory(&self, path: PathBuf) {
        if !self.options.exclude_directories {
            self.emit(path);
        }
    }

    fn emit(&self, path: PathBuf) {
        tracing::trace!("matched {}", path.display());
        // Send cannot fail while the engine (and thus the receiver) lives.
        let _ = self.sender.send(path);
    }

    fn record_error(&self, err: GlobError) {
        let mut slot = self.error.lock().unwrap();
        if slot.is_none() {
            *slot = Some(err);
        }
    }
}
