//! Builder-style public API for glob traversal

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::{GlobError, Result};
use crate::pattern::Pattern;
use crate::vfs::{FilesystemCalls, LocalFilesystem, Symlinks};
use crate::walk::engine::{
    CancelMode, DirectoryFilter, GlobEngine, GlobOutcome, TraversalOptions,
};

/// Configures and runs one glob traversal.
///
/// ```no_run
/// use globtree::GlobBuilder;
///
/// let matches = GlobBuilder::new("/some/root")
///     .add_pattern("src/**/*.rs")
///     .add_exclude("src/generated/*")
///     .glob()
///     .unwrap();
/// ```
pub struct GlobBuilder {
    root: PathBuf,
    patterns: Vec<String>,
    excludes: Vec<String>,
    directory_filter: Option<DirectoryFilter>,
    exclude_directories: bool,
    symlinks: Symlinks,
    pool: Option<Arc<rayon::ThreadPool>>,
    threads: usize,
    cancel: Option<Arc<AtomicBool>>,
    fs: Arc<dyn FilesystemCalls>,
}

impl GlobBuilder {
    /// Start a builder rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: Vec::new(),
            excludes: Vec::new(),
            directory_filter: None,
            exclude_directories: false,
            symlinks: Symlinks::Follow,
            pool: None,
            threads: num_cpus::get(),
            cancel: None,
            fs: Arc::new(LocalFilesystem::new()),
        }
    }

    /// Add one inclusion pattern
    pub fn add_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Add several inclusion patterns
    pub fn add_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add one exclusion pattern
    pub fn add_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Add several exclusion patterns
    pub fn add_excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set a predicate consulted for every candidate directory; returning
    /// false prunes that subtree before any stat/readdir cost is paid on its
    /// children, and keeps the directory itself out of the result set. The
    /// predicate may be stateful; it runs without any engine lock, so its
    /// thread-safety is the caller's responsibility.
    pub fn directory_filter(
        mut self,
        filter: impl Fn(&Path) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.directory_filter = Some(Arc::new(filter));
        self
    }

    /// Exclude plain directories from the result set (default: included)
    pub fn exclude_directories(mut self, exclude: bool) -> Self {
        self.exclude_directories = exclude;
        self
    }

    /// Follow symlinks during traversal (default: follow)
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.symlinks = if follow {
            Symlinks::Follow
        } else {
            Symlinks::NoFollow
        };
        self
    }

    /// Use a caller-owned worker pool for concurrent fan-out. The engine
    /// only borrows it for the duration of the call and always leaves it
    /// runnable, including after cancellation.
    pub fn thread_pool(mut self, pool: Arc<rayon::ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Size of the per-call worker pool built when no pool is supplied
    /// (default: one thread per CPU)
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the cancellation flag checked cooperatively during traversal
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Replace the filesystem capability (default: the local filesystem)
    pub fn filesystem(mut self, fs: Arc<dyn FilesystemCalls>) -> Self {
        self.fs = fs;
        self
    }

    /// Run in best-effort mode: a cancellation signal observed during
    /// traversal does not abort the walk; the complete match set is computed
    /// and returned and the flag is left set for the caller to observe.
    ///
    /// Returns matched paths sorted lexicographically.
    pub fn glob(&self) -> Result<Vec<PathBuf>> {
        self.run(CancelMode::BestEffort)
    }

    /// Run in interruptible mode: if the cancellation flag is observed the
    /// traversal aborts as soon as practical and [`GlobError::Cancelled`] is
    /// returned. Outstanding forked tasks are abandoned; the supplied pool
    /// remains usable.
    ///
    /// Returns matched paths sorted lexicographically.
    pub fn glob_interruptible(&self) -> Result<Vec<PathBuf>> {
        self.run(CancelMode::Interruptible)
    }

    fn run(&self, mode: CancelMode) -> Result<Vec<PathBuf>> {
        // Compile everything up front so pattern errors fail fast, before
        // any filesystem access, for includes and excludes alike.
        let patterns = compile_all(&self.patterns)?;
        let excludes = compile_all(&self.excludes)?;

        let pool = self.resolve_pool()?;
        let cancel = self
            .cancel
            .clone()
            .unwrap_or_else(|| Arc::new(AtomicBool::new(false)));

        let mut matches = self.traverse(patterns, mode, &pool, &cancel)?;

        if !excludes.is_empty() && !matches.is_empty() {
            tracing::debug!("subtracting {} exclusion pattern(s)", self.excludes.len());
            let excluded = self.traverse(excludes, mode, &pool, &cancel)?;
            matches.retain(|path| !excluded.contains(path));
        }

        let mut sorted: Vec<PathBuf> = matches.into_iter().collect();
        // Order by the string form. PathBuf's component-wise Ord diverges
        // for names containing characters below '/'.
        sorted.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        Ok(sorted)
    }

    /// One full traversal over a compiled pattern set.
    fn traverse(
        &self,
        patterns: Vec<Pattern>,
        mode: CancelMode,
        pool: &Option<Arc<rayon::ThreadPool>>,
        cancel: &Arc<AtomicBool>,
    ) -> Result<HashSet<PathBuf>> {
        let engine = GlobEngine::new(
            Arc::clone(&self.fs),
            TraversalOptions {
                root: self.root.clone(),
                exclude_directories: self.exclude_directories,
                symlinks: self.symlinks,
            },
            patterns,
            self.directory_filter.clone(),
            Arc::clone(cancel),
            mode,
            pool.clone(),
        );
        match engine.execute()? {
            GlobOutcome::Completed(set) => Ok(set),
            GlobOutcome::Cancelled => Err(GlobError::Cancelled),
        }
    }

    /// The pool tasks are submitted to: the caller's, or a per-call pool of
    /// the configured width.
    fn resolve_pool(&self) -> Result<Option<Arc<rayon::ThreadPool>>> {
        if let Some(pool) = &self.pool {
            return Ok(Some(Arc::clone(pool)));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads.max(1))
            .build()
            .map_err(|e| GlobError::ThreadPool(e.to_string()))?;
        Ok(Some(Arc::new(pool)))
    }
}

/// Compile a pattern list, failing on the first invalid pattern
fn compile_all(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns.iter().map(|p| Pattern::compile(p)).collect()
}
