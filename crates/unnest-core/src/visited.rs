//! Identity tracking for archives seen during a run.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

/// Set of canonical archive paths discovered by one run.
///
/// Every lookup and insert canonicalizes its argument first, so
/// `./a/../bundle.zip` and `/abs/bundle.zip` are the same key. The set only
/// grows.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unnest_core::VisitedSet;
///
/// let mut visited = VisitedSet::new();
/// assert!(visited.mark_visited(Path::new("bundle.zip")));
/// assert!(!visited.mark_visited(Path::new("./bundle.zip")));
/// assert!(visited.contains(Path::new("bundle.zip")));
/// ```
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    paths: HashSet<PathBuf>,
}

impl VisitedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `path` has already been marked.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(&canonical_key(path))
    }

    /// Marks `path` as visited.
    ///
    /// Returns `true` if the path was not yet in the set.
    pub fn mark_visited(&mut self, path: &Path) -> bool {
        self.paths.insert(canonical_key(path))
    }

    /// Returns the number of distinct paths marked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if nothing has been marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates over the canonical keys in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

/// Resolves `path` to its identity key.
///
/// Falls back to a lexically absolute path when the file no longer exists
/// (for instance after cleanup removed it).
#[must_use]
pub fn canonical_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
