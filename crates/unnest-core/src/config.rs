//! Engine configuration.

/// Default safety bound on scan iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Configuration for a recursive extraction run.
///
/// # Examples
///
/// ```
/// use unnest_core::EngineConfig;
///
/// // Keep extracted archives, stop after 100 scans
/// let config = EngineConfig::default();
///
/// // Remove archives once they have been unpacked
/// let custom = EngineConfig::default()
///     .with_cleanup(true)
///     .with_max_iterations(10);
/// assert!(custom.cleanup);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Delete each archive immediately after its own successful extraction.
    ///
    /// Applies to the root archive and every nested archive alike.
    ///
    /// Default: `false`.
    pub cleanup: bool,

    /// Maximum number of scan iterations before the run stops.
    ///
    /// Guards against archives that regenerate matching file names on every
    /// extraction.
    ///
    /// Default: `100`.
    pub max_iterations: usize,

    /// Follow symlinks while scanning for nested archives and summing
    /// directory sizes.
    ///
    /// Default: `false`.
    pub follow_symlinks: bool,
}

impl Default for EngineConfig {
    /// Creates an `EngineConfig` with default settings.
    ///
    /// Default values:
    /// - `cleanup`: `false`
    /// - `max_iterations`: `100`
    /// - `follow_symlinks`: `false`
    fn default() -> Self {
        Self {
            cleanup: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            follow_symlinks: false,
        }
    }
}

impl EngineConfig {
    /// Creates a new `EngineConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether extracted archives are removed.
    #[must_use]
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Sets the scan iteration bound.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets whether symlinks are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}
