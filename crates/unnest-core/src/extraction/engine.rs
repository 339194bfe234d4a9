//! Fixed-point extraction engine.

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;
use tracing::warn;
use walkdir::WalkDir;

use crate::EngineConfig;
use crate::ExtractionError;
use crate::Result;
use crate::RunStatistics;
use crate::VisitedSet;
use crate::events::ExtractionEvent;
use crate::events::ExtractionObserver;
use crate::extraction::CancellationToken;
use crate::formats::ArchiveKind;
use crate::formats::classify;
use crate::formats::codec_for;
use crate::formats::default_destination;
use crate::formats::probe_as;
use crate::size::file_size;
use crate::size::subtree_size;

/// Lifecycle state of an [`ExtractionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No run has started.
    #[default]
    Idle,
    /// Checking that the root archive exists and is well formed.
    Validating,
    /// Unpacking the root archive.
    ExtractingRoot,
    /// Walking the destination for new archives.
    Scanning,
    /// Unpacking a batch of nested archives.
    ExtractingNested,
    /// The last run completed.
    Converged,
    /// The last run aborted with a fatal error.
    Failed,
}

/// Candidate found by a scan.
struct Candidate {
    path: PathBuf,
    kind: ArchiveKind,
}

/// Recursively unpacks an archive until no unvisited archive remains.
///
/// A run extracts the root archive, then alternates between scanning the
/// destination tree and extracting every newly discovered archive next to
/// itself, until a scan finds nothing new or the iteration bound is hit.
/// Nested failures are recorded as warnings and never abort the run.
///
/// Each run owns its visited set and statistics. Engines running over
/// disjoint destination trees are independent; running two engines over
/// overlapping trees at the same time is not supported.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unnest_core::EngineConfig;
/// use unnest_core::ExtractionEngine;
/// use unnest_core::events::NoopObserver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut engine = ExtractionEngine::new(EngineConfig::default());
/// let stats = engine.run(Path::new("bundle.zip"), None, &mut NoopObserver)?;
/// println!("{} extraction(s)", stats.extractions);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractionEngine {
    config: EngineConfig,
    cancel: Option<CancellationToken>,
    state: EngineState,
    visited: VisitedSet,
    stats: RunStatistics,
}

impl ExtractionEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cancel: None,
            state: EngineState::Idle,
            visited: VisitedSet::new(),
            stats: RunStatistics::new(),
        }
    }

    /// Attaches a cancellation token checked between extractions.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Returns a snapshot of the statistics of the current or last run.
    #[must_use]
    pub fn stats(&self) -> RunStatistics {
        self.stats.clone()
    }

    /// Returns the archives discovered by the current or last run.
    #[must_use]
    pub const fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Runs a full recursive extraction of `archive`.
    ///
    /// `destination` defaults to a directory named after the archive stem,
    /// next to the archive. Progress is reported to `observer`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::NotFound`] or
    /// [`ExtractionError::InvalidArchive`] if the root archive is missing or
    /// malformed, [`ExtractionError::ExtractionFailed`] if it cannot be
    /// unpacked, and [`ExtractionError::Cancelled`] if the attached token
    /// was cancelled mid-run.
    pub fn run(
        &mut self,
        archive: &Path,
        destination: Option<&Path>,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<RunStatistics> {
        self.visited = VisitedSet::new();
        self.stats = RunStatistics::new();

        match self.run_inner(archive, destination, observer) {
            Ok(()) => {
                self.state = EngineState::Converged;
                observer.on_event(&ExtractionEvent::Converged {
                    stats: self.stats.clone(),
                });
                info!(
                    extractions = self.stats.extractions,
                    iterations = self.stats.iterations,
                    warnings = self.stats.warnings.len(),
                    "extraction converged"
                );
                Ok(self.stats.clone())
            }
            Err(e) => {
                self.state = EngineState::Failed;
                warn!(error = %e, "extraction run aborted");
                Err(e)
            }
        }
    }

    fn run_inner(
        &mut self,
        archive: &Path,
        destination: Option<&Path>,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<()> {
        self.state = EngineState::Validating;
        let kind = validate_root(archive)?;
        let destination =
            destination.map_or_else(|| default_destination(archive), Path::to_path_buf);

        self.visited.mark_visited(archive);
        self.stats.files_processed = self.visited.len();

        self.state = EngineState::ExtractingRoot;
        info!(?archive, ?destination, %kind, "extracting root archive");
        if let Err(reason) = self.extract_one(archive, kind, &destination, false, observer) {
            let error = ExtractionError::ExtractionFailed {
                path: archive.to_path_buf(),
                reason,
            };
            observer.on_event(&ExtractionEvent::ExtractionFailed {
                error: error.clone(),
            });
            return Err(error);
        }
        self.cleanup(archive, observer);

        let mut iteration = 0;
        loop {
            self.check_cancelled()?;

            iteration += 1;
            if iteration > self.config.max_iterations {
                let limit = self.config.max_iterations;
                warn!(limit, "reached maximum iteration limit, stopping extraction");
                self.stats
                    .add_warning(ExtractionError::IterationCapReached { limit });
                observer.on_event(&ExtractionEvent::IterationCapReached { limit });
                return Ok(());
            }
            self.stats.iterations = iteration;

            self.state = EngineState::Scanning;
            let batch = self.scan(&destination);
            if batch.is_empty() {
                debug!(iteration, "no new archives found");
                return Ok(());
            }

            info!(iteration, count = batch.len(), "found nested archives");
            observer.on_event(&ExtractionEvent::BatchFound {
                iteration,
                archives: batch.iter().map(|c| c.path.clone()).collect(),
            });

            self.state = EngineState::ExtractingNested;
            for candidate in batch {
                self.check_cancelled()?;
                self.extract_nested(&candidate, observer);
            }
        }
    }

    fn extract_nested(&mut self, candidate: &Candidate, observer: &mut dyn ExtractionObserver) {
        let destination = default_destination(&candidate.path);
        match self.extract_one(&candidate.path, candidate.kind, &destination, true, observer) {
            Ok(()) => self.cleanup(&candidate.path, observer),
            Err(reason) => {
                let error = ExtractionError::NestedExtractionFailed {
                    path: candidate.path.clone(),
                    reason,
                };
                warn!(error = %error, "continuing with other archives");
                observer.on_event(&ExtractionEvent::ExtractionFailed {
                    error: error.clone(),
                });
                self.stats.add_warning(error);
            }
        }
    }

    /// Extracts one archive with size accounting. Errors are returned as
    /// their display text so the caller can pick the error kind.
    fn extract_one(
        &mut self,
        archive: &Path,
        kind: ArchiveKind,
        destination: &Path,
        nested: bool,
        observer: &mut dyn ExtractionObserver,
    ) -> std::result::Result<(), String> {
        let input_bytes = file_size(archive);
        observer.on_event(&ExtractionEvent::ExtractionStarted {
            archive: archive.to_path_buf(),
            destination: destination.to_path_buf(),
            kind,
            input_bytes,
            nested,
        });

        std::fs::create_dir_all(destination).map_err(|e| e.to_string())?;
        let before = subtree_size(destination, self.config.follow_symlinks);
        let codec = codec_for(kind);
        codec
            .extract(archive, destination)
            .map_err(|e| e.to_string())?;
        let after = subtree_size(destination, self.config.follow_symlinks);
        let output_bytes = after.saturating_sub(before);

        self.stats.record_extraction(input_bytes, output_bytes);
        debug!(
            ?archive,
            format = codec.format_name(),
            input_bytes,
            output_bytes,
            "archive extracted"
        );
        observer.on_event(&ExtractionEvent::ExtractionSucceeded {
            archive: archive.to_path_buf(),
            input_bytes,
            output_bytes,
        });
        Ok(())
    }

    /// Collects unvisited, well-formed archives under `root` in file name
    /// order, marking each one visited.
    fn scan(&mut self, root: &Path) -> Vec<Candidate> {
        let mut batch = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry during scan");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let Some(kind) = classify(path) else {
                continue;
            };
            if self.visited.contains(path) || !probe_as(path, kind) {
                continue;
            }
            self.visited.mark_visited(path);
            batch.push(Candidate {
                path: path.to_path_buf(),
                kind,
            });
        }

        self.stats.files_processed = self.visited.len();
        batch
    }

    fn cleanup(&mut self, archive: &Path, observer: &mut dyn ExtractionObserver) {
        if !self.config.cleanup {
            return;
        }
        match std::fs::remove_file(archive) {
            Ok(()) => {
                debug!(?archive, "removed extracted archive");
                self.stats.removed_archives.push(archive.to_path_buf());
                observer.on_event(&ExtractionEvent::ArchiveRemoved {
                    archive: archive.to_path_buf(),
                });
            }
            Err(e) => {
                let error = ExtractionError::CleanupFailed {
                    path: archive.to_path_buf(),
                    reason: e.to_string(),
                };
                warn!(error = %error, "cleanup failed");
                observer.on_event(&ExtractionEvent::CleanupFailed {
                    error: error.clone(),
                });
                self.stats.add_warning(error);
            }
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            info!("extraction cancelled");
            return Err(ExtractionError::Cancelled);
        }
        Ok(())
    }
}

fn validate_root(archive: &Path) -> Result<ArchiveKind> {
    if !archive.exists() {
        return Err(ExtractionError::NotFound {
            path: archive.to_path_buf(),
        });
    }
    let invalid = || ExtractionError::InvalidArchive {
        path: archive.to_path_buf(),
    };
    let kind = classify(archive).ok_or_else(invalid)?;
    if !probe_as(archive, kind) {
        return Err(invalid());
    }
    Ok(kind)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::NoopObserver;
    use crate::events::RecordingObserver;
    use crate::test_utils::create_test_zip;
    use tempfile::TempDir;

    #[test]
    fn test_new_engine_is_idle() {
        let engine = ExtractionEngine::new(EngineConfig::default());
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.stats(), RunStatistics::new());
        assert!(engine.visited().is_empty());
        assert_eq!(engine.config().max_iterations, 100);
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.zip");

        let mut engine = ExtractionEngine::new(EngineConfig::default());
        let err = engine.run(&missing, None, &mut NoopObserver).unwrap_err();
        assert_eq!(err, ExtractionError::NotFound { path: missing });
        assert_eq!(engine.state(), EngineState::Failed);
    }

    #[test]
    fn test_invalid_root_fails() {
        let temp = TempDir::new().unwrap();
        let fake = temp.path().join("fake.zip");
        std::fs::write(&fake, b"not a zip").unwrap();

        let mut engine = ExtractionEngine::new(EngineConfig::default());
        let err = engine.run(&fake, None, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidArchive { .. }));
        assert!(!temp.path().join("fake").exists());
    }

    #[test]
    fn test_unsupported_suffix_is_invalid() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.txt");
        std::fs::write(&file, b"hello").unwrap();

        let mut engine = ExtractionEngine::new(EngineConfig::default());
        let err = engine.run(&file, None, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidArchive { .. }));
    }

    #[test]
    fn test_flat_archive_converges() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("flat.zip");
        std::fs::write(&archive, create_test_zip(vec![("a.txt", b"alpha")])).unwrap();

        let mut engine = ExtractionEngine::new(EngineConfig::default());
        let mut recorder = RecordingObserver::new();
        let stats = engine.run(&archive, None, &mut recorder).unwrap();

        assert_eq!(engine.state(), EngineState::Converged);
        assert_eq!(stats.extractions, 1);
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.files_processed, 1);
        assert_eq!(engine.stats(), stats);
        assert!(temp.path().join("flat/a.txt").exists());
        assert!(matches!(
            recorder.events().last(),
            Some(ExtractionEvent::Converged { .. })
        ));
    }

    #[test]
    fn test_root_destination_collision_is_fatal() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("root.zip");
        std::fs::write(&archive, create_test_zip(vec![("a.txt", b"alpha")])).unwrap();
        std::fs::write(temp.path().join("root"), b"occupied").unwrap();

        let mut engine = ExtractionEngine::new(EngineConfig::default());
        let mut recorder = RecordingObserver::new();
        let err = engine.run(&archive, None, &mut recorder).unwrap_err();

        assert!(matches!(err, ExtractionError::ExtractionFailed { .. }));
        assert_eq!(
            recorder.count(|e| matches!(e, ExtractionEvent::ExtractionFailed { .. })),
            1
        );
        assert_eq!(engine.stats().extractions, 0);
    }

    #[test]
    fn test_precancelled_run_stops_before_scanning() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("root.zip");
        std::fs::write(&archive, create_test_zip(vec![("a.txt", b"alpha")])).unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let mut engine = ExtractionEngine::new(EngineConfig::default()).with_cancellation(token);
        let err = engine.run(&archive, None, &mut NoopObserver).unwrap_err();

        assert_eq!(err, ExtractionError::Cancelled);
        assert_eq!(engine.stats().extractions, 1);
        assert_eq!(engine.stats().iterations, 0);
    }

    #[test]
    fn test_rerun_resets_state() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("again.zip");
        std::fs::write(&archive, create_test_zip(vec![("a.txt", b"alpha")])).unwrap();
        let out1 = temp.path().join("out1");
        let out2 = temp.path().join("out2");

        let mut engine = ExtractionEngine::new(EngineConfig::default());
        engine.run(&archive, Some(&out1), &mut NoopObserver).unwrap();
        let stats = engine.run(&archive, Some(&out2), &mut NoopObserver).unwrap();

        assert_eq!(stats.extractions, 1);
        assert_eq!(engine.visited().len(), 1);
    }
}
