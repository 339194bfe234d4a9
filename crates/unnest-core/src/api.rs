//! High-level public API for recursive extraction.

use std::path::Path;

use crate::EngineConfig;
use crate::ExtractionEngine;
use crate::Result;
use crate::RunStatistics;
use crate::events::ExtractionObserver;
use crate::events::NoopObserver;

/// Recursively extracts an archive and every archive nested inside it.
///
/// This is the main high-level API. The archive kind is chosen from the file
/// suffix. When `destination` is `None`, output goes to a directory named
/// after the archive stem, next to the archive.
///
/// # Arguments
///
/// * `archive_path` - Path to the root archive
/// * `destination` - Directory receiving the extracted tree
/// * `config` - Engine configuration
///
/// # Errors
///
/// Returns an error if:
/// - The archive does not exist
/// - The archive fails the structural probe
/// - The root archive cannot be extracted
///
/// Failures of nested archives are recorded in
/// [`RunStatistics::warnings`] instead.
///
/// # Examples
///
/// ```no_run
/// use unnest_core::EngineConfig;
/// use unnest_core::unnest_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = EngineConfig::default().with_cleanup(true);
/// let stats = unnest_archive("bundle.zip", None, &config)?;
/// println!("Extracted {} archive(s)", stats.extractions);
/// # Ok(())
/// # }
/// ```
pub fn unnest_archive<P: AsRef<Path>>(
    archive_path: P,
    destination: Option<&Path>,
    config: &EngineConfig,
) -> Result<RunStatistics> {
    unnest_archive_with_observer(archive_path, destination, config, &mut NoopObserver)
}

/// Like [`unnest_archive`], reporting progress to `observer`.
///
/// # Errors
///
/// Same as [`unnest_archive`].
pub fn unnest_archive_with_observer<P: AsRef<Path>>(
    archive_path: P,
    destination: Option<&Path>,
    config: &EngineConfig,
    observer: &mut dyn ExtractionObserver,
) -> Result<RunStatistics> {
    let mut engine = ExtractionEngine::new(config.clone());
    engine.run(archive_path.as_ref(), destination, observer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ExtractionError;
    use crate::events::ExtractionEvent;
    use crate::events::RecordingObserver;
    use crate::test_utils::create_test_zip;
    use tempfile::TempDir;

    #[test]
    fn test_unnest_archive_default_destination() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("docs.zip");
        std::fs::write(&archive, create_test_zip(vec![("readme.txt", b"hi")])).unwrap();

        let stats = unnest_archive(&archive, None, &EngineConfig::default()).unwrap();
        assert_eq!(stats.extractions, 1);
        assert!(temp.path().join("docs/readme.txt").exists());
    }

    #[test]
    fn test_unnest_archive_missing() {
        let result = unnest_archive("/nonexistent/x.zip", None, &EngineConfig::default());
        assert!(matches!(result, Err(ExtractionError::NotFound { .. })));
    }

    #[test]
    fn test_unnest_archive_with_observer() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("docs.zip");
        std::fs::write(&archive, create_test_zip(vec![("readme.txt", b"hi")])).unwrap();
        let out = temp.path().join("elsewhere");

        let mut recorder = RecordingObserver::new();
        unnest_archive_with_observer(&archive, Some(&out), &EngineConfig::default(), &mut recorder)
            .unwrap();

        assert!(out.join("readme.txt").exists());
        assert_eq!(
            recorder.count(|e| matches!(e, ExtractionEvent::ExtractionStarted { .. })),
            1
        );
    }
}
