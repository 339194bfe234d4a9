//! Error conversion utilities for CLI.
//!
//! Converts unnest-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use unnest_core::ExtractionError;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::NotFound { path } => {
            anyhow!(
                "Archive not found: '{}'\n\
                 HINT: Check the path and that the file exists.",
                path.display()
            )
        }
        ExtractionError::InvalidArchive { path } => {
            anyhow!(
                "Invalid archive '{}': not a readable zip, tar or gzip file\n\
                 HINT: Supported formats: zip, tar, tar.gz, tgz, tar.bz2, tbz2, tar.xz, txz, gz",
                path.display()
            )
        }
        ExtractionError::ExtractionFailed { path, reason } => {
            anyhow!(
                "Failed to extract '{}': {}\n\
                 HINT: Check that the output directory is writable and has enough free space.",
                path.display(),
                reason
            )
        }
        ExtractionError::Cancelled => {
            anyhow!("Extraction of '{}' was cancelled", archive.display())
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}
