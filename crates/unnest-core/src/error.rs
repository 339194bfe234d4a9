//! Error types for recursive extraction runs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors produced by an extraction run.
///
/// Only [`NotFound`], [`InvalidArchive`], [`ExtractionFailed`] and
/// [`Cancelled`] abort a run. The remaining kinds are recorded as warnings in
/// [`RunStatistics::warnings`] while the run carries on.
///
/// [`NotFound`]: ExtractionError::NotFound
/// [`InvalidArchive`]: ExtractionError::InvalidArchive
/// [`ExtractionFailed`]: ExtractionError::ExtractionFailed
/// [`Cancelled`]: ExtractionError::Cancelled
/// [`RunStatistics::warnings`]: crate::RunStatistics::warnings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The root archive does not exist.
    #[error("archive not found: {path}")]
    NotFound {
        /// The missing archive path.
        path: PathBuf,
    },

    /// The root archive failed the structural probe.
    #[error("invalid archive: {path}")]
    InvalidArchive {
        /// The rejected archive path.
        path: PathBuf,
    },

    /// Extracting the root archive failed.
    #[error("failed to extract {path}: {reason}")]
    ExtractionFailed {
        /// The archive that could not be extracted.
        path: PathBuf,
        /// Codec or I/O failure description.
        reason: String,
    },

    /// Extracting a nested archive failed; the run continued.
    #[error("failed to extract nested archive {path}: {reason}")]
    NestedExtractionFailed {
        /// The nested archive that could not be extracted.
        path: PathBuf,
        /// Codec or I/O failure description.
        reason: String,
    },

    /// Removing an extracted archive failed; the run continued.
    #[error("could not remove {path}: {reason}")]
    CleanupFailed {
        /// The archive that could not be removed.
        path: PathBuf,
        /// I/O failure description.
        reason: String,
    },

    /// The scan loop hit its safety bound before converging.
    #[error("reached maximum iteration limit ({limit}), stopping extraction")]
    IterationCapReached {
        /// The configured iteration bound.
        limit: usize,
    },

    /// The run was cancelled between two archive extractions.
    #[error("extraction cancelled")]
    Cancelled,
}

impl ExtractionError {
    /// Returns `true` if this error terminates a run.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use unnest_core::ExtractionError;
    ///
    /// let err = ExtractionError::NotFound {
    ///     path: PathBuf::from("missing.zip"),
    /// };
    /// assert!(err.is_fatal());
    ///
    /// let warning = ExtractionError::IterationCapReached { limit: 100 };
    /// assert!(!warning.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidArchive { .. }
                | Self::ExtractionFailed { .. }
                | Self::Cancelled
        )
    }

    /// Returns the archive path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NotFound { path }
            | Self::InvalidArchive { path }
            | Self::ExtractionFailed { path, .. }
            | Self::NestedExtractionFailed { path, .. }
            | Self::CleanupFailed { path, .. } => Some(path),
            Self::IterationCapReached { .. } | Self::Cancelled => None,
        }
    }
}

/// Failure raised by an archive codec.
///
/// Codec errors never leave the engine as-is: they are folded into the
/// `reason` of an [`ExtractionError`].
#[derive(Error, Debug)]
pub enum CodecError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ZIP reader rejected the archive.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_kinds() {
        let path = PathBuf::from("a.zip");
        assert!(ExtractionError::NotFound { path: path.clone() }.is_fatal());
        assert!(ExtractionError::InvalidArchive { path: path.clone() }.is_fatal());
        assert!(
            ExtractionError::ExtractionFailed {
                path: path.clone(),
                reason: "boom".into(),
            }
            .is_fatal()
        );
        assert!(ExtractionError::Cancelled.is_fatal());
    }

    #[test]
    fn test_warning_kinds() {
        let path = PathBuf::from("a.zip");
        assert!(
            !ExtractionError::NestedExtractionFailed {
                path: path.clone(),
                reason: "corrupt".into(),
            }
            .is_fatal()
        );
        assert!(
            !ExtractionError::CleanupFailed {
                path,
                reason: "denied".into(),
            }
            .is_fatal()
        );
        assert!(!ExtractionError::IterationCapReached { limit: 100 }.is_fatal());
    }

    #[test]
    fn test_error_display() {
        let err = ExtractionError::NestedExtractionFailed {
            path: PathBuf::from("inner.zip"),
            reason: "bad crc".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to extract nested archive inner.zip: bad crc"
        );

        let err = ExtractionError::IterationCapReached { limit: 100 };
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_error_path() {
        let err = ExtractionError::CleanupFailed {
            path: PathBuf::from("x.gz"),
            reason: "busy".into(),
        };
        assert_eq!(err.path(), Some(std::path::Path::new("x.gz")));
        assert_eq!(ExtractionError::Cancelled.path(), None);
    }

    #[test]
    fn test_codec_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CodecError = io_err.into();
        assert!(matches!(err, CodecError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
