//! Structural archive probing.

use std::path::Path;

use tracing::debug;

use super::detect::ArchiveKind;
use super::detect::classify;
use super::traits::codec_for;

/// Returns `true` if `path` is a regular, non-empty file that genuinely
/// decodes as the archive kind its suffix claims.
///
/// A suffix match alone is not evidence of an archive: a text file renamed
/// to `.zip` is rejected. Every decode or I/O failure is swallowed and
/// reported as `false`. The file is only read, never modified.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unnest_core::formats::probe;
///
/// if probe(Path::new("bundle.zip")) {
///     println!("bundle.zip is a real archive");
/// }
/// ```
#[must_use]
pub fn probe(path: &Path) -> bool {
    classify(path).is_some_and(|kind| probe_as(path, kind))
}

/// Probes `path` as a specific archive kind, ignoring its suffix.
#[must_use]
pub fn probe_as(path: &Path, kind: ArchiveKind) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => {}
        Ok(_) => {
            debug!(?path, %kind, "not a non-empty regular file");
            return false;
        }
        Err(e) => {
            debug!(?path, %kind, error = %e, "cannot stat probe target");
            return false;
        }
    }

    let codec = codec_for(kind);
    match codec.validate(path) {
        Ok(()) => true,
        Err(e) => {
            debug!(
                ?path,
                format = codec.format_name(),
                error = %e,
                "file is not a valid archive"
            );
            false
        }
    }
}
