//! Archive kind detection from file names.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

/// Archive families the engine knows how to unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// ZIP archive.
    Zip,
    /// Tar archive, optionally wrapped in gzip, bzip2, xz or zstd.
    Tar,
    /// Single gzip-compressed stream.
    Gzip,
}

impl ArchiveKind {
    /// Returns a short lowercase name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Tar => "tar",
            Self::Gzip => "gzip",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recognized suffixes, longest first.
///
/// Every compound suffix must precede any suffix that is also its tail
/// (`.tar.gz` before `.gz`).
const SUFFIXES: [(&str, ArchiveKind); 9] = [
    (".tar.bz2", ArchiveKind::Tar),
    (".tar.gz", ArchiveKind::Tar),
    (".tar.xz", ArchiveKind::Tar),
    (".tbz2", ArchiveKind::Tar),
    (".tar", ArchiveKind::Tar),
    (".tgz", ArchiveKind::Tar),
    (".txz", ArchiveKind::Tar),
    (".zip", ArchiveKind::Zip),
    (".gz", ArchiveKind::Gzip),
];

/// Classifies a path by its file-name suffix.
///
/// Matching is ASCII case-insensitive and prefers the longest suffix, so
/// `backup.tar.gz` is a [`ArchiveKind::Tar`], never a bare gzip stream.
/// No I/O is performed.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unnest_core::formats::ArchiveKind;
/// use unnest_core::formats::classify;
///
/// assert_eq!(classify(Path::new("a.tar.gz")), Some(ArchiveKind::Tar));
/// assert_eq!(classify(Path::new("notes.txt.gz")), Some(ArchiveKind::Gzip));
/// assert_eq!(classify(Path::new("README")), None);
/// ```
#[must_use]
pub fn classify(path: &Path) -> Option<ArchiveKind> {
    let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
    SUFFIXES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|&(_, kind)| kind)
}

/// Computes the default extraction directory for an archive.
///
/// The directory sits next to the archive and is named after its stem with
/// only the outermost extension removed (`a.tar.gz` unpacks into `a.tar/`).
/// A name without a usable stem, such as `.zip`, gets an `_extracted` suffix
/// so the directory never collides with the archive itself.
#[must_use]
pub fn default_destination(archive: &Path) -> PathBuf {
    let parent = archive.parent().unwrap_or_else(|| Path::new(""));
    parent.join(output_stem(archive))
}

/// Returns the archive file name minus its outermost extension.
pub(crate) fn output_stem(archive: &Path) -> String {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match archive.file_stem().map(|s| s.to_string_lossy().into_owned()) {
        Some(stem) if !stem.is_empty() && stem != name => stem,
        _ => format!("{name}_extracted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_zip() {
        assert_eq!(classify(Path::new("archive.zip")), Some(ArchiveKind::Zip));
    }

    #[test]
    fn test_classify_tar_variants() {
        for name in [
            "a.tar",
            "a.tar.gz",
            "a.tgz",
            "a.tar.bz2",
            "a.tbz2",
            "a.tar.xz",
            "a.txz",
        ] {
            assert_eq!(
                classify(Path::new(name)),
                Some(ArchiveKind::Tar),
                "{name} should classify as tar"
            );
        }
    }

    #[test]
    fn test_classify_gzip() {
        assert_eq!(classify(Path::new("log.gz")), Some(ArchiveKind::Gzip));
        assert_eq!(classify(Path::new("data.json.gz")), Some(ArchiveKind::Gzip));
    }

    #[test]
    fn test_classify_longest_suffix_wins() {
        assert_eq!(classify(Path::new("a.tar.gz")), Some(ArchiveKind::Tar));
        assert_ne!(classify(Path::new("a.tar.gz")), Some(ArchiveKind::Gzip));
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify(Path::new("ARCHIVE.ZIP")), Some(ArchiveKind::Zip));
        assert_eq!(classify(Path::new("Backup.Tar.Gz")), Some(ArchiveKind::Tar));
    }

    #[test]
    fn test_classify_uses_file_name_only() {
        assert_eq!(classify(Path::new("dir.zip/readme.txt")), None);
        assert_eq!(
            classify(Path::new("nested/dir/inner.zip")),
            Some(ArchiveKind::Zip)
        );
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(classify(Path::new("archive.rar")), None);
        assert_eq!(classify(Path::new("archive.7z")), None);
        assert_eq!(classify(Path::new("file.bz2")), None);
        assert_eq!(classify(Path::new("")), None);
    }

    #[test]
    fn test_default_destination_strips_outermost_extension() {
        assert_eq!(
            default_destination(Path::new("/data/bundle.zip")),
            PathBuf::from("/data/bundle")
        );
        assert_eq!(
            default_destination(Path::new("/data/bundle.tar.gz")),
            PathBuf::from("/data/bundle.tar")
        );
        assert_eq!(
            default_destination(Path::new("relative.tgz")),
            PathBuf::from("relative")
        );
    }

    #[test]
    fn test_default_destination_dotfile() {
        assert_eq!(
            default_destination(Path::new("/data/.zip")),
            PathBuf::from("/data/.zip_extracted")
        );
    }

    #[test]
    fn test_archive_kind_display() {
        assert_eq!(ArchiveKind::Zip.to_string(), "zip");
        assert_eq!(ArchiveKind::Tar.to_string(), "tar");
        assert_eq!(ArchiveKind::Gzip.to_string(), "gzip");
    }
}
