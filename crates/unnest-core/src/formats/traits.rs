//! Common trait for archive codecs.

use std::path::Path;

use crate::error::CodecError;

use super::detect::ArchiveKind;
use super::gzip::GzipCodec;
use super::tar::TarCodec;
use super::zip::ZipCodec;

/// Trait for archive codec wrappers.
///
/// A codec knows how to structurally validate an archive of its kind and how
/// to unpack it into a directory. Codecs are stateless.
pub trait ArchiveCodec {
    /// Checks that the file genuinely decodes as this archive kind.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first decode or I/O failure.
    fn validate(&self, archive: &Path) -> Result<(), CodecError>;

    /// Unpacks the archive into `output_dir`, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding or writing any entry fails.
    fn extract(&self, archive: &Path, output_dir: &Path) -> Result<(), CodecError>;

    /// Returns the archive format name.
    fn format_name(&self) -> &'static str;
}

/// Returns the codec handling `kind`.
#[must_use]
pub fn codec_for(kind: ArchiveKind) -> &'static dyn ArchiveCodec {
    match kind {
        ArchiveKind::Zip => &ZipCodec,
        ArchiveKind::Tar => &TarCodec,
        ArchiveKind::Gzip => &GzipCodec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCodec;

    impl ArchiveCodec for TestCodec {
        fn validate(&self, _archive: &Path) -> Result<(), CodecError> {
            Ok(())
        }

        fn extract(&self, _archive: &Path, _output_dir: &Path) -> Result<(), CodecError> {
            Ok(())
        }

        fn format_name(&self) -> &'static str {
            "test"
        }
    }

    #[test]
    fn test_trait_implementation() {
        let codec = TestCodec;
        assert_eq!(codec.format_name(), "test");
        assert!(codec.validate(Path::new("x")).is_ok());
    }

    #[test]
    fn test_codec_for_each_kind() {
        assert_eq!(codec_for(ArchiveKind::Zip).format_name(), "zip");
        assert_eq!(codec_for(ArchiveKind::Tar).format_name(), "tar");
        assert_eq!(codec_for(ArchiveKind::Gzip).format_name(), "gzip");
    }
}
