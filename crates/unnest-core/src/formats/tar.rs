//! Tar archive codec.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::{self};
use std::path::Path;

use tracing::trace;

use crate::error::CodecError;

use super::compression::auto_decoder;
use super::traits::ArchiveCodec;

/// Tar archive codec.
///
/// Handles plain tar files as well as gzip, bzip2, xz and zstd compressed
/// tar streams; the wrapper is detected from the file's magic bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TarCodec;

impl TarCodec {
    fn open(archive: &Path) -> Result<tar::Archive<Box<dyn Read>>, CodecError> {
        let reader = BufReader::new(File::open(archive)?);
        let (codec, stream) = auto_decoder(reader)?;
        trace!(
            ?archive,
            codec = codec.map_or("none", |c| c.name()),
            "opened tar stream"
        );
        Ok(tar::Archive::new(stream))
    }
}

impl ArchiveCodec for TarCodec {
    /// Enumerates member names; an archive without members is rejected.
    fn validate(&self, archive: &Path) -> Result<(), CodecError> {
        let mut tar = Self::open(archive)?;
        let mut members = 0usize;
        for entry in tar.entries()? {
            let entry = entry?;
            entry.path()?;
            members += 1;
        }
        if members == 0 {
            return Err(CodecError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "tar archive has no members",
            )));
        }
        Ok(())
    }

    fn extract(&self, archive: &Path, output_dir: &Path) -> Result<(), CodecError> {
        let mut tar = Self::open(archive)?;
        tar.unpack(output_dir)?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "tar"
    }
}
