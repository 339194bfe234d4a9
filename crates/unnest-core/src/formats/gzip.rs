//! Single-stream gzip codec.

use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::io::{self};
use std::path::Path;

use flate2::bufread::MultiGzDecoder;
use tracing::trace;

use crate::error::CodecError;

use super::detect::output_stem;
use super::traits::ArchiveCodec;

/// Gzip stream codec.
///
/// `notes.txt.gz` decompresses to `<output_dir>/notes.txt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GzipCodec;

impl GzipCodec {
    fn open(archive: &Path) -> Result<MultiGzDecoder<BufReader<File>>, CodecError> {
        let file = File::open(archive)?;
        Ok(MultiGzDecoder::new(BufReader::new(file)))
    }
}

impl ArchiveCodec for GzipCodec {
    /// Decompresses the first byte of the stream.
    fn validate(&self, archive: &Path) -> Result<(), CodecError> {
        let mut decoder = Self::open(archive)?;
        let mut first = [0u8; 1];
        let decoded = decoder.read(&mut first)?;
        trace!(?archive, decoded, "gzip stream decodes");
        Ok(())
    }

    fn extract(&self, archive: &Path, output_dir: &Path) -> Result<(), CodecError> {
        let mut decoder = Self::open(archive)?;
        let output_path = output_dir.join(output_stem(archive));
        let mut writer = BufWriter::with_capacity(64 * 1024, File::create(&output_path)?);
        io::copy(&mut decoder, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "gzip"
    }
}
