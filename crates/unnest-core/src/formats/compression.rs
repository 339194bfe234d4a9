//! Compression codecs wrapping tar streams.
//!
//! Tar archives are opened with transparent decompression: the codec is
//! chosen from the leading magic bytes of the file rather than from its
//! suffix, so a gzipped tar named `.tar` still unpacks.
//!
//! # Supported Codecs
//!
//! - **Gzip** (.tar.gz, .tgz)
//! - **Bzip2** (.tar.bz2, .tbz2)
//! - **Xz** (.tar.xz, .txz)
//! - **Zstd**, detected by magic bytes only. No suffix maps to it, so a
//!   zstd tar is found when it carries a plain tar suffix such as `.tar`.

use std::io::BufRead;
use std::io::Read;
use std::io::{self};

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const BZIP2_MAGIC: [u8; 3] = *b"BZh";
const XZ_MAGIC: [u8; 6] = [0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// Compression codec wrapping a tar stream.
///
/// # Examples
///
/// ```
/// use unnest_core::formats::compression::CompressionCodec;
///
/// assert_eq!(
///     CompressionCodec::sniff(&[0x1f, 0x8b, 0x08]),
///     Some(CompressionCodec::Gzip)
/// );
/// assert_eq!(CompressionCodec::sniff(b"plain tar header"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip compression (deflate algorithm).
    Gzip,
    /// Bzip2 compression (Burrows-Wheeler algorithm).
    Bzip2,
    /// Xz compression (LZMA2 algorithm).
    Xz,
    /// Zstd compression (Zstandard algorithm).
    Zstd,
}

impl CompressionCodec {
    /// Detects the codec from the first bytes of a stream.
    ///
    /// Returns `None` for an uncompressed (or unrecognized) stream.
    #[must_use]
    pub fn sniff(header: &[u8]) -> Option<Self> {
        if header.starts_with(&GZIP_MAGIC) {
            Some(Self::Gzip)
        } else if header.starts_with(&BZIP2_MAGIC) {
            Some(Self::Bzip2)
        } else if header.starts_with(&XZ_MAGIC) {
            Some(Self::Xz)
        } else if header.starts_with(&ZSTD_MAGIC) {
            Some(Self::Zstd)
        } else {
            None
        }
    }

    /// Returns a human-readable name for this codec.
    ///
    /// # Examples
    ///
    /// ```
    /// use unnest_core::formats::compression::CompressionCodec;
    ///
    /// assert_eq!(CompressionCodec::Gzip.name(), "gzip");
    /// assert_eq!(CompressionCodec::Bzip2.name(), "bzip2");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    fn wrap<'a, R: BufRead + 'a>(self, reader: R) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Self::Gzip => Box::new(GzDecoder::new(reader)),
            Self::Bzip2 => Box::new(BzDecoder::new(reader)),
            Self::Xz => Box::new(XzDecoder::new(reader)),
            Self::Zstd => Box::new(zstd::stream::read::Decoder::with_buffer(reader)?),
        })
    }
}

/// Wraps `reader` in the decoder matching its magic bytes.
///
/// The sniffed bytes are only peeked, never consumed, so the returned reader
/// yields the full decompressed (or raw) stream.
pub fn auto_decoder<'a, R: BufRead + 'a>(
    mut reader: R,
) -> io::Result<(Option<CompressionCodec>, Box<dyn Read + 'a>)> {
    let codec = CompressionCodec::sniff(reader.fill_buf()?);
    let stream = match codec {
        Some(codec) => codec.wrap(reader)?,
        None => Box::new(reader),
    };
    Ok((codec, stream))
}
