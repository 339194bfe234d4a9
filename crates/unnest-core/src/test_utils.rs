//! Test utilities for building nested archive fixtures.
//!
//! Helpers produce archive bytes in memory; tests write them wherever the
//! scenario needs them.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

/// Creates an in-memory TAR archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are created with mode 0o644.
///
/// # Examples
///
/// ```
/// use unnest_core::test_utils::create_test_tar;
///
/// let tar_data = create_test_tar(vec![("file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// ```
#[must_use]
pub fn create_test_tar(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let mut ar = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        ar.append_data(&mut header, path, data).unwrap();
    }
    ar.into_inner().unwrap()
}

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are stored uncompressed
/// with mode 0o644.
///
/// # Examples
///
/// ```
/// use unnest_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (path, data) in entries {
        zip.start_file(path, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Gzip-compresses `data` in memory.
///
/// # Examples
///
/// ```
/// use unnest_core::test_utils::create_test_tar;
/// use unnest_core::test_utils::gzip_bytes;
///
/// let tar_gz = gzip_bytes(&create_test_tar(vec![("a.txt", b"a")]));
/// assert_eq!(&tar_gz[..2], &[0x1f, 0x8b]);
/// ```
#[must_use]
pub fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Builds a chain of `depth` zips, each holding the next one.
///
/// The innermost zip holds `payload.txt`. Level `n` is stored as
/// `level{n}.zip` inside level `n - 1`; the returned bytes are level 0.
/// Extracting the whole chain takes `depth` extractions.
///
/// # Examples
///
/// ```
/// use unnest_core::test_utils::nested_zip_chain;
///
/// let outer = nested_zip_chain(3, b"deep");
/// assert!(!outer.is_empty());
/// ```
#[must_use]
pub fn nested_zip_chain(depth: usize, payload: &[u8]) -> Vec<u8> {
    assert!(depth > 0, "chain needs at least one level");
    let mut current = create_test_zip(vec![("payload.txt", payload)]);
    for level in (1..depth).rev() {
        let name = format!("level{level}.zip");
        current = create_test_zip(vec![(name.as_str(), current.as_slice())]);
    }
    current
}

/// Flips one bit inside the first occurrence of `payload` in `data`.
///
/// Applied to a stored zip, this damages an entry's bytes while leaving its
/// headers and central directory intact, so the CRC no longer matches.
///
/// # Panics
///
/// Panics if `payload` does not occur in `data`.
pub fn corrupt_payload(data: &mut [u8], payload: &[u8]) {
    let offset = data
        .windows(payload.len())
        .position(|window| window == payload)
        .expect("payload not found in archive bytes");
    data[offset] ^= 0x01;
}

/// Builder for ZIP test archives mixing files and directories.
///
/// # Examples
///
/// ```
/// use unnest_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("docs/")
///     .add_file("docs/a.txt", b"a")
///     .add_deflated_file("big.txt", &[b'x'; 4096])
///     .build();
/// ```
pub struct ZipTestBuilder {
    writer: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored file.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, zip::CompressionMethod::Stored)
    }

    /// Adds a deflate-compressed file.
    #[must_use]
    pub fn add_deflated_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, zip::CompressionMethod::Deflated)
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = zip::write::SimpleFileOptions::default();
        self.writer.add_directory(path, options).unwrap();
        self
    }

    /// Builds the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
    }

    fn add_with_method(mut self, path: &str, data: &[u8], method: zip::CompressionMethod) -> Self {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);
        self.writer.start_file(path, options).unwrap();
        self.writer.write_all(data).unwrap();
        self
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
