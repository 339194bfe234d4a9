//! Byte size accounting.
//!
//! Size measurement is tolerant: an entry that cannot be read counts as
//! zero bytes and never aborts the computation.

use std::fmt;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Returns the size of a regular file, or `0` if it is missing, unreadable
/// or not a regular file.
#[must_use]
pub fn file_size(path: &Path) -> u64 {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => 0,
        Err(e) => {
            debug!(?path, error = %e, "skipping unreadable file in size computation");
            0
        }
    }
}

/// Sums the sizes of every regular file under `dir`.
///
/// Symlinks are not followed unless `follow_symlinks` is set. Entries that
/// cannot be read are skipped.
#[must_use]
pub fn subtree_size(dir: &Path, follow_symlinks: bool) -> u64 {
    WalkDir::new(dir)
        .follow_links(follow_symlinks)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry in size computation");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Formats a byte count for humans.
///
/// Scales through B, KB, MB, GB and TB with a 1024 divisor, stopping at the
/// first unit below 1024 or at TB. Bytes print as an integer, every other
/// unit with two decimals.
///
/// # Examples
///
/// ```
/// use unnest_core::size::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1023), "1023 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}

/// Size change between archive input and extracted output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeDelta {
    /// The archives were larger than what they unpacked to.
    Compression {
        /// Fraction of the input saved, in `(0, 1]`.
        ratio: f64,
        /// Bytes saved.
        saved: u64,
    },
    /// The archives unpacked to at least their own size.
    Expansion {
        /// Growth relative to the input, as a non-negative fraction.
        ratio: f64,
        /// Bytes added.
        expanded: u64,
    },
}

impl SizeDelta {
    /// Returns the signed ratio `(input - output) / input`.
    #[must_use]
    pub fn signed_ratio(&self) -> f64 {
        match *self {
            Self::Compression { ratio, .. } => ratio,
            Self::Expansion { ratio, .. } => -ratio,
        }
    }

    /// Returns the ratio as a percentage, always non-negative.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        match *self {
            Self::Compression { ratio, .. } | Self::Expansion { ratio, .. } => ratio * 100.0,
        }
    }
}

impl fmt::Display for SizeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Compression { saved, .. } => write!(
                f,
                "Compression: {:.1}% (saved {})",
                self.percentage(),
                format_size(saved)
            ),
            Self::Expansion { expanded, .. } => write!(
                f,
                "Expansion: {:.1}% (expanded by {})",
                self.percentage(),
                format_size(expanded)
            ),
        }
    }
}

/// Computes the size change from `input` archive bytes to `output`
/// extracted bytes.
///
/// Returns `None` when `input` is zero.
///
/// # Examples
///
/// ```
/// use unnest_core::size::SizeDelta;
/// use unnest_core::size::size_delta;
///
/// assert!(matches!(
///     size_delta(1000, 400),
///     Some(SizeDelta::Compression { saved: 600, .. })
/// ));
/// assert!(matches!(
///     size_delta(100, 300),
///     Some(SizeDelta::Expansion { expanded: 200, .. })
/// ));
/// assert_eq!(size_delta(0, 10), None);
/// ```
#[must_use]
pub fn size_delta(input: u64, output: u64) -> Option<SizeDelta> {
    if input == 0 {
        return None;
    }
    let ratio = (input as f64 - output as f64) / input as f64;
    // Pick the variant on the integers; large close values can round to an
    // f64 ratio of zero.
    if input > output {
        Some(SizeDelta::Compression {
            ratio,
            saved: input - output,
        })
    } else {
        Some(SizeDelta::Expansion {
            ratio: ratio.abs(),
            expanded: output - input,
        })
    }
}
