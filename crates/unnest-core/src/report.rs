//! Run statistics and the derived end-of-run report.

use std::path::PathBuf;

use crate::ExtractionError;
use crate::size::SizeDelta;
use crate::size::format_size;
use crate::size::size_delta;

/// Counters accumulated by one extraction run.
///
/// Mutated only by the engine while the run is in progress; read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Number of successful extractions, root included.
    pub extractions: usize,

    /// Number of distinct archive paths discovered.
    pub files_processed: usize,

    /// Total size of the archives that were extracted.
    pub input_bytes: u64,

    /// Total bytes added to the extraction directories.
    pub output_bytes: u64,

    /// Number of scan iterations performed.
    pub iterations: usize,

    /// Archives deleted by cleanup.
    pub removed_archives: Vec<PathBuf>,

    /// Non-fatal failures recorded during the run.
    pub warnings: Vec<ExtractionError>,
}

impl RunStatistics {
    /// Creates empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the size change from archive input to extracted output.
    ///
    /// `None` until at least one non-empty archive has been extracted.
    #[must_use]
    pub fn size_delta(&self) -> Option<SizeDelta> {
        size_delta(self.input_bytes, self.output_bytes)
    }

    /// Returns whether any warnings were recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Counts nested archives that failed to extract.
    #[must_use]
    pub fn nested_failures(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, ExtractionError::NestedExtractionFailed { .. }))
            .count()
    }

    /// Returns `true` if the run stopped at its iteration bound.
    #[must_use]
    pub fn hit_iteration_cap(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ExtractionError::IterationCapReached { .. }))
    }

    pub(crate) fn record_extraction(&mut self, input_bytes: u64, output_bytes: u64) {
        self.extractions += 1;
        self.input_bytes = self.input_bytes.saturating_add(input_bytes);
        self.output_bytes = self.output_bytes.saturating_add(output_bytes);
    }

    pub(crate) fn add_warning(&mut self, warning: ExtractionError) {
        self.warnings.push(warning);
    }
}

/// Read-only summary of a finished run.
///
/// Built from [`RunStatistics`]; holds nothing that is not derived from
/// them.
///
/// # Examples
///
/// ```
/// use unnest_core::ExtractionReport;
/// use unnest_core::RunStatistics;
///
/// let stats = RunStatistics {
///     extractions: 3,
///     files_processed: 3,
///     input_bytes: 2048,
///     output_bytes: 1024,
///     ..Default::default()
/// };
/// let report = ExtractionReport::from_stats(&stats);
/// assert_eq!(report.total_input, "2.00 KB");
/// assert_eq!(report.size_difference, "Compression: 50.0% (saved 1.00 KB)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    /// Number of successful extractions.
    pub extractions: usize,

    /// Number of distinct archive paths discovered.
    pub files_processed: usize,

    /// Scan iterations performed.
    pub iterations: usize,

    /// Raw archive byte total.
    pub input_bytes: u64,

    /// Raw extracted byte total.
    pub output_bytes: u64,

    /// Human-readable archive byte total.
    pub total_input: String,

    /// Human-readable extracted byte total.
    pub total_output: String,

    /// Compression or expansion summary.
    pub size_difference: String,

    /// Signed ratio `(input - output) / input`, if any input was measured.
    pub ratio: Option<f64>,

    /// Number of archives removed by cleanup.
    pub archives_removed: usize,

    /// Recorded warning messages.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Derives a report from run statistics.
    #[must_use]
    pub fn from_stats(stats: &RunStatistics) -> Self {
        let delta = stats.size_delta();
        Self {
            extractions: stats.extractions,
            files_processed: stats.files_processed,
            iterations: stats.iterations,
            input_bytes: stats.input_bytes,
            output_bytes: stats.output_bytes,
            total_input: format_size(stats.input_bytes),
            total_output: format_size(stats.output_bytes),
            size_difference: delta.map_or_else(
                || "No size comparison available".to_string(),
                |d| d.to_string(),
            ),
            ratio: delta.map(|d| d.signed_ratio()),
            archives_removed: stats.removed_archives.len(),
            warnings: stats.warnings.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns whether any warnings were recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl From<&RunStatistics> for ExtractionReport {
    fn from(stats: &RunStatistics) -> Self {
        Self::from_stats(stats)
    }
}
