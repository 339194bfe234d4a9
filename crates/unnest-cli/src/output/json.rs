//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use unnest_core::ExtractionReport;

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct ExtractionOutput {
    archive: String,
    destination: String,
    extractions: usize,
    files_processed: usize,
    iterations: usize,
    input_bytes: u64,
    output_bytes: u64,
    total_input: String,
    total_output: String,
    size_difference: String,
    ratio: Option<f64>,
    archives_removed: usize,
    warnings: Vec<String>,
}

impl ExtractionOutput {
    fn new(archive: &Path, destination: &Path, report: &ExtractionReport) -> Self {
        Self {
            archive: archive.display().to_string(),
            destination: destination.display().to_string(),
            extractions: report.extractions,
            files_processed: report.files_processed,
            iterations: report.iterations,
            input_bytes: report.input_bytes,
            output_bytes: report.output_bytes,
            total_input: report.total_input.clone(),
            total_output: report.total_output.clone(),
            size_difference: report.size_difference.clone(),
            ratio: report.ratio,
            archives_removed: report.archives_removed,
            warnings: report.warnings.clone(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    // Statistics are always part of the JSON document.
    fn format_extraction_result(
        &self,
        archive: &Path,
        destination: &Path,
        report: &ExtractionReport,
        _show_stats: bool,
    ) -> Result<()> {
        let data = ExtractionOutput::new(archive, destination, report);
        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("extract", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
