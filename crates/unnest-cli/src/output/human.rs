//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use unnest_core::ExtractionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    /// Renders the statistics block, one line per entry.
    fn statistics_lines(report: &ExtractionReport) -> Vec<String> {
        let mut lines = vec![
            format!("  Archives extracted:   {}", report.extractions),
            format!("  Archives found:       {}", report.files_processed),
            format!("  Scan iterations:      {}", report.iterations),
            format!("  Total archive size:   {}", report.total_input),
            format!("  Total extracted size: {}", report.total_output),
            format!("  Size difference:      {}", report.size_difference),
        ];
        if report.archives_removed > 0 {
            lines.push(format!(
                "  Archives removed:     {}",
                report.archives_removed
            ));
        }
        lines
    }

    fn format_warning(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(
        &self,
        archive: &Path,
        destination: &Path,
        report: &ExtractionReport,
        show_stats: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let headline = format!(
            "Extraction complete: {} -> {}",
            archive.display(),
            destination.display()
        );
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {headline}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(&headline);
        }

        if show_stats || self.verbose {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Extraction Statistics:").bold()));
            } else {
                let _ = self.term.write_line("Extraction Statistics:");
            }
            for line in Self::statistics_lines(report) {
                let _ = self.term.write_line(&line);
            }
        } else {
            let _ = self
                .term
                .write_line(&format!("  Archives extracted: {}", report.extractions));
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            for warning in &report.warnings {
                self.format_warning(warning);
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
