//! Progress spinner for extraction runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;
use std::time::Duration;
use unnest_core::ExtractionEvent;
use unnest_core::ExtractionObserver;

/// Spinner implementing `ExtractionObserver`.
///
/// Shows the archive being extracted, the scan iteration and the number of
/// completed extractions when running in a TTY. Automatically cleans up on
/// drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        // Template: "⠋ Extracting inner.zip (3 extracted, 2s)"
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({pos} extracted, {elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    #[cfg(test)]
    fn extracted(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ExtractionObserver for CliProgress {
    fn on_event(&mut self, event: &ExtractionEvent) {
        match event {
            ExtractionEvent::ExtractionStarted { archive, .. } => {
                self.bar
                    .set_message(format!("Extracting {}", display_name(archive)));
            }
            ExtractionEvent::ExtractionSucceeded { .. } => self.bar.inc(1),
            ExtractionEvent::BatchFound {
                iteration,
                archives,
            } => {
                self.bar.set_message(format!(
                    "Scan {iteration}: {} nested archive(s)",
                    archives.len()
                ));
            }
            ExtractionEvent::Converged { .. } => self.bar.finish_and_clear(),
            ExtractionEvent::ExtractionFailed { .. }
            | ExtractionEvent::ArchiveRemoved { .. }
            | ExtractionEvent::CleanupFailed { .. }
            | ExtractionEvent::IterationCapReached { .. } => {}
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use unnest_core::ArchiveKind;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/a/b/inner.zip")), "inner.zip");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn test_progress_observer() {
        let mut progress = CliProgress::new();

        progress.on_event(&ExtractionEvent::ExtractionStarted {
            archive: PathBuf::from("root.zip"),
            destination: PathBuf::from("root"),
            kind: ArchiveKind::Zip,
            input_bytes: 10,
            nested: false,
        });
        progress.on_event(&ExtractionEvent::ExtractionSucceeded {
            archive: PathBuf::from("root.zip"),
            input_bytes: 10,
            output_bytes: 20,
        });

        assert_eq!(progress.extracted(), 1);
    }
}
