//! Structured progress events emitted by the engine.
//!
//! Front-ends subscribe to a run through an [`ExtractionObserver`] instead of
//! the engine depending on any presentation layer. One event is emitted per
//! lifecycle point of a run.

use std::path::PathBuf;

use crate::ExtractionError;
use crate::RunStatistics;
use crate::formats::ArchiveKind;

/// A single progress event.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    /// An archive is about to be unpacked.
    ExtractionStarted {
        /// Archive being extracted.
        archive: PathBuf,
        /// Directory receiving its contents.
        destination: PathBuf,
        /// Archive kind from the suffix.
        kind: ArchiveKind,
        /// Archive size in bytes.
        input_bytes: u64,
        /// `false` for the root archive.
        nested: bool,
    },

    /// An archive was unpacked.
    ExtractionSucceeded {
        /// Archive that was extracted.
        archive: PathBuf,
        /// Archive size in bytes.
        input_bytes: u64,
        /// Bytes newly added under the destination.
        output_bytes: u64,
    },

    /// An archive could not be unpacked.
    ExtractionFailed {
        /// The failure; fatal for the root archive only.
        error: ExtractionError,
    },

    /// Cleanup deleted an extracted archive.
    ArchiveRemoved {
        /// The deleted archive.
        archive: PathBuf,
    },

    /// Cleanup could not delete an extracted archive.
    CleanupFailed {
        /// The recorded warning.
        error: ExtractionError,
    },

    /// A scan found new nested archives.
    BatchFound {
        /// Scan iteration, starting at 1.
        iteration: usize,
        /// Archives in discovery order.
        archives: Vec<PathBuf>,
    },

    /// A scan found nothing new; the run is complete.
    Converged {
        /// Final statistics of the run.
        stats: RunStatistics,
    },

    /// The scan loop hit its safety bound.
    IterationCapReached {
        /// The configured bound.
        limit: usize,
    },
}

/// Receiver for [`ExtractionEvent`]s.
///
/// The trait requires `Send` so a run can be moved to a worker thread.
/// Closures taking `&ExtractionEvent` implement it directly.
///
/// # Examples
///
/// ```
/// use unnest_core::events::ExtractionEvent;
/// use unnest_core::events::ExtractionObserver;
///
/// struct PrintObserver;
///
/// impl ExtractionObserver for PrintObserver {
///     fn on_event(&mut self, event: &ExtractionEvent) {
///         if let ExtractionEvent::BatchFound { archives, .. } = event {
///             println!("found {} nested archive(s)", archives.len());
///         }
///     }
/// }
/// ```
pub trait ExtractionObserver: Send {
    /// Called once per event, in emission order.
    fn on_event(&mut self, event: &ExtractionEvent);
}

impl<F> ExtractionObserver for F
where
    F: FnMut(&ExtractionEvent) + Send,
{
    fn on_event(&mut self, event: &ExtractionEvent) {
        self(event);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {
    fn on_event(&mut self, _event: &ExtractionEvent) {}
}

/// Observer that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Vec<ExtractionEvent>,
}

impl RecordingObserver {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in emission order.
    #[must_use]
    pub fn events(&self) -> &[ExtractionEvent] {
        &self.events
    }

    /// Consumes the recorder, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<ExtractionEvent> {
        self.events
    }

    /// Counts recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&ExtractionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl ExtractionObserver for RecordingObserver {
    fn on_event(&mut self, event: &ExtractionEvent) {
        self.events.push(event.clone());
    }
}
