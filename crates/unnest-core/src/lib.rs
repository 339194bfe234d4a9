//! Recursive extraction of nested archives.
//!
//! `unnest-core` unpacks an archive, then keeps scanning the extracted tree
//! for further archives (zip, tar in any common compression, gzip) and
//! unpacks each of them next to itself until nothing new turns up. Every
//! archive is extracted at most once per run, a corrupt nested archive never
//! stops the run, and the scan loop is bounded.
//!
//! # Examples
//!
//! ```no_run
//! use unnest_core::EngineConfig;
//! use unnest_core::ExtractionReport;
//! use unnest_core::unnest_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EngineConfig::default();
//! let stats = unnest_archive("bundle.zip", None, &config)?;
//! let report = ExtractionReport::from_stats(&stats);
//! println!("{} extraction(s), {}", report.extractions, report.size_difference);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod extraction;
pub mod formats;
pub mod report;
pub mod size;
pub mod visited;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::unnest_archive;
pub use api::unnest_archive_with_observer;
pub use config::EngineConfig;
pub use error::CodecError;
pub use error::ExtractionError;
pub use error::Result;
pub use events::ExtractionEvent;
pub use events::ExtractionObserver;
pub use extraction::CancellationToken;
pub use extraction::EngineState;
pub use extraction::ExtractionEngine;
pub use formats::ArchiveKind;
pub use report::ExtractionReport;
pub use report::RunStatistics;
pub use visited::VisitedSet;
