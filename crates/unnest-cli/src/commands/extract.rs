//! Recursive extraction command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use unnest_core::EngineConfig;
use unnest_core::ExtractionEngine;
use unnest_core::ExtractionReport;
use unnest_core::events::NoopObserver;
use unnest_core::formats::default_destination;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let Some(archive) = args.archive.as_deref() else {
        bail!("no archive given\nHINT: Run `unnest --help` for usage.");
    };
    let destination = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_destination(archive));

    let config = EngineConfig::default()
        .with_cleanup(args.cleanup)
        .with_max_iterations(args.max_iterations);
    let mut engine = ExtractionEngine::new(config);

    let stats = if show_progress {
        let mut progress = CliProgress::new();
        add_archive_context(
            engine.run(archive, Some(&destination), &mut progress),
            archive,
        )?
    } else {
        add_archive_context(
            engine.run(archive, Some(&destination), &mut NoopObserver),
            archive,
        )?
    };

    let report = ExtractionReport::from_stats(&stats);
    formatter.format_extraction_result(archive, &destination, &report, args.stats)?;

    Ok(())
}
