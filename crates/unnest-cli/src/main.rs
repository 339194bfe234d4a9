//! Unnest CLI - Command-line utility for recursively extracting nested
//! archives.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.log_level);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(cli::Commands::Completion(args)) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
        None => {
            let show_progress = !cli.json && !cli.quiet && progress::CliProgress::should_show();
            commands::extract::execute(&cli.extract, &*formatter, show_progress)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            formatter.format_error(&e);
            ExitCode::FAILURE
        }
    }
}
