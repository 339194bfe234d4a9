//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use unnest_core::config::DEFAULT_MAX_ITERATIONS;

#[derive(Parser)]
#[command(name = "unnest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub extract: ExtractArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Diagnostic log level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive to extract recursively
    #[arg(value_name = "ARCHIVE", required = true)]
    pub archive: Option<PathBuf>,

    /// Output directory (default: next to the archive, named after it)
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Remove each archive after it has been extracted
    #[arg(long)]
    pub cleanup: bool,

    /// Print extraction statistics
    #[arg(long)]
    pub stats: bool,

    /// Maximum number of scan iterations for nested archives
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ITERATIONS, value_parser = parse_max_iterations)]
    pub max_iterations: usize,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

/// Parse a positive iteration bound
fn parse_max_iterations(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("iteration limit must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid iteration limit: {s}")),
    }
}
