use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tally_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "review-tally")]
#[command(about = "Live response-only word counts for offline review forms")]
pub struct Cli {
    /// RON config file; defaults to ./review_tally.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Override the per-paper word threshold.
    #[arg(long, global = true)]
    pub threshold: Option<i64>,
    /// Override the debounce interval in milliseconds.
    #[arg(long = "debounce-ms", global = true)]
    pub debounce_ms: Option<u64>,
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogTarget>,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// One badge per paper, a summary table, or JSON.
    Report {
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Status line and warning for the paper containing a line.
    Focus {
        file: PathBuf,
        /// 1-based line number of the cursor.
        #[arg(long)]
        line: usize,
    },
    /// Re-report whenever the file changes.
    Watch {
        file: PathBuf,
        /// 1-based line number to keep a status line for.
        #[arg(long)]
        line: Option<usize>,
        #[arg(long)]
        summary: bool,
    },
    /// Print the effective configuration as RON.
    Config,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(long, conflicts_with = "json")]
    pub summary: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
