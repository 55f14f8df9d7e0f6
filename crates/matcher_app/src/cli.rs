use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use matcher_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "matcher", version, about = "Upload a resume and browse matching jobs")]
pub struct Cli {
    /// Configuration file (RON). Defaults to ./matcher.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base address of the analysis service.
    #[arg(long, global = true, env = "MATCHER_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Overall timeout for each request, in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Where log output goes.
    #[arg(long, global = true, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log debug output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List jobs, optionally filtered by title.
    Jobs {
        /// Case-insensitive text to look for in job titles.
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Upload a resume, analyze it and generate matches.
    Upload {
        path: PathBuf,
        /// Media type to declare for the file instead of guessing from its extension.
        #[arg(long)]
        media_type: Option<String>,
    },
    /// Show matches for a candidate (defaults to the last completed upload).
    Matches { candidate_id: Option<String> },
    /// Check that the service is reachable.
    Ping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
