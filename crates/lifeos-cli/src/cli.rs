//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use lifeos_ingest::RunMode;
use std::path::PathBuf;

/// LifeOS - Ingest journal files and exports into the LifeOS store.
#[derive(Debug, Parser)]
#[command(name = "lifeos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory of daily journal files
    #[arg(long, env = "LIFEOS_JOURNAL_DIR", global = true)]
    pub journal_dir: Option<PathBuf>,

    /// Legacy name for the journal directory
    #[arg(long, env = "MEMORY_DIR", hide = true, global = true)]
    pub memory_dir: Option<PathBuf>,

    /// Directory of JSON exports
    #[arg(long, env = "LIFEOS_EXPORT_DIR", global = true)]
    pub export_dir: Option<PathBuf>,

    /// Remote store URL; selects the REST store
    #[arg(long, env = "SUPABASE_URL", global = true)]
    pub store_url: Option<String>,

    /// Remote store service key
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true, global = true)]
    pub store_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (totals only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sync the journal and import every export (default)
    Run,

    /// Sync the journal only
    Sync,

    /// Import exports and transcripts only
    Import,

    /// Show record counts per table
    Status,

    /// Classify one journal file without touching the store
    Classify(ClassifyArgs),
}

impl Command {
    /// Run mode for commands that perform a run
    pub fn run_mode(&self) -> Option<RunMode> {
        match self {
            Command::Run => Some(RunMode::All),
            Command::Sync => Some(RunMode::Journal),
            Command::Import => Some(RunMode::Bulk),
            Command::Status | Command::Classify(_) => None,
        }
    }
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Journal file to classify
    pub file: PathBuf,

    /// Day to assign (defaults to the date in the filename, then today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
