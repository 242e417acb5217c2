//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Perfline CLI - Performance baseline extraction and lookup
///
/// Extracts baseline performance metrics from the raw operational logs of a
/// benchmark run and manages the resulting baseline documents.
#[derive(Parser, Debug)]
#[command(
    name = "perfline",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PERFLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective verbosity, with quiet winning
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    pub fn use_color(&self) -> bool {
        !self.no_color
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a baseline from a run's log files and persist it
    Extract(ExtractArgs),

    /// List persisted baselines, newest-looking first
    List(ListArgs),

    /// Resolve a baseline by pattern or path and print it
    Show(ShowArgs),

    /// Load and print the most recent baseline
    Latest(LatestArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the extract command
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Log-file prefix identifying the test run
    #[arg(value_name = "LOG_PREFIX")]
    pub log_prefix: String,

    /// Directory containing the run's log files
    #[arg(long, value_name = "DIR")]
    pub logs_dir: Option<PathBuf>,

    /// Directory for persisted baselines
    #[arg(long, value_name = "DIR")]
    pub baselines_dir: Option<PathBuf>,

    /// Number of simulated entities in the run
    #[arg(long, default_value_t = 0)]
    pub entity_count: u64,

    /// Number of log records generated by the run
    #[arg(long, default_value_t = 0)]
    pub log_count: u64,

    /// Compute and print the baseline without persisting it
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory for persisted baselines
    #[arg(long, value_name = "DIR")]
    pub baselines_dir: Option<PathBuf>,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Baseline name pattern, file name, or literal path
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Directory for persisted baselines
    #[arg(long, value_name = "DIR")]
    pub baselines_dir: Option<PathBuf>,
}

/// Arguments for the latest command
#[derive(Parser, Debug)]
pub struct LatestArgs {
    /// Directory for persisted baselines
    #[arg(long, value_name = "DIR")]
    pub baselines_dir: Option<PathBuf>,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}
