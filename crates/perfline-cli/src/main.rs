//! Perfline CLI - extract and inspect performance baselines
//!
//! Entry point for the `perfline` binary: parses arguments, wires logging
//! and configuration, and dispatches to the per-command handlers.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let config = Config::load_with_file(cli.config.as_deref())?;
    let output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);

    tracing::info!(command = ?cli.command, verbosity = cli.verbosity_level(), "executing command");

    match cli.command {
        Commands::Extract(args) => handlers::handle_extract(args, &config, &output),
        Commands::List(args) => handlers::handle_list(args, &config, &output),
        Commands::Show(args) => handlers::handle_show(args, &config, &output),
        Commands::Latest(args) => handlers::handle_latest(args, &config, &output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system from CLI flags and environment
fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}
