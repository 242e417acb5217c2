//! Shell completion generation

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;
use clap::CommandFactory;

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "perfline", &mut std::io::stdout());
    Ok(())
}
