//! Show command handler

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use perfline_core::BaselineStore;
use tracing::instrument;

/// Handle the show command
#[instrument(skip(args, config, output), fields(pattern = %args.pattern))]
pub fn handle_show(args: ShowArgs, config: &Config, output: &OutputWriter) -> Result<()> {
    let baselines_dir = args
        .baselines_dir
        .unwrap_or_else(|| config.baselines_dir.clone());
    let store = BaselineStore::new(&baselines_dir);

    let (baseline, path) = store.load_with_pattern(Some(&args.pattern))?;
    output.info(&format!("Resolved to {}", path.display()))?;
    output.data(&baseline)?;

    Ok(())
}
