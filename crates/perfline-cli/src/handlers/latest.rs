//! Latest command handler

use crate::cli::LatestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use perfline_core::BaselineStore;
use tracing::instrument;

/// Handle the latest command
#[instrument(skip(args, config, output))]
pub fn handle_latest(args: LatestArgs, config: &Config, output: &OutputWriter) -> Result<()> {
    let baselines_dir = args
        .baselines_dir
        .unwrap_or_else(|| config.baselines_dir.clone());
    let store = BaselineStore::new(&baselines_dir);

    let (baseline, path) = store.load_with_pattern(None)?;
    output.info(&format!("Most recent baseline: {}", path.display()))?;
    output.data(&baseline)?;

    Ok(())
}
