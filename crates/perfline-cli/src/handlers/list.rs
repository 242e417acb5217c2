//! List command handler

use crate::cli::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use perfline_core::BaselineStore;
use tracing::instrument;

/// Handle the list command
#[instrument(skip(args, config, output))]
pub fn handle_list(args: ListArgs, config: &Config, output: &OutputWriter) -> Result<()> {
    let baselines_dir = args
        .baselines_dir
        .unwrap_or_else(|| config.baselines_dir.clone());
    let store = BaselineStore::new(&baselines_dir);

    let files = store.list()?;

    if output.format() == OutputFormat::Human {
        if files.is_empty() {
            output.info(&format!("No baselines in {}", baselines_dir.display()))?;
            return Ok(());
        }
        for path in &files {
            output.info(&path.file_name().unwrap_or_default().to_string_lossy())?;
        }
    } else {
        let names: Vec<String> = files
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        output.data(&names)?;
    }

    Ok(())
}
