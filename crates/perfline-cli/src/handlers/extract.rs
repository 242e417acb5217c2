//! Extract command handler

use crate::cli::{ExtractArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::handlers::utils::baseline_summary_lines;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use perfline_core::{extract_baseline_metrics, BaselineStore, TestConfig};
use tracing::{info, instrument};

/// Handle the extract command
#[instrument(skip(args, config, output), fields(prefix = %args.log_prefix))]
pub fn handle_extract(args: ExtractArgs, config: &Config, output: &OutputWriter) -> Result<()> {
    let _timer = Timer::new("extract_command");

    let logs_dir = args.logs_dir.unwrap_or_else(|| config.logs_dir.clone());
    let baselines_dir = args
        .baselines_dir
        .unwrap_or_else(|| config.baselines_dir.clone());
    let test_config = TestConfig {
        entity_count: args.entity_count,
        log_count: args.log_count,
    };

    output.info(&format!(
        "Extracting baseline for '{}' from {}",
        args.log_prefix,
        logs_dir.display()
    ))?;

    let baseline = extract_baseline_metrics(&logs_dir, &args.log_prefix, &test_config)?;
    info!(test_name = %baseline.test_name, "baseline extracted");

    if output.format() == OutputFormat::Human {
        output.section("Baseline")?;
        for line in baseline_summary_lines(&baseline) {
            output.info(&line)?;
        }
    } else {
        output.data(&baseline)?;
    }

    if args.no_save {
        output.info("Skipping persistence (--no-save)")?;
        return Ok(());
    }

    let store = BaselineStore::new(&baselines_dir);
    let path = store.save(&baseline)?;
    output.success(&format!("Baseline written to {}", path.display()))?;

    Ok(())
}
