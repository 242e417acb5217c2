//! Baseline assembler: locate a run's log files, parse, calculate, merge
//!
//! Cluster health and node stats are required for any meaningful baseline;
//! transform and Kibana stats are optional because some runs intentionally
//! omit the entity engine or the Kibana data plane.

use crate::calculate::{
    calculate_cluster_health_summary, calculate_entity_metrics, calculate_kibana_metrics,
    calculate_latency_metrics, calculate_system_metrics,
};
use crate::error::{Error, Result};
use crate::parser::cluster_health::parse_cluster_health_file;
use crate::parser::kibana_stats::parse_kibana_stats_file;
use crate::parser::node_stats::parse_node_stats_file;
use crate::parser::transform_stats::parse_transform_stats_file;
use crate::types::{BaselineMetrics, KibanaStatsData, MetricsBundle, TestConfig, TransformStatsData};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const CLUSTER_HEALTH_MARKER: &str = "cluster-health";
const NODE_STATS_MARKER: &str = "node-stats";
const TRANSFORM_STATS_MARKER: &str = "transform-stats";
const KIBANA_STATS_MARKER: &str = "kibana-stats";

/// Extract a baseline from the log files of one test run.
///
/// Files are matched by `starts_with(log_prefix)` plus a kind marker in the
/// file name. Fails fast when a required log is absent or unreadable; no
/// partial baseline is ever produced.
pub fn extract_baseline_metrics(
    logs_dir: impl AsRef<Path>,
    log_prefix: &str,
    test_config: &TestConfig,
) -> Result<BaselineMetrics> {
    let logs_dir = logs_dir.as_ref();
    info!(dir = %logs_dir.display(), prefix = log_prefix, "extracting baseline metrics");

    let cluster_health_path = require_log(logs_dir, log_prefix, CLUSTER_HEALTH_MARKER)?;
    let node_stats_path = require_log(logs_dir, log_prefix, NODE_STATS_MARKER)?;

    let health = parse_cluster_health_file(&cluster_health_path)?;
    let nodes = parse_node_stats_file(&node_stats_path)?;

    let transforms = match find_log_file(logs_dir, log_prefix, TRANSFORM_STATS_MARKER) {
        Some(path) => parse_transform_stats_file(&path)?,
        None => {
            warn!(prefix = log_prefix, "no transform stats log; entity metrics will be zero");
            TransformStatsData::default()
        }
    };
    let kibana = match find_log_file(logs_dir, log_prefix, KIBANA_STATS_MARKER) {
        Some(path) => parse_kibana_stats_file(&path)?,
        None => {
            warn!(prefix = log_prefix, "no kibana stats log; kibana metrics will be zero");
            KibanaStatsData::default()
        }
    };

    // Entity metrics first: system throughput needs the per-entity totals.
    let per_entity_type = calculate_entity_metrics(&transforms);
    let system = calculate_system_metrics(&nodes, &transforms, &per_entity_type);

    let metrics = MetricsBundle {
        latency: calculate_latency_metrics(&transforms),
        system,
        per_entity_type,
        transform_states: transforms.transform_states,
        errors: crate::types::ErrorTotals {
            search_failures: transforms.search_failures,
            index_failures: transforms.index_failures,
        },
        cluster_health: calculate_cluster_health_summary(&health),
        kibana: calculate_kibana_metrics(&kibana),
    };

    Ok(BaselineMetrics::new(log_prefix, *test_config, metrics))
}

fn require_log(dir: &Path, prefix: &str, marker: &str) -> Result<PathBuf> {
    find_log_file(dir, prefix, marker).ok_or_else(|| Error::MissingLogFile {
        marker: marker.to_string(),
        prefix: prefix.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// Locate the log file for one kind marker, preferring the lexically first
/// name when several match.
fn find_log_file(dir: &Path, prefix: &str, marker: &str) -> Option<PathBuf> {
    let mut matches: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            name.starts_with(prefix) && name.contains(marker)
        })
        .map(|entry| entry.into_path())
        .collect();
    matches.sort();
    if let Some(path) = matches.first() {
        debug!(marker, file = %path.display(), "located log file");
    }
    matches.into_iter().next()
}
