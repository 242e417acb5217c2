//! Parser for the cluster health log

use crate::stats::read_to_string_ctx;
use crate::types::ClusterHealthData;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Parse a cluster health log file.
pub fn parse_cluster_health_file(path: impl AsRef<Path>) -> crate::error::Result<ClusterHealthData> {
    let path = path.as_ref();
    let content = read_to_string_ctx(path)?;
    let data = parse_cluster_health(&content);
    debug!(
        file = %path.display(),
        samples = data.green_samples + data.yellow_samples + data.red_samples,
        "parsed cluster health log"
    );
    Ok(data)
}

/// Parse cluster health log content.
pub fn parse_cluster_health(content: &str) -> ClusterHealthData {
    let mut data = ClusterHealthData::default();

    for line in content.lines() {
        let Some((_, body)) = super::parse_line(line) else {
            continue;
        };

        match body.get("status").and_then(Value::as_str) {
            Some("green") => data.green_samples += 1,
            Some("yellow") => data.yellow_samples += 1,
            Some("red") => data.red_samples += 1,
            _ => {}
        }

        if let Some(value) = super::field_f64(&body, "active_shards") {
            data.active_shards.push(value);
        }
        if let Some(value) = super::field_f64(&body, "relocating_shards") {
            data.relocating_shards.push(value);
        }
        if let Some(value) = super::field_f64(&body, "initializing_shards") {
            data.initializing_shards.push(value);
        }
        if let Some(value) = super::field_f64(&body, "unassigned_shards") {
            data.unassigned_shards.push(value);
        }
    }

    data
}
