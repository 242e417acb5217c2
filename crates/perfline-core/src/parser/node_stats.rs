//! Parser for the cluster node stats log
//!
//! Node stats are point-in-time readings, so no incremental reconstruction
//! is needed; every node observed in a sample appends to the flat series,
//! and CPU additionally lands in a per-node map.

use crate::stats::read_to_string_ctx;
use crate::types::NodeStatsData;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Parse a node stats log file.
pub fn parse_node_stats_file(path: impl AsRef<Path>) -> crate::error::Result<NodeStatsData> {
    let path = path.as_ref();
    let content = read_to_string_ctx(path)?;
    let data = parse_node_stats(&content);
    debug!(
        file = %path.display(),
        cpu_samples = data.cpu_percent.len(),
        nodes = data.per_node_cpu.len(),
        "parsed node stats log"
    );
    Ok(data)
}

/// Parse node stats log content.
pub fn parse_node_stats(content: &str) -> NodeStatsData {
    let mut data = NodeStatsData::default();

    for line in content.lines() {
        let Some((_, body)) = super::parse_line(line) else {
            continue;
        };
        let Some(nodes) = body.get("nodes").and_then(Value::as_object) else {
            continue;
        };

        for (node_id, node) in nodes {
            let name = node
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(node_id)
                .to_string();

            if let Some(cpu) = node.pointer("/os/cpu/percent").and_then(Value::as_f64) {
                data.cpu_percent.push(cpu);
                data.per_node_cpu.entry(name).or_default().push(cpu);
            }
            if let Some(heap) = node
                .pointer("/jvm/mem/heap_used_percent")
                .and_then(Value::as_f64)
            {
                data.heap_percent.push(heap);
            }
            if let Some(bytes) = node
                .pointer("/jvm/mem/heap_used_in_bytes")
                .and_then(Value::as_f64)
            {
                data.heap_bytes.push(bytes);
            }
        }
    }

    data
}
