//! Cluster-level resource, throughput, and health summarization

use crate::stats::{average, max_of, max_of_u64, safe_div, summarize};
use crate::types::{
    ClusterHealthData, ClusterHealthSummary, EntityMetrics, EntityType, NodeStatsData,
    SystemMetrics, TransformStatsData,
};
use std::collections::BTreeMap;

/// Derive CPU/memory/throughput metrics from node and transform data.
///
/// Needs the per-entity summaries: end-of-run throughput is the sum of each
/// entity type's final `documents_processed` snapshot over the observed
/// time span.
pub fn calculate_system_metrics(
    nodes: &NodeStatsData,
    transforms: &TransformStatsData,
    entity_metrics: &BTreeMap<EntityType, EntityMetrics>,
) -> SystemMetrics {
    let total_processed: u64 = entity_metrics.values().map(|m| m.documents_processed).sum();
    let total_indexed: u64 = entity_metrics.values().map(|m| m.documents_indexed).sum();

    let time_span_secs = match (
        transforms.timestamps.iter().min(),
        transforms.timestamps.iter().max(),
    ) {
        (Some(first), Some(last)) => (last - first) as f64 / 1000.0,
        _ => 0.0,
    };

    let per_node_cpu = nodes
        .per_node_cpu
        .iter()
        .map(|(name, series)| (name.clone(), summarize(series)))
        .collect();

    SystemMetrics {
        avg_cpu_percent: average(&nodes.cpu_percent),
        peak_cpu_percent: max_of(&nodes.cpu_percent),
        avg_heap_percent: average(&nodes.heap_percent),
        peak_heap_percent: max_of(&nodes.heap_percent),
        avg_heap_bytes: average(&nodes.heap_bytes),
        peak_heap_bytes: max_of(&nodes.heap_bytes),
        per_node_cpu,
        throughput_docs_per_sec: safe_div(total_processed as f64, time_span_secs),
        index_efficiency: safe_div(total_indexed as f64, total_processed as f64),
        pages_processed: max_of_u64(&transforms.pages_processed),
        trigger_count: max_of_u64(&transforms.trigger_counts),
        exponential_avg_checkpoint_duration_ms: last_or_zero(
            &transforms.exponential_avg_checkpoint_duration_ms,
        ),
        exponential_avg_documents_indexed: last_or_zero(
            &transforms.exponential_avg_documents_indexed,
        ),
        exponential_avg_documents_processed: last_or_zero(
            &transforms.exponential_avg_documents_processed,
        ),
    }
}

/// Roll the cluster health series up into a summary.
pub fn calculate_cluster_health_summary(health: &ClusterHealthData) -> ClusterHealthSummary {
    ClusterHealthSummary {
        green_samples: health.green_samples,
        yellow_samples: health.yellow_samples,
        red_samples: health.red_samples,
        avg_active_shards: average(&health.active_shards),
        max_relocating_shards: max_of(&health.relocating_shards),
        max_initializing_shards: max_of(&health.initializing_shards),
        max_unassigned_shards: max_of(&health.unassigned_shards),
    }
}

/// The exponential averages are the vendor's own smoothed estimate; the
/// last non-zero sample represents the state at test end.
fn last_or_zero(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::calculate_entity_metrics;

    fn transforms_with_span() -> TransformStatsData {
        let mut data = TransformStatsData::default();
        // 10 second run
        data.timestamps = vec![1_000_000, 1_005_000, 1_010_000];
        let host = data.per_entity_type.get_mut(&EntityType::Host).unwrap();
        host.documents_processed = vec![100, 300, 500];
        host.documents_indexed = vec![50, 150, 250];
        let user = data.per_entity_type.get_mut(&EntityType::User).unwrap();
        user.documents_processed = vec![200, 400, 500];
        user.documents_indexed = vec![100, 200, 250];
        data.exponential_avg_documents_processed = vec![80.0, 95.5];
        data
    }

    #[test]
    fn test_throughput_sums_entity_maxes_over_span() {
        let transforms = transforms_with_span();
        let entity_metrics = calculate_entity_metrics(&transforms);
        let system =
            calculate_system_metrics(&NodeStatsData::default(), &transforms, &entity_metrics);
        // (500 + 500) docs over 10 s
        assert_eq!(system.throughput_docs_per_sec, 100.0);
        // 500 indexed / 1000 processed
        assert_eq!(system.index_efficiency, 0.5);
    }

    #[test]
    fn test_exponential_average_takes_last_sample() {
        let transforms = transforms_with_span();
        let entity_metrics = calculate_entity_metrics(&transforms);
        let system =
            calculate_system_metrics(&NodeStatsData::default(), &transforms, &entity_metrics);
        assert_eq!(system.exponential_avg_documents_processed, 95.5);
        assert_eq!(system.exponential_avg_documents_indexed, 0.0);
    }

    #[test]
    fn test_node_resource_summaries() {
        let mut nodes = NodeStatsData::default();
        nodes.cpu_percent = vec![20.0, 80.0];
        nodes.heap_percent = vec![50.0, 60.0];
        nodes.per_node_cpu.insert("node-1".to_string(), vec![20.0, 80.0]);

        let transforms = TransformStatsData::default();
        let entity_metrics = calculate_entity_metrics(&transforms);
        let system = calculate_system_metrics(&nodes, &transforms, &entity_metrics);
        assert_eq!(system.avg_cpu_percent, 50.0);
        assert_eq!(system.peak_cpu_percent, 80.0);
        assert_eq!(system.per_node_cpu["node-1"].max, 80.0);
    }

    #[test]
    fn test_empty_inputs_yield_zeros() {
        let transforms = TransformStatsData::default();
        let entity_metrics = calculate_entity_metrics(&transforms);
        let system =
            calculate_system_metrics(&NodeStatsData::default(), &transforms, &entity_metrics);
        assert_eq!(system.throughput_docs_per_sec, 0.0);
        assert_eq!(system.index_efficiency, 0.0);
        assert_eq!(system.avg_cpu_percent, 0.0);
    }

    #[test]
    fn test_cluster_health_summary() {
        let health = ClusterHealthData {
            green_samples: 5,
            yellow_samples: 1,
            red_samples: 0,
            active_shards: vec![10.0, 12.0],
            relocating_shards: vec![0.0, 1.0],
            initializing_shards: vec![0.0],
            unassigned_shards: vec![0.0, 2.0],
        };
        let summary = calculate_cluster_health_summary(&health);
        assert_eq!(summary.green_samples, 5);
        assert_eq!(summary.avg_active_shards, 11.0);
        assert_eq!(summary.max_unassigned_shards, 2.0);
    }
}
