//! Shared handler helpers

use perfline_core::BaselineMetrics;

/// Render the headline numbers of a baseline for human output.
pub fn baseline_summary_lines(baseline: &BaselineMetrics) -> Vec<String> {
    let metrics = &baseline.metrics;
    let mut lines = vec![
        format!("Test:        {}", baseline.test_name),
        format!("Created:     {}", baseline.timestamp),
        format!(
            "Config:      {} entities, {} logs",
            baseline.test_config.entity_count, baseline.test_config.log_count
        ),
        format!(
            "Search:      avg {:.2} ms/op, p95 {:.2}, p99 {:.2}",
            metrics.latency.search.avg, metrics.latency.search.p95, metrics.latency.search.p99
        ),
        format!(
            "Indexing:    avg {:.2} ms/op, p95 {:.2}, p99 {:.2}",
            metrics.latency.indexing.avg, metrics.latency.indexing.p95, metrics.latency.indexing.p99
        ),
        format!(
            "Processing:  avg {:.2} ms/op, p95 {:.2}, p99 {:.2}",
            metrics.latency.processing.avg,
            metrics.latency.processing.p95,
            metrics.latency.processing.p99
        ),
        format!(
            "Throughput:  {:.2} docs/s, index efficiency {:.3}",
            metrics.system.throughput_docs_per_sec, metrics.system.index_efficiency
        ),
        format!(
            "CPU:         avg {:.1}%, peak {:.1}%",
            metrics.system.avg_cpu_percent, metrics.system.peak_cpu_percent
        ),
        format!(
            "Errors:      {} search failures, {} index failures",
            metrics.errors.search_failures, metrics.errors.index_failures
        ),
    ];

    for (entity, summary) in &metrics.per_entity_type {
        lines.push(format!(
            "  {entity:<9} {} docs processed, search p95 {:.2} ms/op",
            summary.documents_processed, summary.search.p95
        ));
    }

    lines
}
