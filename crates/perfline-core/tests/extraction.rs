//! End-to-end extraction over a synthetic log directory

use perfline_core::{extract_baseline_metrics, BaselineStore, EntityType, TestConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_log(dir: &Path, name: &str, lines: &[String]) {
    fs::write(dir.join(name), lines.join("\n")).unwrap();
}

fn transform_line(offset_ms: i64, id: &str, search_total: u64, search_time_ms: u64, docs: u64) -> String {
    let base = chrono::DateTime::parse_from_rfc3339("2024-03-01T10:00:00.000Z").unwrap();
    let ts = base + chrono::Duration::milliseconds(offset_ms);
    let body = serde_json::json!({
        "transforms": [{
            "state": "indexing",
            "stats": {
                "search_total": search_total,
                "search_time_in_ms": search_time_ms,
                "documents_processed": docs,
                "documents_indexed": docs,
                "search_failures": 0,
                "index_failures": 0,
            }
        }]
    });
    format!(
        "{} - Transform {} stats: {}",
        ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        id,
        body
    )
}

fn health_line(status: &str) -> String {
    format!(
        r#"2024-03-01T10:00:00.000Z - {{"status":"{status}","active_shards":6,"relocating_shards":0,"initializing_shards":0,"unassigned_shards":0}}"#
    )
}

fn node_line(cpu: f64) -> String {
    let body = serde_json::json!({
        "nodes": {"n1": {
            "name": "node-1",
            "os": {"cpu": {"percent": cpu}},
            "jvm": {"mem": {"heap_used_percent": 60.0, "heap_used_in_bytes": 4_000_000_000u64}}
        }}
    });
    format!("2024-03-01T10:00:00.000Z - {body}")
}

#[test]
fn full_pipeline_produces_and_persists_a_baseline() {
    let logs = TempDir::new().unwrap();
    write_log(
        logs.path(),
        "bench-7-cluster-health.log",
        &[health_line("green"), health_line("green"), health_line("yellow")],
    );
    write_log(
        logs.path(),
        "bench-7-node-stats.log",
        &[node_line(20.0), node_line(40.0)],
    );
    // The worked example: 8 incremental ops over 40 incremental ms at
    // 5 s cadence must yield exactly one 5.0 ms/op search latency.
    write_log(
        logs.path(),
        "bench-7-transform-stats.log",
        &[
            transform_line(0, "host-entity-engine", 100, 500, 1000),
            transform_line(5000, "host-entity-engine", 108, 540, 2500),
            transform_line(10_000, "host-entity-engine", 120, 600, 4000),
        ],
    );

    let config = TestConfig {
        entity_count: 500,
        log_count: 100_000,
    };
    let baseline = extract_baseline_metrics(logs.path(), "bench-7", &config).unwrap();

    assert_eq!(baseline.test_name, "bench-7");
    assert_eq!(baseline.test_config, config);

    // Latency flows into both the aggregate and the host partition
    assert_eq!(baseline.metrics.latency.search.p50, 5.0);
    let host = &baseline.metrics.per_entity_type[&EntityType::Host];
    assert_eq!(host.search.p50, 5.0);
    assert_eq!(host.documents_processed, 4000);

    // Throughput: 4000 docs over the 10 s sample span
    assert_eq!(baseline.metrics.system.throughput_docs_per_sec, 400.0);
    assert_eq!(baseline.metrics.system.index_efficiency, 1.0);

    assert_eq!(baseline.metrics.cluster_health.green_samples, 2);
    assert_eq!(baseline.metrics.cluster_health.yellow_samples, 1);
    assert_eq!(baseline.metrics.system.peak_cpu_percent, 40.0);

    // Kibana log was absent; its section is all zero
    assert_eq!(baseline.metrics.kibana.total_requests, 0);
    assert_eq!(baseline.metrics.kibana.event_loop_delay.max, 0.0);

    // Persist and reload through the store
    let store_dir = TempDir::new().unwrap();
    let store = BaselineStore::new(store_dir.path());
    let path = store.save(&baseline).unwrap();
    let reloaded = store.load(&path).unwrap();
    assert_eq!(reloaded, baseline);

    let (resolved, resolved_path) = store.load_with_pattern(Some("bench-7")).unwrap();
    assert_eq!(resolved, baseline);
    assert_eq!(resolved_path, path);
}

#[test]
fn required_logs_only_still_yields_a_complete_document() {
    let logs = TempDir::new().unwrap();
    write_log(logs.path(), "min-cluster-health.log", &[health_line("green")]);
    write_log(logs.path(), "min-node-stats.log", &[node_line(10.0)]);

    let baseline =
        extract_baseline_metrics(logs.path(), "min", &TestConfig::default()).unwrap();

    // Every entity partition exists and is zeroed
    assert_eq!(baseline.metrics.per_entity_type.len(), 4);
    for metrics in baseline.metrics.per_entity_type.values() {
        assert_eq!(metrics.documents_processed, 0);
        assert_eq!(metrics.search.p99, 0.0);
    }
    assert_eq!(baseline.metrics.latency.search.avg, 0.0);
    assert_eq!(baseline.metrics.errors.search_failures, 0);

    // And the document still round-trips
    let encoded = serde_json::to_string_pretty(&baseline).unwrap();
    let decoded: perfline_core::BaselineMetrics = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, baseline);
}
