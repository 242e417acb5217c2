//! Core types and data structures for the Perfline extraction engine
//!
//! This module defines the parsed time-series containers produced by the
//! log parsers and the `BaselineMetrics` document assembled from them.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The universal summarization unit used throughout the metrics tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentileMetrics {
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
}

/// Logical partition of transform activity, inferred from the transform id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Host,
    User,
    Service,
    Generic,
}

impl EntityType {
    /// All entity types, in partition order
    pub const ALL: [EntityType; 4] = [
        EntityType::Host,
        EntityType::User,
        EntityType::Service,
        EntityType::Generic,
    ];

    /// Infer the entity type from a free-text transform identifier.
    ///
    /// Substring matching is intentional and load-bearing: transform ids
    /// like `host-entity-engine` carry the kind as a fragment, not as an
    /// exact token.
    pub fn infer(transform_id: &str) -> Self {
        if transform_id.contains("host") {
            EntityType::Host
        } else if transform_id.contains("user") {
            EntityType::User
        } else if transform_id.contains("service") {
            EntityType::Service
        } else {
            EntityType::Generic
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Host => write!(f, "host"),
            EntityType::User => write!(f, "user"),
            EntityType::Service => write!(f, "service"),
            EntityType::Generic => write!(f, "generic"),
        }
    }
}

/// Parameters describing the test run, supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Number of simulated entities in the run
    pub entity_count: u64,

    /// Number of log records generated by the run
    pub log_count: u64,
}

/// Census of observed transform state labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformStateCounts {
    pub started: u64,
    pub indexing: u64,
}

/// Running failure totals accumulated across all transforms
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorTotals {
    pub search_failures: u64,
    pub index_failures: u64,
}

/// Per-entity-type slice of the transform time series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySeries {
    pub search_latencies: Vec<f64>,
    pub index_latencies: Vec<f64>,
    pub processing_latencies: Vec<f64>,
    pub documents_processed: Vec<u64>,
    pub documents_indexed: Vec<u64>,
    pub pages_processed: Vec<u64>,
    pub trigger_counts: Vec<u64>,
}

/// Reconstructed time series for the transform pipeline under test.
///
/// Latency sequences hold per-interval ms-per-operation values derived from
/// cumulative counter deltas; the counter sequences hold the raw cumulative
/// snapshots themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStatsData {
    pub search_latencies: Vec<f64>,
    pub index_latencies: Vec<f64>,
    pub processing_latencies: Vec<f64>,

    pub documents_processed: Vec<u64>,
    pub documents_indexed: Vec<u64>,
    pub pages_processed: Vec<u64>,
    pub trigger_counts: Vec<u64>,

    pub search_failures: u64,
    pub index_failures: u64,

    /// Vendor-reported smoothed averages, zero placeholders filtered out
    pub exponential_avg_checkpoint_duration_ms: Vec<f64>,
    pub exponential_avg_documents_indexed: Vec<f64>,
    pub exponential_avg_documents_processed: Vec<f64>,

    pub transform_states: TransformStateCounts,

    /// The same sequences partitioned per logical entity kind
    pub per_entity_type: BTreeMap<EntityType, EntitySeries>,

    /// Epoch-millisecond timestamps of accepted samples, in log order
    pub timestamps: Vec<i64>,

    /// Sampling interval detected from batch timestamps, in milliseconds
    pub detected_interval_ms: f64,
}

impl Default for TransformStatsData {
    fn default() -> Self {
        let mut per_entity_type = BTreeMap::new();
        for entity in EntityType::ALL {
            per_entity_type.insert(entity, EntitySeries::default());
        }
        Self {
            search_latencies: Vec::new(),
            index_latencies: Vec::new(),
            processing_latencies: Vec::new(),
            documents_processed: Vec::new(),
            documents_indexed: Vec::new(),
            pages_processed: Vec::new(),
            trigger_counts: Vec::new(),
            search_failures: 0,
            index_failures: 0,
            exponential_avg_checkpoint_duration_ms: Vec::new(),
            exponential_avg_documents_indexed: Vec::new(),
            exponential_avg_documents_processed: Vec::new(),
            transform_states: TransformStateCounts::default(),
            per_entity_type,
            timestamps: Vec::new(),
            detected_interval_ms: crate::parser::transform_stats::DEFAULT_SAMPLING_INTERVAL_MS,
        }
    }
}

/// Point-in-time node resource series; one entry per node per sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStatsData {
    pub cpu_percent: Vec<f64>,
    pub heap_percent: Vec<f64>,
    pub heap_bytes: Vec<f64>,

    /// Per-node CPU series, so node-level hot spots stay distinguishable
    /// from the cluster-wide average
    pub per_node_cpu: HashMap<String, Vec<f64>>,
}

/// Cluster health series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterHealthData {
    pub green_samples: u64,
    pub yellow_samples: u64,
    pub red_samples: u64,
    pub active_shards: Vec<f64>,
    pub relocating_shards: Vec<f64>,
    pub initializing_shards: Vec<f64>,
    pub unassigned_shards: Vec<f64>,
}

/// Application-server (Kibana) stats series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KibanaStatsData {
    pub event_loop_delay_ms: Vec<f64>,
    pub event_loop_utilization: Vec<f64>,
    pub es_client_active_sockets: Vec<f64>,
    pub es_client_idle_sockets: Vec<f64>,
    pub es_client_queued_requests: Vec<f64>,
    pub response_time_avg_ms: Vec<f64>,
    pub response_time_max_ms: Vec<f64>,
    pub heap_used_bytes: Vec<f64>,
    pub request_totals: Vec<u64>,
    pub request_disconnects: Vec<u64>,
    pub os_load_1m: Vec<f64>,
}

impl KibanaStatsData {
    /// True when no Kibana sample of any kind was observed
    pub fn is_empty(&self) -> bool {
        self.event_loop_delay_ms.is_empty()
            && self.event_loop_utilization.is_empty()
            && self.response_time_avg_ms.is_empty()
            && self.heap_used_bytes.is_empty()
            && self.request_totals.is_empty()
    }
}

/// Summarized intake/indexing/processing latencies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyMetrics {
    pub search: PercentileMetrics,
    pub indexing: PercentileMetrics,
    pub processing: PercentileMetrics,
}

/// Summarized metrics for one entity type.
///
/// Counter fields carry the MAX of the cumulative sequence: the final
/// snapshot is the end-of-run total, so summing samples would double count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMetrics {
    pub search: PercentileMetrics,
    pub indexing: PercentileMetrics,
    pub processing: PercentileMetrics,
    pub documents_processed: u64,
    pub documents_indexed: u64,
    pub pages_processed: u64,
    pub trigger_count: u64,
}

/// Cluster-level resource and throughput summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub avg_cpu_percent: f64,
    pub peak_cpu_percent: f64,
    pub avg_heap_percent: f64,
    pub peak_heap_percent: f64,
    pub avg_heap_bytes: f64,
    pub peak_heap_bytes: f64,

    /// Per-node CPU summaries keyed by node name
    pub per_node_cpu: BTreeMap<String, PercentileMetrics>,

    /// End-of-run document throughput in documents per second
    pub throughput_docs_per_sec: f64,

    /// Documents indexed per document processed
    pub index_efficiency: f64,

    pub pages_processed: u64,
    pub trigger_count: u64,

    /// Vendor-smoothed estimates at test end (last non-zero sample)
    pub exponential_avg_checkpoint_duration_ms: f64,
    pub exponential_avg_documents_indexed: f64,
    pub exponential_avg_documents_processed: f64,
}

/// Cluster health rollup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterHealthSummary {
    pub green_samples: u64,
    pub yellow_samples: u64,
    pub red_samples: u64,
    pub avg_active_shards: f64,
    pub max_relocating_shards: f64,
    pub max_initializing_shards: f64,
    pub max_unassigned_shards: f64,
}

/// Kibana server rollup; all-zero when no Kibana log was captured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KibanaMetrics {
    pub event_loop_delay: PercentileMetrics,
    pub avg_event_loop_utilization: f64,
    pub max_event_loop_utilization: f64,
    pub max_es_client_active_sockets: f64,
    pub max_es_client_idle_sockets: f64,
    pub max_es_client_queued_requests: f64,
    pub response_time: PercentileMetrics,
    pub max_response_time_ms: f64,
    pub avg_heap_used_bytes: f64,
    pub peak_heap_used_bytes: f64,
    pub total_requests: u64,
    pub total_disconnects: u64,
    pub request_error_rate: f64,
    pub avg_os_load_1m: f64,
    pub max_os_load_1m: f64,
}

/// The full metrics tree carried by a baseline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub latency: LatencyMetrics,
    pub system: SystemMetrics,
    pub per_entity_type: BTreeMap<EntityType, EntityMetrics>,
    pub transform_states: TransformStateCounts,
    pub errors: ErrorTotals,
    pub cluster_health: ClusterHealthSummary,
    pub kibana: KibanaMetrics,
}

/// The terminal, persisted artifact: one baseline per extraction run.
///
/// A baseline is immutable once created and uniquely identified by
/// `test_name` plus `timestamp`; later comparisons always operate on
/// freshly loaded copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetrics {
    /// Test identifier, equal to the log-file prefix of the run
    pub test_name: String,

    /// RFC3339 creation time
    pub timestamp: String,

    /// Run parameters supplied by the caller
    pub test_config: TestConfig,

    pub metrics: MetricsBundle,
}

impl BaselineMetrics {
    /// Assemble a baseline stamped with the current time
    pub fn new(test_name: impl Into<String>, test_config: TestConfig, metrics: MetricsBundle) -> Self {
        Self {
            test_name: test_name.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            test_config,
            metrics,
        }
    }
}
