//! Latency summarization over the reconstructed transform series

use crate::stats::summarize;
use crate::types::{LatencyMetrics, TransformStatsData};

/// Summarize the search/indexing/processing latency sequences.
pub fn calculate_latency_metrics(data: &TransformStatsData) -> LatencyMetrics {
    LatencyMetrics {
        search: summarize(&data.search_latencies),
        indexing: summarize(&data.index_latencies),
        processing: summarize(&data.processing_latencies),
    }
}
