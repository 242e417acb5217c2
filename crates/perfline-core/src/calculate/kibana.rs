//! Kibana server metric summarization

use crate::stats::{average, max_of, safe_div, summarize};
use crate::types::{KibanaMetrics, KibanaStatsData};

/// Summarize the Kibana series; a run without Kibana data yields the
/// all-zero structure rather than an error.
pub fn calculate_kibana_metrics(data: &KibanaStatsData) -> KibanaMetrics {
    if data.is_empty() {
        return KibanaMetrics::default();
    }

    let total_requests: u64 = data.request_totals.iter().sum();
    let total_disconnects: u64 = data.request_disconnects.iter().sum();

    KibanaMetrics {
        event_loop_delay: summarize(&data.event_loop_delay_ms),
        avg_event_loop_utilization: average(&data.event_loop_utilization),
        max_event_loop_utilization: max_of(&data.event_loop_utilization),
        max_es_client_active_sockets: max_of(&data.es_client_active_sockets),
        max_es_client_idle_sockets: max_of(&data.es_client_idle_sockets),
        max_es_client_queued_requests: max_of(&data.es_client_queued_requests),
        response_time: summarize(&data.response_time_avg_ms),
        max_response_time_ms: max_of(&data.response_time_max_ms),
        avg_heap_used_bytes: average(&data.heap_used_bytes),
        peak_heap_used_bytes: max_of(&data.heap_used_bytes),
        total_requests,
        total_disconnects,
        request_error_rate: safe_div(total_disconnects as f64, total_requests as f64),
        avg_os_load_1m: average(&data.os_load_1m),
        max_os_load_1m: max_of(&data.os_load_1m),
    }
}
