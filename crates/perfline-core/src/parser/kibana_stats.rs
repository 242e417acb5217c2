//! Parser for the Kibana server stats stream
//!
//! Kibana stats are optional; a run without the Kibana data plane simply
//! yields empty series and an all-zero summary downstream.

use crate::stats::read_to_string_ctx;
use crate::types::KibanaStatsData;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Parse a Kibana stats log file.
pub fn parse_kibana_stats_file(path: impl AsRef<Path>) -> crate::error::Result<KibanaStatsData> {
    let path = path.as_ref();
    let content = read_to_string_ctx(path)?;
    let data = parse_kibana_stats(&content);
    debug!(
        file = %path.display(),
        event_loop_samples = data.event_loop_delay_ms.len(),
        "parsed kibana stats log"
    );
    Ok(data)
}

/// Parse Kibana stats log content.
pub fn parse_kibana_stats(content: &str) -> KibanaStatsData {
    let mut data = KibanaStatsData::default();

    for line in content.lines() {
        let Some((_, body)) = super::parse_line(line) else {
            continue;
        };

        push_f64(&body, "/process/event_loop_delay", &mut data.event_loop_delay_ms);
        push_f64(
            &body,
            "/process/event_loop_utilization/utilization",
            &mut data.event_loop_utilization,
        );
        push_f64(
            &body,
            "/process/memory/heap/used_in_bytes",
            &mut data.heap_used_bytes,
        );
        push_f64(
            &body,
            "/elasticsearch_client/totalActiveSockets",
            &mut data.es_client_active_sockets,
        );
        push_f64(
            &body,
            "/elasticsearch_client/totalIdleSockets",
            &mut data.es_client_idle_sockets,
        );
        push_f64(
            &body,
            "/elasticsearch_client/totalQueuedRequests",
            &mut data.es_client_queued_requests,
        );
        push_f64(&body, "/response_times/avg_in_millis", &mut data.response_time_avg_ms);
        push_f64(&body, "/response_times/max_in_millis", &mut data.response_time_max_ms);
        push_f64(&body, "/os/load/1m", &mut data.os_load_1m);

        if let Some(total) = body.pointer("/requests/total").and_then(Value::as_u64) {
            data.request_totals.push(total);
        }
        if let Some(disconnects) = body.pointer("/requests/disconnects").and_then(Value::as_u64) {
            data.request_disconnects.push(disconnects);
        }
    }

    data
}

fn push_f64(body: &Value, pointer: &str, series: &mut Vec<f64>) {
    if let Some(value) = body.pointer(pointer).and_then(Value::as_f64) {
        series.push(value);
    }
}
