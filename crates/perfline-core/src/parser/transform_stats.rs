//! Stateful parser for the transform stats log
//!
//! Transforms report cumulative counters, so per-interval latencies have to
//! be reconstructed by differencing consecutive snapshots of the same
//! transform id. The parser runs two passes: the first detects the real
//! sampling cadence from batch timestamps, the second walks the lines with a
//! per-transform previous-value record and emits a latency sample only when
//! the incremental operation count clears a cadence-scaled threshold.
//! Small increments are dropped rather than interpolated; dividing by a
//! near-zero operation count amplifies noise into the percentiles.

use crate::parser::{field_f64, field_u64, parse_transform_line, parse_transform_timestamp};
use crate::stats::{median, read_to_string_ctx};
use crate::types::{EntityType, TransformStatsData};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Fallback cadence when fewer than two sampling batches exist
pub const DEFAULT_SAMPLING_INTERVAL_MS: f64 = 5000.0;

/// Samples this close together belong to the same sampling batch
const BATCH_TOLERANCE_MS: i64 = 100;

/// Inter-batch gaps above this are treated as outliers (restarts, pauses)
const MAX_VALID_INTERVAL_MS: f64 = 300_000.0;

const SEARCH_THRESHOLD_BASE: f64 = 5.0;
const INDEX_THRESHOLD_BASE: f64 = 10.0;
const PROCESSING_THRESHOLD_BASE: f64 = 5.0;

/// Last-seen counter snapshot for one transform id
#[derive(Debug, Clone, Copy, Default)]
struct PrevCounters {
    search_time_ms: f64,
    search_total: u64,
    index_time_ms: f64,
    index_total: u64,
    processing_time_ms: f64,
    processing_total: u64,
}

/// Minimum incremental operation counts for latency acceptance
#[derive(Debug, Clone, Copy)]
struct Thresholds {
    search: i64,
    index: i64,
    processing: i64,
}

impl Thresholds {
    /// Scale the 5-second-cadence base thresholds to the detected interval,
    /// so a 1-second-cadence log keeps comparable acceptance behavior.
    fn for_interval(interval_ms: f64) -> Self {
        let multiplier = interval_ms / DEFAULT_SAMPLING_INTERVAL_MS;
        let scaled = |base: f64| ((base * multiplier).floor() as i64).max(1);
        Self {
            search: scaled(SEARCH_THRESHOLD_BASE),
            index: scaled(INDEX_THRESHOLD_BASE),
            processing: scaled(PROCESSING_THRESHOLD_BASE),
        }
    }
}

/// Parse a transform stats log file into its reconstructed time series.
pub fn parse_transform_stats_file(path: impl AsRef<Path>) -> crate::error::Result<TransformStatsData> {
    let path = path.as_ref();
    let content = read_to_string_ctx(path)?;
    let data = parse_transform_stats(&content);
    debug!(
        file = %path.display(),
        samples = data.timestamps.len(),
        detected_interval_ms = data.detected_interval_ms,
        search_latencies = data.search_latencies.len(),
        "parsed transform stats log"
    );
    Ok(data)
}

/// Parse transform stats log content.
pub fn parse_transform_stats(content: &str) -> TransformStatsData {
    let interval_ms = detect_sampling_interval(content);
    let thresholds = Thresholds::for_interval(interval_ms);

    let mut data = TransformStatsData {
        detected_interval_ms: interval_ms,
        ..TransformStatsData::default()
    };
    let mut previous: HashMap<String, PrevCounters> = HashMap::new();
    let mut last_failures: HashMap<String, (u64, u64)> = HashMap::new();

    for line in content.lines() {
        let Some((timestamp, id, body)) = parse_transform_line(line) else {
            continue;
        };
        let Some(transform) = body.get("transforms").and_then(|t| t.get(0)) else {
            continue;
        };
        let Some(stats) = transform.get("stats") else {
            continue;
        };

        data.timestamps.push(timestamp.timestamp_millis());
        let entity = EntityType::infer(id);

        let current = PrevCounters {
            search_time_ms: field_f64(stats, "search_time_in_ms").unwrap_or(0.0),
            search_total: field_u64(stats, "search_total").unwrap_or(0),
            index_time_ms: field_f64(stats, "index_time_in_ms").unwrap_or(0.0),
            index_total: field_u64(stats, "index_total").unwrap_or(0),
            processing_time_ms: field_f64(stats, "processing_time_in_ms").unwrap_or(0.0),
            processing_total: field_u64(stats, "processing_total").unwrap_or(0),
        };

        // The first observation of a transform id only seeds its record;
        // no delta can exist yet.
        if let Some(prev) = previous.get(id) {
            record_latencies(&mut data, entity, prev, &current, thresholds);
        }
        previous.insert(id.to_string(), current);

        record_cumulative_counters(&mut data, entity, stats);
        record_exponential_averages(&mut data, stats);

        last_failures.insert(
            id.to_string(),
            (
                field_u64(stats, "search_failures").unwrap_or(0),
                field_u64(stats, "index_failures").unwrap_or(0),
            ),
        );

        match transform.get("state").and_then(Value::as_str) {
            Some("started") => data.transform_states.started += 1,
            Some("indexing") => data.transform_states.indexing += 1,
            _ => {}
        }
    }

    data.search_failures = last_failures.values().map(|f| f.0).sum();
    data.index_failures = last_failures.values().map(|f| f.1).sum();
    data
}

/// First pass: de-duplicate per-batch timestamps and take the median
/// inter-batch gap as the sampling interval.
fn detect_sampling_interval(content: &str) -> f64 {
    let mut batch_timestamps: Vec<i64> = Vec::new();

    for line in content.lines() {
        let Some(timestamp) = parse_transform_timestamp(line) else {
            continue;
        };
        let ms = timestamp.timestamp_millis();
        match batch_timestamps.last() {
            // Multiple transforms logged within the tolerance window are
            // one sampling batch.
            Some(&last) if (ms - last).abs() <= BATCH_TOLERANCE_MS => {}
            _ => batch_timestamps.push(ms),
        }
    }

    let intervals: Vec<f64> = batch_timestamps
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64)
        .filter(|&gap| gap > 0.0 && gap <= MAX_VALID_INTERVAL_MS)
        .collect();

    if intervals.is_empty() {
        DEFAULT_SAMPLING_INTERVAL_MS
    } else {
        median(&intervals)
    }
}

fn record_latencies(
    data: &mut TransformStatsData,
    entity: EntityType,
    prev: &PrevCounters,
    current: &PrevCounters,
    thresholds: Thresholds,
) {
    let entry = data.per_entity_type.entry(entity).or_default();

    if let Some(latency) = incremental_latency(
        current.search_time_ms - prev.search_time_ms,
        current.search_total as i64 - prev.search_total as i64,
        thresholds.search,
    ) {
        data.search_latencies.push(latency);
        entry.search_latencies.push(latency);
    }
    if let Some(latency) = incremental_latency(
        current.index_time_ms - prev.index_time_ms,
        current.index_total as i64 - prev.index_total as i64,
        thresholds.index,
    ) {
        data.index_latencies.push(latency);
        entry.index_latencies.push(latency);
    }
    if let Some(latency) = incremental_latency(
        current.processing_time_ms - prev.processing_time_ms,
        current.processing_total as i64 - prev.processing_total as i64,
        thresholds.processing,
    ) {
        data.processing_latencies.push(latency);
        entry.processing_latencies.push(latency);
    }
}

/// Accept a delta only when enough operations happened and time moved
/// forward; everything else is dropped, not retried or interpolated.
fn incremental_latency(incremental_time: f64, incremental_total: i64, threshold: i64) -> Option<f64> {
    if incremental_total >= threshold && incremental_time >= 0.0 {
        Some(incremental_time / incremental_total as f64)
    } else {
        None
    }
}

/// Cumulative counters are kept as raw snapshots, not deltas; the final
/// value per sequence is the end-of-run total.
fn record_cumulative_counters(data: &mut TransformStatsData, entity: EntityType, stats: &Value) {
    let entry = data.per_entity_type.entry(entity).or_default();

    if let Some(value) = field_u64(stats, "documents_processed") {
        data.documents_processed.push(value);
        entry.documents_processed.push(value);
    }
    if let Some(value) = field_u64(stats, "documents_indexed") {
        data.documents_indexed.push(value);
        entry.documents_indexed.push(value);
    }
    if let Some(value) = field_u64(stats, "pages_processed") {
        data.pages_processed.push(value);
        entry.pages_processed.push(value);
    }
    if let Some(value) = field_u64(stats, "trigger_count") {
        data.trigger_counts.push(value);
        entry.trigger_counts.push(value);
    }
}

fn record_exponential_averages(data: &mut TransformStatsData, stats: &Value) {
    // Zero is the vendor's placeholder for "not yet computed"
    if let Some(value) = field_f64(stats, "exponential_avg_checkpoint_duration_ms") {
        if value != 0.0 {
            data.exponential_avg_checkpoint_duration_ms.push(value);
        }
    }
    if let Some(value) = field_f64(stats, "exponential_avg_documents_indexed") {
        if value != 0.0 {
            data.exponential_avg_documents_indexed.push(value);
        }
    }
    if let Some(value) = field_f64(stats, "exponential_avg_documents_processed") {
        if value != 0.0 {
            data.exponential_avg_documents_processed.push(value);
        }
    }
}
