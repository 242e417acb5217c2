//! Log parsers: one per log kind, sharing the `<timestamp> - <json>` grammar
//!
//! Every parser is best-effort at line granularity: a line that fails the
//! regex or JSON parse is dropped without a count or a log entry, because
//! operational logs routinely contain partial writes and unrelated lines.

pub mod cluster_health;
pub mod kibana_stats;
pub mod node_stats;
pub mod transform_stats;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static LINE_REGEX: OnceLock<Regex> = OnceLock::new();
static TRANSFORM_LINE_REGEX: OnceLock<Regex> = OnceLock::new();

fn line_regex() -> &'static Regex {
    LINE_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2}T[\d:.-]+Z)\s+-\s+(.+)$").expect("valid line regex")
    })
}

fn transform_line_regex() -> &'static Regex {
    TRANSFORM_LINE_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2}T[\d:.-]+Z)\s+-\s+Transform\s+(.+?)\s+stats:\s+(.+)$")
            .expect("valid transform line regex")
    })
}

/// Parse an ISO8601 timestamp as it appears in the log prefix.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Split a generic stats line into its timestamp and JSON body.
///
/// Returns `None` for any line that does not match the grammar or whose
/// body is not valid JSON.
pub(crate) fn parse_line(line: &str) -> Option<(DateTime<Utc>, Value)> {
    let captures = line_regex().captures(line)?;
    let timestamp = parse_timestamp(captures.get(1)?.as_str())?;
    let body: Value = serde_json::from_str(captures.get(2)?.as_str()).ok()?;
    Some((timestamp, body))
}

/// Split a transform stats line into timestamp, transform id, and JSON body.
pub(crate) fn parse_transform_line(line: &str) -> Option<(DateTime<Utc>, &str, Value)> {
    let captures = transform_line_regex().captures(line)?;
    let timestamp = parse_timestamp(captures.get(1)?.as_str())?;
    let id = captures.get(2)?.as_str();
    let body: Value = serde_json::from_str(captures.get(3)?.as_str()).ok()?;
    Some((timestamp, id, body))
}

/// Timestamp-only variant used by the first transform-parser pass.
pub(crate) fn parse_transform_timestamp(line: &str) -> Option<DateTime<Utc>> {
    let captures = transform_line_regex().captures(line)?;
    parse_timestamp(captures.get(1)?.as_str())
}

/// Pull an `f64` out of a JSON object field, absent when missing or non-numeric.
pub(crate) fn field_f64(value: &Value, field: &str) -> Option<f64> {
    value.get(field).and_then(Value::as_f64)
}

/// Pull a `u64` out of a JSON object field.
pub(crate) fn field_u64(value: &Value, field: &str) -> Option<u64> {
    value.get(field).and_then(Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_valid() {
        let (ts, body) =
            parse_line(r#"2024-03-01T10:00:05.123Z - {"status":"green"}"#).unwrap();
        assert_eq!(ts.timestamp_millis(), 1_709_287_205_123);
        assert_eq!(body["status"], "green");
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        assert!(parse_line("not a log line").is_none());
        assert!(parse_line("2024-03-01T10:00:05.123Z - not json").is_none());
        // Truncated JSON from a partial write
        assert!(parse_line(r#"2024-03-01T10:00:05.123Z - {"status":"#).is_none());
    }

    #[test]
    fn test_parse_transform_line() {
        let line = r#"2024-03-01T10:00:05.000Z - Transform host-entity-engine stats: {"transforms":[{"state":"indexing"}]}"#;
        let (_, id, body) = parse_transform_line(line).unwrap();
        assert_eq!(id, "host-entity-engine");
        assert_eq!(body["transforms"][0]["state"], "indexing");
    }

    #[test]
    fn test_transform_line_not_matched_by_other_kinds() {
        let line = r#"2024-03-01T10:00:05.000Z - {"status":"green"}"#;
        assert!(parse_transform_line(line).is_none());
    }
}
