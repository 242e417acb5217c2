//! Property-based tests for the numeric core and the latency gate

use perfline_core::stats::{average, percentile, safe_div, summarize};
use proptest::prelude::*;

proptest! {
    /// Nearest-rank identity: the percentile of a sorted array is the
    /// element at ceil(p/100*len)-1, clamped into bounds.
    #[test]
    fn percentile_matches_nearest_rank_definition(
        mut values in prop::collection::vec(0.0f64..1e9, 1..200),
        p in 0.0f64..=100.0,
    ) {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let rank = ((p / 100.0 * values.len() as f64).ceil() as isize - 1).max(0) as usize;
        let expected = values[rank.min(values.len() - 1)];
        prop_assert_eq!(percentile(&values, p), expected);
    }

    /// Percentiles never leave the observed value range.
    #[test]
    fn percentile_is_bounded_by_input(
        values in prop::collection::vec(-1e9f64..1e9, 1..200),
        p in 0.0f64..=100.0,
    ) {
        let result = percentile(&values, p);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(result >= min && result <= max);
    }

    /// The summary is internally ordered: p50 <= p95 <= p99 <= max.
    #[test]
    fn summary_percentiles_are_monotone(
        values in prop::collection::vec(0.0f64..1e9, 1..200),
    ) {
        let m = summarize(&values);
        prop_assert!(m.p50 <= m.p95);
        prop_assert!(m.p95 <= m.p99);
        prop_assert!(m.p99 <= m.max);
        prop_assert!(m.avg <= m.max);
    }

    /// Monotone cumulative counters can never produce a negative latency.
    #[test]
    fn accepted_latencies_are_non_negative(
        deltas in prop::collection::vec((0u64..1000, 0u64..100_000), 2..50),
    ) {
        let mut total = 0u64;
        let mut time = 0u64;
        let lines: Vec<String> = deltas
            .iter()
            .enumerate()
            .map(|(i, (d_ops, d_ms))| {
                total += d_ops;
                time += d_ms;
                let body = serde_json::json!({
                    "transforms": [{"state": "indexing", "stats": {
                        "search_total": total,
                        "search_time_in_ms": time,
                    }}]
                });
                let base = chrono::DateTime::parse_from_rfc3339("2024-03-01T10:00:00.000Z").unwrap();
                let ts = base + chrono::Duration::milliseconds(i as i64 * 5000);
                format!(
                    "{} - Transform host-a stats: {}",
                    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    body
                )
            })
            .collect();

        let data = perfline_core::parser::transform_stats::parse_transform_stats(&lines.join("\n"));
        for latency in &data.search_latencies {
            prop_assert!(*latency >= 0.0);
        }
    }

    #[test]
    fn safe_div_guards_zero_and_never_yields_nan(
        n in -1e12f64..1e12,
        d in -1e12f64..1e12,
    ) {
        let result = safe_div(n, d);
        prop_assert!(!result.is_nan());
        if d == 0.0 {
            prop_assert_eq!(result, 0.0);
        }
    }

    #[test]
    fn average_is_bounded_by_input(
        values in prop::collection::vec(-1e9f64..1e9, 1..200),
    ) {
        let avg = average(&values);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(avg >= min - 1e-6 && avg <= max + 1e-6);
    }
}
