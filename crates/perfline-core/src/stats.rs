//! Numeric utilities shared by the parsers and calculators
//!
//! All helpers treat empty input as zero rather than panicking or producing
//! NaN, so calculators can run unconditionally over optional data sources.

use crate::error::{Error, Result};
use crate::types::PercentileMetrics;
use std::path::Path;

/// Nearest-rank percentile over an unsorted slice.
///
/// For a sorted ascending copy of `values` and target percentile `p`,
/// the result is the element at `ceil(p / 100 * len) - 1`, clamped into
/// bounds. Returns 0.0 for empty input.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile_sorted(&sorted, p)
}

/// Nearest-rank percentile over an already-sorted ascending slice.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p / 100.0 * sorted.len() as f64).ceil() as isize - 1;
    let idx = rank.max(0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Arithmetic mean, 0.0 for empty input.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Largest value, 0.0 for empty input.
pub fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// Largest value of an integer sequence, 0 for empty input.
pub fn max_of_u64(values: &[u64]) -> u64 {
    values.iter().copied().max().unwrap_or(0)
}

/// Division that yields 0.0 instead of infinity or NaN for a zero divisor.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Median of a sequence, 0.0 for empty input.
///
/// Even-length input yields the mean of the two middle elements.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Summarize a value sequence into the universal `{avg, p50, p95, p99, max}`
/// unit. Sorts once and derives every percentile from the same copy.
pub fn summarize(values: &[f64]) -> PercentileMetrics {
    if values.is_empty() {
        return PercentileMetrics::default();
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    PercentileMetrics {
        avg: average(&sorted),
        p50: percentile_sorted(&sorted, 50.0),
        p95: percentile_sorted(&sorted, 95.0),
        p99: percentile_sorted(&sorted, 99.0),
        max: sorted[sorted.len() - 1],
    }
}

/// Read a file to a string, attaching the path to any failure.
pub fn read_to_string_ctx(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| Error::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })
}
