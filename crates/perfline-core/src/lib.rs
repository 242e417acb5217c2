//! Perfline Core - Baseline performance-metrics extraction engine
//!
//! This crate turns the raw operational logs of one benchmark run into a
//! persisted, comparable baseline snapshot.
//!
//! # Main Components
//!
//! - **Log Parsers**: one per log kind; the transform parser reconstructs
//!   per-interval latencies from cumulative counters
//! - **Calculators**: pure transforms from parsed time series to
//!   nearest-rank percentile summaries
//! - **Baseline Assembler**: file discovery and orchestration
//! - **Baseline Store**: JSON persistence, listing, and pattern lookup
//!
//! # Example
//!
//! ```no_run
//! use perfline_core::{extract_baseline_metrics, BaselineStore, TestConfig};
//!
//! fn example() -> perfline_core::Result<()> {
//!     let config = TestConfig { entity_count: 500, log_count: 100_000 };
//!     let baseline = extract_baseline_metrics("logs", "run-2024-03-01", &config)?;
//!     let store = BaselineStore::default_location();
//!     let path = store.save(&baseline)?;
//!     println!("baseline written to {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod baseline;
pub mod calculate;
pub mod error;
pub mod extract;
pub mod parser;
pub mod stats;
pub mod types;

// Re-export the public surface for convenience
pub use baseline::BaselineStore;
pub use error::{Error, Result};
pub use extract::extract_baseline_metrics;
pub use types::{
    // Terminal artifact
    BaselineMetrics, MetricsBundle, TestConfig,

    // Summary units
    ClusterHealthSummary, EntityMetrics, KibanaMetrics, LatencyMetrics, PercentileMetrics,
    SystemMetrics,

    // Partitioning and counters
    EntityType, ErrorTotals, TransformStateCounts,

    // Parsed time series
    ClusterHealthData, KibanaStatsData, NodeStatsData, TransformStatsData,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
