//! Per-entity-type summarization
//!
//! Counter sequences are cumulative snapshots, so the per-entity totals are
//! the MAX of each sequence; summing samples would double count.

use crate::stats::{max_of_u64, summarize};
use crate::types::{EntityMetrics, EntitySeries, EntityType, TransformStatsData};
use std::collections::BTreeMap;

/// Summarize every entity type, including ones with no activity.
pub fn calculate_entity_metrics(data: &TransformStatsData) -> BTreeMap<EntityType, EntityMetrics> {
    let empty = EntitySeries::default();
    let mut metrics = BTreeMap::new();

    for entity in EntityType::ALL {
        let series = data.per_entity_type.get(&entity).unwrap_or(&empty);
        metrics.insert(
            entity,
            EntityMetrics {
                search: summarize(&series.search_latencies),
                indexing: summarize(&series.index_latencies),
                processing: summarize(&series.processing_latencies),
                documents_processed: max_of_u64(&series.documents_processed),
                documents_indexed: max_of_u64(&series.documents_indexed),
                pages_processed: max_of_u64(&series.pages_processed),
                trigger_count: max_of_u64(&series.trigger_counts),
            },
        );
    }

    metrics
}
