//! Which identifiers are unavailable during a query range.
//!
//! The query range is buffered, then every record whose raw interval overlaps
//! it contributes its identifiers. The result is deduplicated and sorted, so it
//! does not depend on record order.

use std::collections::BTreeSet;

use crate::calculator::UnavailabilityCalculator;
use crate::dataset::{Identifier, UnavailabilityDataset};
use crate::interval::TimeInterval;

impl UnavailabilityCalculator {
    /// Identifiers unavailable (after buffering) during `query`, ascending by
    /// byte order with no duplicates.
    ///
    /// Linear in the number of records.
    pub fn unavailable_identifiers_for(
        &self,
        query: &TimeInterval,
        dataset: &UnavailabilityDataset,
    ) -> Vec<Identifier> {
        let buffered = self.buffered(query);

        let unavailable: BTreeSet<&str> = dataset
            .records
            .iter()
            .filter(|record| record.interval.overlaps(&buffered))
            .flat_map(|record| record.identifiers.iter().map(String::as_str))
            .collect();

        unavailable.into_iter().map(str::to_string).collect()
    }
}

/// `count / total_unique_identifiers`, or `0.0` when nothing is tracked.
///
/// Not clamped: a count above the declared total yields a value above `1.0`.
pub fn percent_unavailable(dataset: &UnavailabilityDataset, count: f64) -> f64 {
    if dataset.total_unique_identifiers == 0 {
        return 0.0;
    }
    count / dataset.total_unique_identifiers as f64
}
