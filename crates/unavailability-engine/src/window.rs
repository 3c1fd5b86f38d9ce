//! The availability window after a start instant.
//!
//! Scanning forward from `start`, each identifier's first buffered
//! unavailability is recorded. Once every tracked identifier has one, the
//! latest of those first starts is the earliest point at which all identifiers
//! are taken at once, and the window runs from `start` up to that point.
//!
//! This assumes an identifier stays unavailable from its first buffered start
//! through the boundary. The dataset does not guarantee that, and it is not
//! checked here.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

use crate::calculator::UnavailabilityCalculator;
use crate::dataset::{Identifier, UnavailabilityDataset};
use crate::error::Result;
use crate::interval::TimeInterval;

impl UnavailabilityCalculator {
    /// Each identifier's first buffered unavailability that does not end at or
    /// before `start`.
    ///
    /// Records are visited in dataset order and the scan stops as soon as the
    /// tracked total is covered. May hold fewer entries than the tracked total
    /// when coverage is never reached.
    pub fn first_unavailable_days(
        &self,
        start: &DateTime<Tz>,
        dataset: &UnavailabilityDataset,
    ) -> BTreeMap<Identifier, TimeInterval> {
        let mut first: BTreeMap<Identifier, TimeInterval> = BTreeMap::new();
        let mut covered = 0usize;

        for record in &dataset.records {
            if record.interval.end <= *start {
                continue;
            }

            for id in &record.identifiers {
                if !first.contains_key(id) {
                    first.insert(id.clone(), self.buffered(&record.interval));
                    covered += 1;
                }
            }

            if covered >= dataset.total_unique_identifiers {
                break;
            }
        }

        first
    }

    /// The instant at which the last still-available identifier becomes
    /// unavailable, or `None` if full coverage is never established or no
    /// first unavailability starts after `start`.
    pub fn last_available_slot(
        &self,
        start: &DateTime<Tz>,
        dataset: &UnavailabilityDataset,
    ) -> Option<DateTime<Tz>> {
        let first = self.first_unavailable_days(start, dataset);
        if first.is_empty() || first.len() < dataset.total_unique_identifiers {
            tracing::debug!(
                covered = first.len(),
                tracked = dataset.total_unique_identifiers,
                "identifier coverage not reached"
            );
            return None;
        }

        first
            .values()
            .map(|interval| interval.start)
            .filter(|instant| instant > start)
            .max()
    }

    /// `[start, boundary - buffer)` where `boundary` is the
    /// [`last_available_slot`](Self::last_available_slot) after `start`, both
    /// endpoints in the configured zone.
    ///
    /// `Ok(None)` means no bounded window could be computed, not that the
    /// resources are free forever.
    ///
    /// # Errors
    /// Returns `UnavailabilityError::InvalidInterval` when `boundary - buffer`
    /// lands before `start`.
    pub fn availability_interval_for_start_date_time<Z: TimeZone>(
        &self,
        start: &DateTime<Z>,
        dataset: &UnavailabilityDataset,
    ) -> Result<Option<TimeInterval>> {
        let start = start.with_timezone(&self.time_zone());
        let Some(boundary) = self.last_available_slot(&start, dataset) else {
            return Ok(None);
        };

        let window =
            TimeInterval::new(start, boundary - self.buffer())?.with_timezone(&self.time_zone());
        tracing::debug!(
            start = %window.start,
            end = %window.end,
            "found availability window"
        );
        Ok(Some(window))
    }
}
