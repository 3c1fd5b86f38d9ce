//! Calendar bucketing: hours of a day, days of a month.
//!
//! Day and month boundaries are chosen in the calculator's zone. Hours are
//! 60 minutes of elapsed time laid back-to-back from local midnight, so on a
//! DST transition day there are 23 or 25 hourly buckets and their wall-clock
//! labels shift after the transition. Days follow the wall clock: each day
//! bucket ends at the next local midnight.

use chrono::{DateTime, Datelike, Days, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calculator::UnavailabilityCalculator;
use crate::dataset::{Identifier, UnavailabilityDataset};
use crate::interval::TimeInterval;
use crate::overlap::percent_unavailable;

/// Divisor for a day's summed hourly counts, regardless of how many hourly
/// buckets the day actually has.
const HOURS_PER_DAY: f64 = 24.0;

/// Unavailability during one hourly bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyUnavailability {
    pub hour: TimeInterval,
    /// Sorted, no duplicates.
    pub identifiers: Vec<Identifier>,
    pub percent_unavailable: f64,
}

/// Unavailability during one calendar day, with its hourly breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUnavailability {
    pub day: TimeInterval,
    pub hourly: Vec<HourlyUnavailability>,
    pub percent_unavailable: f64,
}

impl UnavailabilityCalculator {
    /// Hourly buckets for the calendar day (in the configured zone) that
    /// contains `instant`.
    ///
    /// The day runs from its first instant to the same wall-clock time one
    /// day later. Normally 24 buckets; on a DST transition day the count
    /// differs and the last bucket may be shorter than an hour.
    pub fn hourly_unavailability_for_day<Z: TimeZone>(
        &self,
        instant: &DateTime<Z>,
        dataset: &UnavailabilityDataset,
    ) -> Vec<HourlyUnavailability> {
        let tz = self.time_zone();
        let date = instant.with_timezone(&tz).date_naive();
        let start = start_of_day(&tz, date);
        let day = TimeInterval {
            start,
            end: next_day(&start),
        };

        let hourly: Vec<HourlyUnavailability> = day
            .split_by(Duration::hours(1))
            .into_iter()
            .map(|hour| {
                let identifiers = self.unavailable_identifiers_for(&hour, dataset);
                let percent = percent_unavailable(dataset, identifiers.len() as f64);
                tracing::trace!(
                    hour_start = %hour.start,
                    unavailable = identifiers.len(),
                    "hourly bucket"
                );
                HourlyUnavailability {
                    hour,
                    identifiers,
                    percent_unavailable: percent,
                }
            })
            .collect();

        tracing::debug!(
            %date,
            buckets = hourly.len(),
            records = dataset.records.len(),
            "computed hourly unavailability"
        );
        hourly
    }

    /// Daily buckets for the calendar month (in the configured zone) that
    /// contains `instant`.
    ///
    /// A day's percentage is the summed hourly identifier counts divided by a
    /// flat 24, then by the tracked total. On a 23- or 25-hour day this is not
    /// the mean of the hourly percentages.
    pub fn daily_unavailability_for_month<Z: TimeZone>(
        &self,
        instant: &DateTime<Z>,
        dataset: &UnavailabilityDataset,
    ) -> Vec<DailyUnavailability> {
        let tz = self.time_zone();
        let date = instant.with_timezone(&tz).date_naive();
        let first = date - Days::new(u64::from(date.day0()));
        let next_first = first + Months::new(1);

        let mut daily = Vec::new();
        let mut cursor = first;
        while cursor < next_first {
            let day = TimeInterval {
                start: start_of_day(&tz, cursor),
                end: start_of_day(&tz, cursor + Days::new(1)),
            };
            let hourly = self.hourly_unavailability_for_day(&day.start, dataset);
            let summed: usize = hourly.iter().map(|h| h.identifiers.len()).sum();
            let percent = percent_unavailable(dataset, summed as f64 / HOURS_PER_DAY);
            daily.push(DailyUnavailability {
                day,
                hourly,
                percent_unavailable: percent,
            });
            cursor = cursor + Days::new(1);
        }

        tracing::debug!(
            month = %first.format("%Y-%m"),
            days = daily.len(),
            "computed daily unavailability"
        );
        daily
    }
}

/// First instant of `date` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight skipped by
/// a DST gap resolves to the first instant after the gap.
pub fn start_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Same wall-clock time one calendar day later, resolved like [`start_of_day`].
fn next_day(start: &DateTime<Tz>) -> DateTime<Tz> {
    resolve_local(&start.timezone(), start.naive_local() + Days::new(1))
}

fn resolve_local(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Read the skipped wall time with the offset in force before the gap.
            let before = tz.offset_from_utc_datetime(&(local - Duration::days(1))).fix();
            let seconds = i64::from(before.local_minus_utc());
            tz.from_utc_datetime(&(local - Duration::seconds(seconds)))
        }
    }
}
