//! Tests for hourly bucketing of a single day.
//!
//! Every case uses the same four-record dataset over 2020-01-01 UTC and varies
//! the buffer and the zone the day is anchored in.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use unavailability_engine::{
    HourlyUnavailability, TimeInterval, UnavailabilityCalculator, UnavailabilityDataset,
    UnavailabilityRecord,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> DateTime<Tz> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Tz::UTC)
}

fn interval(start: &str, end: &str) -> TimeInterval {
    TimeInterval::new(at(start), at(end)).unwrap()
}

fn dataset(ids: [&[&str]; 4]) -> UnavailabilityDataset {
    let intervals = [
        interval("2020-01-01T00:00:00Z", "2020-01-01T02:00:00Z"),
        interval("2020-01-01T03:00:00Z", "2020-01-01T04:00:00Z"),
        interval("2020-01-01T12:00:00Z", "2020-01-01T22:00:00Z"),
        interval("2020-01-01T23:00:00Z", "2020-01-02T01:00:00Z"),
    ];
    UnavailabilityDataset::new(
        3,
        intervals
            .into_iter()
            .zip(ids)
            .map(|(interval, ids)| UnavailabilityRecord::new(interval, ids.iter().copied()))
            .collect(),
    )
}

fn standard_dataset() -> UnavailabilityDataset {
    dataset([A, ABC, AB, A])
}

/// Expand run-length `(count, ids)` pairs into one expectation per hour.
fn expected(runs: &[(usize, &[&str])]) -> Vec<Vec<String>> {
    runs.iter()
        .flat_map(|(count, ids)| {
            std::iter::repeat(ids.iter().map(|s| s.to_string()).collect::<Vec<_>>()).take(*count)
        })
        .collect()
}

fn identifiers(hourly: &[HourlyUnavailability]) -> Vec<Vec<String>> {
    hourly.iter().map(|h| h.identifiers.clone()).collect()
}

const A: &[&str] = &["test-a"];
const B: &[&str] = &["test-b"];
const AB: &[&str] = &["test-a", "test-b"];
const AC: &[&str] = &["test-a", "test-c"];
const ABC: &[&str] = &["test-a", "test-b", "test-c"];
const C: &[&str] = &["test-c"];
const NONE: &[&str] = &[];

// ── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn empty_dataset_gives_24_empty_buckets() {
    let calc = UnavailabilityCalculator::create(Duration::zero(), "Utc").unwrap();
    let hourly = calc.hourly_unavailability_for_day(&Utc::now(), &UnavailabilityDataset::default());

    assert_eq!(hourly.len(), 24);
    assert!(hourly.iter().all(|h| h.identifiers.is_empty()));
    assert!(hourly.iter().all(|h| h.percent_unavailable == 0.0));
}

#[test]
fn buckets_tile_the_day_in_order() {
    let calc = UnavailabilityCalculator::create(Duration::zero(), "UTC").unwrap();
    let hourly = calc.hourly_unavailability_for_day(&at("2020-01-01T17:45:00Z"), &standard_dataset());

    assert_eq!(hourly[0].hour.start, at("2020-01-01T00:00:00Z"));
    assert_eq!(hourly[23].hour.end, at("2020-01-02T00:00:00Z"));
    for pair in hourly.windows(2) {
        assert_eq!(pair[0].hour.end, pair[1].hour.start);
    }
}

#[test]
fn hours_are_handled() {
    let calc = UnavailabilityCalculator::create(Duration::zero(), "Utc").unwrap();
    let hourly = calc.hourly_unavailability_for_day(&at("2020-01-01T00:00:00Z"), &standard_dataset());

    assert_eq!(
        identifiers(&hourly),
        expected(&[(2, A), (1, NONE), (1, ABC), (8, NONE), (10, AB), (1, NONE), (1, A)])
    );

    assert_eq!(hourly[3].percent_unavailable, 1.0);
    assert_eq!(hourly[21].percent_unavailable, 2.0 / 3.0);
    assert_eq!(hourly[22].percent_unavailable, 0.0);
    assert_eq!(hourly[23].percent_unavailable, 1.0 / 3.0);
}

#[test]
fn hours_are_handled_with_buffer() {
    let calc = UnavailabilityCalculator::create(Duration::minutes(30), "Utc").unwrap();
    let hourly = calc.hourly_unavailability_for_day(&at("2020-01-01T00:00:00Z"), &standard_dataset());

    // Hour 2 reaches the 03:00 record and hour 22 reaches the one ending 22:00.
    assert_eq!(
        identifiers(&hourly),
        expected(&[(2, A), (3, ABC), (6, NONE), (12, AB), (1, A)])
    );
}

#[test]
fn hours_are_handled_with_timezone() {
    let calc = UnavailabilityCalculator::create(Duration::minutes(30), "Europe/Stockholm").unwrap();
    let start = at("2020-01-01T00:00:00Z").with_timezone(&chrono_tz::Europe::Stockholm);
    let hourly = calc.hourly_unavailability_for_day(&start, &standard_dataset());

    // Local midnight is 23:00 UTC the previous day, so every bucket sits one
    // hour earlier on the instant timeline.
    assert_eq!(hourly[0].hour.start, at("2019-12-31T23:00:00Z"));
    assert_eq!(
        identifiers(&hourly),
        expected(&[(3, A), (3, ABC), (6, NONE), (12, AB)])
    );
}

#[test]
fn buffers_are_handled_with_interesting_patterns() {
    let calc = UnavailabilityCalculator::create(Duration::minutes(30), "Europe/Stockholm").unwrap();
    let data = dataset([A, C, AC, B]);
    let start = at("2020-01-01T00:00:00Z").with_timezone(&chrono_tz::Europe::Stockholm);
    let hourly = calc.hourly_unavailability_for_day(&start, &data);

    assert_eq!(
        identifiers(&hourly),
        expected(&[(3, A), (1, AC), (2, C), (6, NONE), (11, AC), (1, ABC)])
    );
}

#[test]
fn bucket_endpoints_are_expressed_in_configured_zone() {
    let calc = UnavailabilityCalculator::create(Duration::zero(), "Europe/Stockholm").unwrap();
    let hourly = calc.hourly_unavailability_for_day(&at("2020-06-15T12:00:00Z"), &standard_dataset());

    assert_eq!(hourly[0].hour.start.timezone(), chrono_tz::Europe::Stockholm);
    assert_eq!(hourly[0].hour.start.to_rfc3339(), "2020-06-15T00:00:00+02:00");
}

#[test]
fn instant_late_in_local_day_anchors_that_local_day() {
    // 23:30 UTC on Jan 1 is already Jan 2 in Stockholm.
    let calc = UnavailabilityCalculator::create(Duration::zero(), "Europe/Stockholm").unwrap();
    let hourly = calc.hourly_unavailability_for_day(&at("2020-01-01T23:30:00Z"), &standard_dataset());

    assert_eq!(hourly[0].hour.start, at("2020-01-01T23:00:00Z"));
    // 23:00-00:00 UTC overlaps the record that runs to 01:00 on Jan 2.
    assert_eq!(hourly[0].identifiers, vec!["test-a"]);
}
