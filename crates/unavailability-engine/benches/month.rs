use chrono::{Duration, TimeZone};
use chrono_tz::Tz;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use unavailability_engine::{
    TimeInterval, UnavailabilityCalculator, UnavailabilityDataset, UnavailabilityRecord,
};

/// A month of back-to-back 90 minute bookings rotating through 8 rooms.
fn busy_month() -> UnavailabilityDataset {
    let base = Tz::UTC.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    let records = (0..31 * 16)
        .map(|i| {
            let start = base + Duration::minutes(90 * i);
            let interval = TimeInterval::new(start, start + Duration::minutes(90)).unwrap();
            UnavailabilityRecord::new(interval, [format!("room-{}", i % 8)])
        })
        .collect();
    UnavailabilityDataset::new(8, records)
}

fn bench_month(c: &mut Criterion) {
    let dataset = busy_month();
    let calc = UnavailabilityCalculator::create(Duration::minutes(15), "Europe/Stockholm").unwrap();
    let instant = Tz::UTC.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();

    c.bench_function("daily_unavailability_for_month", |b| {
        b.iter(|| calc.daily_unavailability_for_month(black_box(&instant), black_box(&dataset)))
    });

    c.bench_function("availability_interval_for_start_date_time", |b| {
        b.iter(|| calc.availability_interval_for_start_date_time(black_box(&instant), black_box(&dataset)))
    });
}

criterion_group!(benches, bench_month);
criterion_main!(benches);
