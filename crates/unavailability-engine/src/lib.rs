//! # unavailability-engine
//!
//! Booking statistics over calendar buckets for a pool of interchangeable
//! resources.
//!
//! Each resource is an opaque identifier that is unavailable during some set of
//! time windows. The engine answers two questions for a booking system: "how
//! booked are we" (per-hour and per-day unavailability percentages) and "when
//! can I get a slot" (the window after a given start before every resource is
//! taken). A mandatory buffer pads every window on both sides before overlap
//! testing, and all calendar boundaries are chosen in a configured IANA zone via
//! `chrono-tz`.
//!
//! ## Modules
//!
//! - [`interval`] - half-open `[start, end)` ranges, overlap and splitting
//! - [`dataset`] - unavailability records and the dataset handed to queries
//! - [`calculator`] - the configured engine and its buffer primitive
//! - [`overlap`] - identifiers unavailable during a query range, percentages
//! - [`bucket`] - hourly buckets for a day, daily buckets for a month
//! - [`window`] - first full-coverage boundary and the availability window
//! - [`config`] - serde/env configuration that builds a calculator
//! - [`error`] - Error types

pub mod bucket;
pub mod calculator;
pub mod config;
pub mod dataset;
pub mod error;
pub mod interval;
pub mod overlap;
pub mod window;

pub use bucket::{DailyUnavailability, HourlyUnavailability};
pub use calculator::UnavailabilityCalculator;
pub use config::CalculatorConfig;
pub use dataset::{Identifier, UnavailabilityDataset, UnavailabilityRecord};
pub use error::UnavailabilityError;
pub use interval::TimeInterval;
pub use overlap::percent_unavailable;
