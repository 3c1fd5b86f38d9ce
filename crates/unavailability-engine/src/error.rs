//! Error types for unavailability-engine operations.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnavailabilityError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Buffer must be non-negative, got {0}")]
    NegativeBuffer(Duration),

    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval { start: DateTime<Tz>, end: DateTime<Tz> },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UnavailabilityError>;
