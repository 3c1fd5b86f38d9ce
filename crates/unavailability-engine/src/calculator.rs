//! The configured engine.
//!
//! An [`UnavailabilityCalculator`] holds only its buffer and time zone. It is
//! built once, never mutated, and every query is a pure read of that
//! configuration plus the query's arguments, so a single instance can be shared
//! freely across threads.

use chrono::Duration;
use chrono_tz::Tz;

use crate::error::{Result, UnavailabilityError};
use crate::interval::TimeInterval;

#[derive(Debug, Clone, PartialEq)]
pub struct UnavailabilityCalculator {
    buffer: Duration,
    time_zone: Tz,
}

impl UnavailabilityCalculator {
    /// Build a calculator from a buffer and an IANA zone name.
    ///
    /// The zone is resolved through `chrono-tz`, first by exact name and then
    /// case-insensitively (so `"Utc"` resolves to `UTC`).
    ///
    /// # Errors
    /// Returns `UnavailabilityError::InvalidTimezone` if the name does not
    /// resolve, and `UnavailabilityError::NegativeBuffer` for a negative buffer.
    pub fn create(buffer: Duration, time_zone: &str) -> Result<Self> {
        Self::with_zone(buffer, parse_time_zone(time_zone)?)
    }

    /// Build a calculator from an already resolved zone.
    pub fn with_zone(buffer: Duration, time_zone: Tz) -> Result<Self> {
        if buffer < Duration::zero() {
            return Err(UnavailabilityError::NegativeBuffer(buffer));
        }
        tracing::debug!(
            buffer_minutes = buffer.num_minutes(),
            time_zone = time_zone.name(),
            "created unavailability calculator"
        );
        Ok(Self { buffer, time_zone })
    }

    /// The mandatory padding between bookings.
    pub fn buffer(&self) -> Duration {
        self.buffer
    }

    /// The zone all calendar boundaries are chosen in.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// `[start - buffer, end + buffer)`. A zero buffer is the identity.
    pub fn buffered(&self, interval: &TimeInterval) -> TimeInterval {
        TimeInterval {
            start: interval.start - self.buffer,
            end: interval.end + self.buffer,
        }
    }
}

/// Resolve an IANA zone name, falling back to a case-insensitive match.
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .ok()
        .or_else(|| Tz::from_str_insensitive(name).ok())
        .ok_or_else(|| UnavailabilityError::InvalidTimezone(name.to_string()))
}
