//! Half-open time ranges over the instant timeline.
//!
//! A [`TimeInterval`] is `[start, end)`. The zone attached to each endpoint only
//! decides how the instant is displayed; ordering, equality and overlap are all
//! computed on the underlying instant.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UnavailabilityError};

/// A half-open range `[start, end)` with `start <= end`.
///
/// Deserialization goes through [`TimeInterval::new`], so reversed endpoints
/// in JSON are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    #[serde(serialize_with = "rfc3339::serialize")]
    pub start: DateTime<Tz>,
    #[serde(serialize_with = "rfc3339::serialize")]
    pub end: DateTime<Tz>,
}

/// Wire shape of a [`TimeInterval`] before the ordering check.
#[derive(Deserialize)]
struct RawInterval {
    #[serde(deserialize_with = "rfc3339::deserialize")]
    start: DateTime<Tz>,
    #[serde(deserialize_with = "rfc3339::deserialize")]
    end: DateTime<Tz>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = UnavailabilityError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Build an interval, rejecting `start > end`.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if start > end {
            return Err(UnavailabilityError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent intervals (one ends exactly where the other starts) do not
    /// overlap, and an empty interval overlaps nothing.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.start <= *instant && *instant < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Express both endpoints in `tz`. The instants are unchanged.
    pub fn with_timezone(&self, tz: &Tz) -> Self {
        Self {
            start: self.start.with_timezone(tz),
            end: self.end.with_timezone(tz),
        }
    }

    /// Split into back-to-back pieces of `step` elapsed time.
    ///
    /// The final piece is truncated so the pieces exactly tile the interval.
    /// An empty interval yields no pieces; a non-positive step yields the
    /// interval itself.
    pub fn split_by(&self, step: Duration) -> Vec<TimeInterval> {
        if self.is_empty() {
            return Vec::new();
        }
        if step <= Duration::zero() {
            return vec![*self];
        }

        let mut pieces = Vec::new();
        let mut cursor = self.start;
        while cursor < self.end {
            let next = (cursor + step).min(self.end);
            pieces.push(TimeInterval {
                start: cursor,
                end: next,
            });
            cursor = next;
        }
        pieces
    }
}

/// RFC 3339 strings on the wire. Parsed instants are held in UTC.
mod rfc3339 {
    use chrono::DateTime;
    use chrono_tz::Tz;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(instant: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&instant.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Tz>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Tz::UTC))
            .map_err(serde::de::Error::custom)
    }
}
