//! Calculator configuration.
//!
//! Loaded from JSON (every field optional) or from environment variables, then
//! turned into an [`UnavailabilityCalculator`] with [`CalculatorConfig::build`].

use std::env;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::calculator::UnavailabilityCalculator;
use crate::error::{Result, UnavailabilityError};

pub const BUFFER_MINUTES_ENV: &str = "UNAVAIL_BUFFER_MINUTES";
pub const TIME_ZONE_ENV: &str = "UNAVAIL_TIME_ZONE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Mandatory gap between bookings, in minutes (default: 0)
    pub buffer_minutes: i64,
    /// IANA zone calendar boundaries are chosen in (default: "UTC")
    pub time_zone: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            buffer_minutes: 0,
            time_zone: "UTC".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Defaults overlaid with environment variables.
    ///
    /// Environment variables:
    /// - `UNAVAIL_BUFFER_MINUTES`: buffer in minutes (default: 0)
    /// - `UNAVAIL_TIME_ZONE`: IANA zone name (default: "UTC")
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(BUFFER_MINUTES_ENV) {
            cfg.buffer_minutes = raw.trim().parse().map_err(|_| {
                UnavailabilityError::InvalidConfig(format!(
                    "{BUFFER_MINUTES_ENV} must be an integer number of minutes, got '{raw}'"
                ))
            })?;
        }

        if let Some(zone) = lookup(TIME_ZONE_ENV) {
            cfg.time_zone = zone;
        }

        Ok(cfg)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn buffer(&self) -> Result<Duration> {
        Duration::try_minutes(self.buffer_minutes).ok_or_else(|| {
            UnavailabilityError::InvalidConfig(format!(
                "buffer of {} minutes is out of range",
                self.buffer_minutes
            ))
        })
    }

    /// Resolve the zone and validate the buffer.
    pub fn build(&self) -> Result<UnavailabilityCalculator> {
        UnavailabilityCalculator::create(self.buffer()?, &self.time_zone)
    }
}
