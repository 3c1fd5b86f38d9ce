//! The unavailability data a caller hands to every query.
//!
//! The caller owns the dataset's validity: records sorted by start, raw
//! intervals pairwise non-overlapping, and no duplicate identifiers within a
//! record. None of this is re-validated here.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::TimeInterval;

/// Opaque resource token. Compared by exact string equality.
pub type Identifier = String;

/// One window during which a set of identifiers is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailabilityRecord {
    pub interval: TimeInterval,
    /// Treated as a set; duplicates are not expected.
    pub identifiers: Vec<Identifier>,
}

/// Every identifier in scope plus their unavailability windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnavailabilityDataset {
    /// How many identifiers the percentages are measured against.
    pub total_unique_identifiers: usize,
    /// Sorted by interval start.
    #[serde(default)]
    pub records: Vec<UnavailabilityRecord>,
}

impl UnavailabilityRecord {
    pub fn new<I, S>(interval: TimeInterval, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identifier>,
    {
        Self {
            interval,
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }
}

impl UnavailabilityDataset {
    pub fn new(total_unique_identifiers: usize, records: Vec<UnavailabilityRecord>) -> Self {
        Self {
            total_unique_identifiers,
            records,
        }
    }

    /// Parse a dataset from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_with_utc_suffix() {
        let json = r#"{
            "total_unique_identifiers": 2,
            "records": [
                {
                    "interval": {"start": "2020-01-01T00:00:00Z", "end": "2020-01-01T02:00:00Z"},
                    "identifiers": ["room-1", "room-2"]
                }
            ]
        }"#;
        let dataset = UnavailabilityDataset::from_json(json).unwrap();
        assert_eq!(dataset.total_unique_identifiers, 2);
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].identifiers, vec!["room-1", "room-2"]);
        assert_eq!(dataset.records[0].interval.duration().num_hours(), 2);
    }

    #[test]
    fn records_default_to_empty() {
        let dataset = UnavailabilityDataset::from_json(r#"{"total_unique_identifiers": 0}"#).unwrap();
        assert!(dataset.records.is_empty());
    }

    #[test]
    fn rejects_malformed_instant() {
        let json = r#"{
            "total_unique_identifiers": 1,
            "records": [{"interval": {"start": "yesterday", "end": "today"}, "identifiers": ["a"]}]
        }"#;
        assert!(UnavailabilityDataset::from_json(json).is_err());
    }

    #[test]
    fn rejects_reversed_interval() {
        let json = r#"{
            "total_unique_identifiers": 1,
            "records": [{
                "interval": {"start": "2020-01-01T05:00:00Z", "end": "2020-01-01T04:00:00Z"},
                "identifiers": ["a"]
            }]
        }"#;
        let err = UnavailabilityDataset::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Invalid interval"), "got: {err}");
    }
}
