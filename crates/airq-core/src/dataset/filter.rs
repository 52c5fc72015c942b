//! Station and date range filtering.

use super::{Dataset, Observation};
use crate::error::{AirqError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rows kept by an analysis: selected stations within an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFilter {
    pub stations: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DataFilter {
    /// Whether a row passes. An empty station list matches nothing.
    pub fn matches(&self, record: &Observation) -> bool {
        let date = record.date();
        date >= self.start && date <= self.end && self.stations.iter().any(|s| *s == record.station)
    }

    /// Reject inverted date ranges.
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(AirqError::validation(
                "date_range",
                format!("start {} is after end {}", self.start, self.end),
            ));
        }
        Ok(())
    }

    /// Reject inverted ranges and stations the dataset does not contain.
    pub fn validate_against(&self, dataset: &Dataset) -> Result<()> {
        self.validate()?;
        let known = dataset.stations();
        for station in &self.stations {
            if !known.contains(station) {
                return Err(AirqError::UnknownStation(station.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 3, day).unwrap()
    }

    #[test]
    fn test_filter_by_station_and_inclusive_dates() {
        let data = sample();
        let filter = DataFilter {
            stations: vec!["Changping".into()],
            start: date(2),
            end: date(3),
        };
        let out = data.filter(&filter);
        assert_eq!(out.len(), 2);
        assert!(out.records().iter().all(|r| r.station == "Changping"));
    }

    #[test]
    fn test_empty_station_list_matches_nothing() {
        let data = sample();
        let filter = DataFilter {
            stations: vec![],
            start: date(1),
            end: date(3),
        };
        assert!(data.filter(&filter).is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let data = sample();
        let filter = DataFilter {
            stations: data.stations(),
            start: date(1),
            end: date(1),
        };
        assert_eq!(data.filter(&filter).len(), 2);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let filter = DataFilter {
            stations: vec![],
            start: date(3),
            end: date(1),
        };
        assert!(matches!(
            filter.validate(),
            Err(AirqError::Validation { ref field, .. }) if field == "date_range"
        ));
    }

    #[test]
    fn test_unknown_station_rejected() {
        let data = sample();
        let filter = DataFilter {
            stations: vec!["Atlantis".into()],
            start: date(1),
            end: date(3),
        };
        assert!(matches!(
            filter.validate_against(&data),
            Err(AirqError::UnknownStation(s)) if s == "Atlantis"
        ));
    }
}
