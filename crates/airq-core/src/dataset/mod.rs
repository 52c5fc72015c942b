//! In-memory station measurements.
//!
//! A [`Dataset`] is immutable once loaded. Filtering produces a new dataset so
//! sessions can hold their own view behind an `Arc`.

mod export;
mod filter;
mod loader;

pub use filter::DataFilter;
pub use loader::{parse_timestamp, MISSING_MARKERS};

use crate::models::Pollutant;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// A single hourly reading at one station.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station: String,
    pub datetime: NaiveDateTime,
    /// Indexed by [`Pollutant::index`].
    pub values: [Option<f64>; 6],
    /// Raw cells of non-pollutant columns, aligned with [`Dataset::extra_columns`].
    pub extra: Vec<String>,
}

impl Observation {
    pub fn new(station: impl Into<String>, datetime: NaiveDateTime) -> Self {
        Self {
            station: station.into(),
            datetime,
            values: [None; 6],
            extra: Vec::new(),
        }
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with_value(mut self, pollutant: Pollutant, value: f64) -> Self {
        self.values[pollutant.index()] = Some(value);
        self
    }

    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        self.values[pollutant.index()]
    }

    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }
}

/// A table of observations in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    extra_columns: Vec<String>,
    records: Vec<Observation>,
}

impl Dataset {
    pub fn new(extra_columns: Vec<String>, records: Vec<Observation>) -> Self {
        Self {
            extra_columns,
            records,
        }
    }

    pub fn from_records(records: Vec<Observation>) -> Self {
        Self::new(Vec::new(), records)
    }

    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique station names in order of first appearance.
    pub fn stations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut stations = Vec::new();
        for record in &self.records {
            if seen.insert(record.station.as_str()) {
                stations.push(record.station.clone());
            }
        }
        stations
    }

    pub fn has_station(&self, station: &str) -> bool {
        self.records.iter().any(|r| r.station == station)
    }

    /// Earliest and latest calendar date, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut iter = self.records.iter().map(|r| r.date());
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Rows matching a filter, preserving order and extra columns.
    pub fn filter(&self, filter: &DataFilter) -> Dataset {
        let records = self
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Dataset::new(self.extra_columns.clone(), records)
    }

    /// All values of one pollutant, in row order.
    pub fn column(&self, pollutant: Pollutant) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.value(pollutant)).collect()
    }

    /// Time series of one pollutant at one station, in row order.
    pub fn station_series(
        &self,
        station: &str,
        pollutant: Pollutant,
    ) -> Vec<(NaiveDateTime, Option<f64>)> {
        self.records
            .iter()
            .filter(|r| r.station == station)
            .map(|r| (r.datetime, r.value(pollutant)))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    pub fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 3, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    /// Two stations, three days, PM25 and NO2 populated with a gap.
    pub fn sample() -> Dataset {
        let rows = vec![
            Observation::new("Aotizhongxin", at(1, 0))
                .with_value(Pollutant::PM25, 4.0)
                .with_value(Pollutant::NO2, 7.0),
            Observation::new("Changping", at(1, 0))
                .with_value(Pollutant::PM25, 3.0)
                .with_value(Pollutant::NO2, 13.0),
            Observation::new("Aotizhongxin", at(2, 0))
                .with_value(Pollutant::PM25, 8.0)
                .with_value(Pollutant::NO2, 14.0),
            Observation::new("Changping", at(2, 0)).with_value(Pollutant::NO2, 20.0),
            Observation::new("Aotizhongxin", at(3, 0))
                .with_value(Pollutant::PM25, 200.0)
                .with_value(Pollutant::NO2, 40.0),
            Observation::new("Changping", at(3, 0))
                .with_value(Pollutant::PM25, 12.0)
                .with_value(Pollutant::NO2, 30.0),
        ];
        Dataset::from_records(rows)
    }
}
