//! User selection driving an analysis run.

use crate::analysis::smoothing::{SmoothingMethod, SmoothingWindow};
use crate::config::SmoothingConfig;
use crate::dataset::{DataFilter, Dataset};
use crate::error::{AirqError, Result};
use crate::models::Pollutant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_window() -> usize {
    SmoothingConfig::DEFAULT_WINDOW
}

/// Sidebar state captured when the user presses "Analyze".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub stations: Vec<String>,
    #[serde(default)]
    pub pollutants: Vec<Pollutant>,
    #[serde(alias = "startDate", alias = "start_date")]
    pub start: NaiveDate,
    #[serde(alias = "endDate", alias = "end_date")]
    pub end: NaiveDate,
    #[serde(default, alias = "smoothingMethod")]
    pub smoothing_method: SmoothingMethod,
    #[serde(default = "default_window", alias = "smoothingWindow")]
    pub smoothing_window: usize,
}

impl Selection {
    /// Whether the selection names at least one station and one pollutant.
    pub fn has_data(&self) -> bool {
        !self.stations.is_empty() && !self.pollutants.is_empty()
    }

    /// Row filter implied by this selection.
    pub fn filter(&self) -> DataFilter {
        DataFilter {
            stations: self.stations.clone(),
            start: self.start,
            end: self.end,
        }
    }

    /// Validated smoothing window.
    pub fn window(&self) -> Result<SmoothingWindow> {
        SmoothingWindow::new(self.smoothing_window)
    }

    /// Check the selection against a dataset.
    ///
    /// Empty station or pollutant lists are allowed here; they surface as a
    /// "no selection" view rather than an error.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        self.window()?;
        self.filter().validate_against(dataset)?;

        let mut seen = Vec::with_capacity(self.pollutants.len());
        for pollutant in &self.pollutants {
            if seen.contains(pollutant) {
                return Err(AirqError::validation(
                    "pollutants",
                    format!("{} selected more than once", pollutant),
                ));
            }
            seen.push(*pollutant);
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.stations.len());
        for station in &self.stations {
            if seen.contains(&station.as_str()) {
                return Err(AirqError::validation(
                    "stations",
                    format!("{} selected more than once", station),
                ));
            }
            seen.push(station);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_defaults() {
        let selection: Selection = serde_json::from_value(json!({
            "stations": ["Aotizhongxin"],
            "pollutants": ["PM25", "NO2"],
            "start": "2013-03-01",
            "end": "2013-03-31"
        }))
        .unwrap();

        assert_eq!(selection.smoothing_method, SmoothingMethod::Sma);
        assert_eq!(selection.smoothing_window, 90);
        assert!(selection.has_data());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let selection: Selection = serde_json::from_value(json!({
            "stations": [],
            "pollutants": ["O3"],
            "startDate": "2014-01-01",
            "endDate": "2014-01-02",
            "smoothingMethod": "EMA",
            "smoothingWindow": 7
        }))
        .unwrap();

        assert_eq!(selection.smoothing_method, SmoothingMethod::Ema);
        assert_eq!(selection.smoothing_window, 7);
        assert!(!selection.has_data());
    }

    #[test]
    fn test_deserialize_mixed_case_names() {
        let selection: Selection = serde_json::from_value(json!({
            "stations": ["Changping"],
            "pollutants": ["Pm25", "pm2.5 ", "No2"],
            "start": "2013-03-01",
            "end": "2013-03-03",
            "smoothingMethod": "Ema"
        }))
        .unwrap();

        assert_eq!(
            selection.pollutants,
            vec![Pollutant::PM25, Pollutant::PM25, Pollutant::NO2]
        );
        assert_eq!(selection.smoothing_method, SmoothingMethod::Ema);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let dataset = sample();
        let mut selection: Selection = serde_json::from_value(json!({
            "stations": ["Changping", "Aotizhongxin"],
            "pollutants": ["PM25"],
            "start": "2013-03-01",
            "end": "2013-03-03"
        }))
        .unwrap();
        selection.smoothing_window = 2;
        assert!(selection.validate(&dataset).is_ok());

        selection.stations.push("Changping".into());
        assert!(matches!(
            selection.validate(&dataset),
            Err(AirqError::Validation { ref field, .. }) if field == "stations"
        ));

        selection.stations.pop();
        selection.pollutants.push(Pollutant::PM25);
        assert!(matches!(
            selection.validate(&dataset),
            Err(AirqError::Validation { ref field, .. }) if field == "pollutants"
        ));
    }
}
