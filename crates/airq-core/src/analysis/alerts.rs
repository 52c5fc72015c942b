//! Safe-limit notifications.

use super::thresholds::Thresholds;
use crate::dataset::Dataset;
use crate::models::{AirQualityAlert, AlertStatus, Pollutant};

/// Highest reading of a pollutant and the station where it first occurred.
pub fn peak(data: &Dataset, pollutant: Pollutant) -> Option<(f64, &str)> {
    let mut best: Option<(f64, &str)> = None;
    for record in data.records() {
        if let Some(v) = record.value(pollutant) {
            if best.map_or(true, |(max, _)| v > max) {
                best = Some((v, record.station.as_str()));
            }
        }
    }
    best
}

fn evaluate(data: &Dataset, pollutant: Pollutant, thresholds: &Thresholds) -> AirQualityAlert {
    let (status, message) = match (thresholds.limit(pollutant), peak(data, pollutant)) {
        (None, _) => (
            AlertStatus::NoThreshold,
            format!("No safe limit configured for {}.", pollutant),
        ),
        (Some(_), None) => (
            AlertStatus::NoData,
            format!("No {} readings in the selected data.", pollutant),
        ),
        (Some(limit), Some((max, station))) if max > limit => (
            AlertStatus::Exceeded {
                max,
                limit,
                delta: max - limit,
                station: station.to_string(),
            },
            format!(
                "⚠️ Warning: air quality exceeds the safe limit for {}!",
                pollutant
            ),
        ),
        (Some(limit), Some((max, _))) => (
            AlertStatus::WithinLimit { max, limit },
            format!("✅ Air quality for {} is within the safe limit.", pollutant),
        ),
    };

    AirQualityAlert {
        pollutant,
        status,
        message,
    }
}

/// One alert per selected pollutant, in selection order.
pub fn evaluate_alerts(
    data: &Dataset,
    pollutants: &[Pollutant],
    thresholds: &Thresholds,
) -> Vec<AirQualityAlert> {
    pollutants
        .iter()
        .map(|p| evaluate(data, *p, thresholds))
        .collect()
}
