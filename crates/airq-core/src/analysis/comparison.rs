//! Grouped bar chart comparing pollutants across stations.

use super::palette::series_color;
use crate::config::AppConfig;
use crate::dataset::Dataset;
use crate::models::{Aggregate, Bar, ComparisonChart, Pollutant, StationGroup};

/// Reduce a station's readings of one pollutant. Missing readings are skipped.
fn reduce(values: impl Iterator<Item = f64>, aggregate: Aggregate) -> Option<f64> {
    let mut count = 0usize;
    let mut acc: Option<f64> = None;
    for v in values {
        count += 1;
        acc = Some(match (acc, aggregate) {
            (None, _) => v,
            (Some(a), Aggregate::Max) => a.max(v),
            (Some(a), Aggregate::Mean | Aggregate::Sum) => a + v,
        });
    }
    match aggregate {
        Aggregate::Mean => acc.map(|sum| sum / count as f64),
        Aggregate::Max | Aggregate::Sum => acc,
    }
}

/// Build the comparison chart.
///
/// Groups follow station first-appearance order in `data`; bars within a
/// group follow `pollutants` and take their color from its position.
pub fn comparison_chart(
    data: &Dataset,
    pollutants: &[Pollutant],
    aggregate: Aggregate,
) -> ComparisonChart {
    let groups = data
        .stations()
        .into_iter()
        .map(|station| {
            let bars = pollutants
                .iter()
                .enumerate()
                .map(|(i, pollutant)| {
                    let values = data
                        .records()
                        .iter()
                        .filter(|r| r.station == station)
                        .filter_map(|r| r.value(*pollutant));
                    Bar {
                        pollutant: *pollutant,
                        value: reduce(values, aggregate),
                        color: series_color(i).to_string(),
                    }
                })
                .collect();
            StationGroup { station, bars }
        })
        .collect();

    ComparisonChart {
        title: "Pollutant comparison".to_string(),
        x_label: "Station".to_string(),
        y_label: format!(
            "Pollutant concentration ({})",
            AppConfig::CONCENTRATION_UNIT
        ),
        legend_title: "Pollutant".to_string(),
        aggregate,
        groups,
    }
}
