//! Pollutant trend over time with moving-average overlays.

use super::palette::{moving_average_color, series_color};
use super::smoothing::{smooth, SmoothingMethod, SmoothingWindow};
use super::thresholds::Thresholds;
use crate::config::AppConfig;
use crate::dataset::Dataset;
use crate::models::{LineStyle, Point, Pollutant, Series, TrendChart};

const RAW_LINE_WIDTH: u8 = 2;
const SMOOTHED_LINE_WIDTH: u8 = 3;

/// Build the trend chart for one pollutant.
///
/// Stations are emitted in selection order. Raw series are colored by the
/// station's first appearance in `data`; overlays by selection position.
/// A selected station with no rows in `data` contributes no series.
pub fn trend_chart(
    data: &Dataset,
    pollutant: Pollutant,
    stations: &[String],
    method: SmoothingMethod,
    window: SmoothingWindow,
    thresholds: &Thresholds,
) -> TrendChart {
    let appearance = data.stations();
    let mut series = Vec::with_capacity(stations.len());
    let mut smoothed = Vec::with_capacity(stations.len());

    for (j, station) in stations.iter().enumerate() {
        let Some(color_index) = appearance.iter().position(|s| s == station) else {
            continue;
        };
        let raw = data.station_series(station, pollutant);
        let values: Vec<Option<f64>> = raw.iter().map(|(_, v)| *v).collect();
        let averaged = smooth(&values, method, window);

        series.push(Series {
            name: station.clone(),
            station: station.clone(),
            color: series_color(color_index).to_string(),
            style: LineStyle::Line,
            width: RAW_LINE_WIDTH,
            points: raw.iter().map(|(x, y)| Point { x: *x, y: *y }).collect(),
        });

        smoothed.push(Series {
            name: format!("{} (MA)", station),
            station: station.clone(),
            color: moving_average_color(j).to_string(),
            style: LineStyle::Dotted,
            width: SMOOTHED_LINE_WIDTH,
            points: raw
                .iter()
                .zip(averaged)
                .map(|((x, _), y)| Point { x: *x, y })
                .collect(),
        });
    }

    TrendChart {
        pollutant,
        title: format!("{} trend over time", pollutant),
        x_label: "Date".to_string(),
        y_label: format!(
            "{} concentration ({})",
            pollutant,
            AppConfig::CONCENTRATION_UNIT
        ),
        series,
        smoothed,
        threshold: thresholds.line(pollutant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample;

    #[test]
    fn test_trend_chart_shapes() {
        let data = sample();
        let stations = vec!["Changping".to_string(), "Aotizhongxin".to_string()];
        let chart = trend_chart(
            &data,
            Pollutant::PM25,
            &stations,
            SmoothingMethod::Sma,
            SmoothingWindow::new(2).unwrap(),
            &Thresholds::default(),
        );

        assert_eq!(chart.title, "PM25 trend over time");
        assert_eq!(chart.y_label, "PM25 concentration (µg/m³)");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.smoothed.len(), 2);

        // selection order, but raw colors follow appearance in the data
        assert_eq!(chart.series[0].name, "Changping");
        assert_eq!(chart.series[0].color, "#EF553B");
        assert_eq!(chart.series[1].color, "#636EFA");
        assert_eq!(chart.smoothed[0].name, "Changping (MA)");
        assert_eq!(chart.smoothed[0].color, "rgb(102,194,165)");
        assert_eq!(chart.smoothed[0].style, LineStyle::Dotted);
        assert_eq!(chart.smoothed[0].width, 3);

        let threshold = chart.threshold.unwrap();
        assert_eq!(threshold.value, 150.4);
    }

    #[test]
    fn test_smoothed_points_align_with_raw() {
        let data = sample();
        let stations = vec!["Aotizhongxin".to_string()];
        let chart = trend_chart(
            &data,
            Pollutant::NO2,
            &stations,
            SmoothingMethod::Sma,
            SmoothingWindow::new(2).unwrap(),
            &Thresholds::default(),
        );

        let raw = &chart.series[0].points;
        let ma = &chart.smoothed[0].points;
        assert_eq!(raw.len(), 3);
        assert_eq!(ma.len(), 3);
        assert_eq!(raw[1].x, ma[1].x);
        assert_eq!(ma[0].y, None);
        assert_eq!(ma[1].y, Some(10.5));
        assert_eq!(ma[2].y, Some(27.0));
    }

    #[test]
    fn test_station_without_rows_has_no_series() {
        let data = sample();
        let rows: Vec<_> = data
            .records()
            .iter()
            .filter(|r| r.station == "Changping")
            .cloned()
            .collect();
        let changping_only = Dataset::from_records(rows);

        let stations = vec!["Aotizhongxin".to_string(), "Changping".to_string()];
        let chart = trend_chart(
            &changping_only,
            Pollutant::PM25,
            &stations,
            SmoothingMethod::Sma,
            SmoothingWindow::new(2).unwrap(),
            &Thresholds::default(),
        );

        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].station, "Changping");
        assert_eq!(chart.series[0].color, "#636EFA");
        assert_eq!(chart.smoothed.len(), 1);
        assert_eq!(chart.smoothed[0].color, "rgb(252,141,98)");
    }

    #[test]
    fn test_no_threshold_line_when_unconfigured() {
        let data = sample();
        let chart = trend_chart(
            &data,
            Pollutant::SO2,
            &data.stations(),
            SmoothingMethod::Ema,
            SmoothingWindow::default(),
            &Thresholds::empty(),
        );
        assert!(chart.threshold.is_none());
    }
}
