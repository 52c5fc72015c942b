//! Chart-ready analysis output.
//!
//! These types carry data and presentation hints (labels, colors, line styles)
//! but no rendering. Field names are snake_case on the wire.

use crate::models::Pollutant;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One point of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: NaiveDateTime,
    pub y: Option<f64>,
}

/// How a series line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Line,
    Dotted,
    Dashed,
}

/// A named, colored series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub station: String,
    pub color: String,
    pub style: LineStyle,
    pub width: u8,
    pub points: Vec<Point>,
}

/// Horizontal reference line at a pollutant's safe limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLine {
    pub value: f64,
    pub label: String,
    pub color: String,
    pub style: LineStyle,
}

/// Per-pollutant trend over time with moving-average overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    pub pollutant: Pollutant,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub smoothed: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<ThresholdLine>,
}

/// Reduction applied to a station's values in the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    #[default]
    Mean,
    Max,
    Sum,
}

impl std::str::FromStr for Aggregate {
    type Err = crate::AirqError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mean" | "avg" => Ok(Aggregate::Mean),
            "max" => Ok(Aggregate::Max),
            "sum" => Ok(Aggregate::Sum),
            other => Err(crate::AirqError::validation(
                "aggregate",
                format!("expected mean, max or sum, got {}", other),
            )),
        }
    }
}

/// One bar in a station group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub pollutant: Pollutant,
    pub value: Option<f64>,
    pub color: String,
}

/// Bars for a single station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationGroup {
    pub station: String,
    pub bars: Vec<Bar>,
}

/// Grouped bar chart comparing pollutants across stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub aggregate: Aggregate,
    pub groups: Vec<StationGroup>,
}

/// Pairwise Pearson correlation between pollutants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub title: String,
    pub labels: Vec<Pollutant>,
    /// Row-major; `values[i][j]` correlates `labels[i]` with `labels[j]`.
    pub values: Vec<Vec<Option<f64>>>,
    pub color_scale: String,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Pollutant, b: Pollutant) -> Option<f64> {
        let i = self.labels.iter().position(|p| *p == a)?;
        let j = self.labels.iter().position(|p| *p == b)?;
        self.values[i][j]
    }
}

/// Descriptive statistics for one pollutant column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub pollutant: Pollutant,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Outcome of comparing a pollutant's peak against its safe limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlertStatus {
    Exceeded {
        max: f64,
        limit: f64,
        delta: f64,
        station: String,
    },
    WithinLimit {
        max: f64,
        limit: f64,
    },
    NoData,
    NoThreshold,
}

/// Air quality notification for one pollutant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityAlert {
    pub pollutant: Pollutant,
    #[serde(flatten)]
    pub status: AlertStatus,
    pub message: String,
}

impl AirQualityAlert {
    pub fn is_exceeded(&self) -> bool {
        matches!(self.status, AlertStatus::Exceeded { .. })
    }
}

/// Every section of a completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub success_message: String,
    pub row_count: usize,
    pub trends: Vec<TrendChart>,
    pub comparison: ComparisonChart,
    pub correlation: CorrelationMatrix,
    pub summary: Vec<SummaryStats>,
    pub alerts: Vec<AirQualityAlert>,
}

/// What the main dashboard area shows for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    /// No analysis has been run yet.
    Idle { message: String },
    /// Analysis ran, but without stations or pollutants.
    NoSelection { message: String },
    Ready { report: Box<DashboardReport> },
}
