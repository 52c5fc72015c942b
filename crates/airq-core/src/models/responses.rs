//! API response types for the dashboard front end.

use crate::analysis::smoothing::SmoothingMethod;
use crate::models::Pollutant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Backend status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub version: String,
    pub app_name: String,
    pub data_path: String,
    pub row_count: usize,
    pub station_count: usize,
    pub session_count: u64,
}

/// First and last calendar date in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// Inclusive slider range for the smoothing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRange {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

/// Everything the sidebar needs to render its controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptions {
    pub stations: Vec<String>,
    pub pollutants: Vec<Pollutant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_bounds: Option<DateBounds>,
    pub smoothing_methods: Vec<SmoothingMethod>,
    pub default_smoothing_method: SmoothingMethod,
    pub window: WindowRange,
}

/// A configured safe limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub pollutant: Pollutant,
    pub limit: f64,
    pub unit: String,
    pub label: String,
}

/// Result of opening a dashboard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}
