//! Status and sidebar option methods on AirqApi.

use crate::analysis::SmoothingMethod;
use crate::config::{AppConfig, SmoothingConfig};
use crate::models::{
    DateBounds, FilterOptions, Pollutant, StatusResponse, ThresholdEntry, WindowRange,
};
use crate::AirqApi;

impl AirqApi {
    /// Get backend status.
    pub fn get_status(&self) -> StatusResponse {
        StatusResponse {
            success: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            app_name: AppConfig::APP_NAME.to_string(),
            data_path: self.data_path().display().to_string(),
            row_count: self.dataset.len(),
            station_count: self.dataset.stations().len(),
            session_count: self.sessions.len(),
        }
    }

    /// Everything the sidebar needs: stations, pollutants, the date range
    /// and smoothing controls with their defaults.
    pub fn get_filter_options(&self) -> FilterOptions {
        FilterOptions {
            stations: self.dataset.stations(),
            pollutants: Pollutant::ALL.to_vec(),
            date_bounds: self
                .dataset
                .date_bounds()
                .map(|(min, max)| DateBounds { min, max }),
            smoothing_methods: SmoothingMethod::ALL.to_vec(),
            default_smoothing_method: self.settings.smoothing.method,
            window: WindowRange {
                min: SmoothingConfig::MIN_WINDOW,
                max: SmoothingConfig::MAX_WINDOW,
                default: self.settings.smoothing.window,
            },
        }
    }

    /// Configured safe limits.
    pub fn get_thresholds(&self) -> Vec<ThresholdEntry> {
        self.thresholds.entries()
    }
}
