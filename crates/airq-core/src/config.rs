//! Centralized configuration for the air quality dashboard.
//!
//! Compile-time constants live on unit structs; runtime settings are read from
//! an optional TOML file into [`DashboardSettings`].

use crate::analysis::smoothing::SmoothingMethod;
use crate::error::{AirqError, Result};
use crate::models::Pollutant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Air Quality Dashboard";
    pub const DEFAULT_DATA_PATH: &'static str = "data/all_stations_cleaned.csv";
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const EXPORT_FILE_NAME: &'static str = "air_quality_data.csv";
    pub const EXPORT_MIME: &'static str = "text/csv";
    pub const CONCENTRATION_UNIT: &'static str = "µg/m³";
}

/// Smoothing defaults and bounds.
pub struct SmoothingConfig;

impl SmoothingConfig {
    pub const DEFAULT_METHOD: SmoothingMethod = SmoothingMethod::Sma;
    pub const DEFAULT_WINDOW: usize = 90;
    pub const MIN_WINDOW: usize = 1;
    pub const MAX_WINDOW: usize = 180;
}

/// Default safe limits per pollutant, in µg/m³.
pub struct ThresholdConfig;

impl ThresholdConfig {
    pub const PM25: f64 = 150.4;
    pub const PM10: f64 = 350.0;
    pub const SO2: f64 = 180.0;
    pub const NO2: f64 = 200.0;
    pub const CO: f64 = 8000.0;
    pub const O3: f64 = 235.0;

    /// Default limit for a pollutant.
    pub fn default_limit(pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::PM25 => Self::PM25,
            Pollutant::PM10 => Self::PM10,
            Pollutant::SO2 => Self::SO2,
            Pollutant::NO2 => Self::NO2,
            Pollutant::CO => Self::CO,
            Pollutant::O3 => Self::O3,
        }
    }
}

/// Chart color palettes.
pub struct PaletteConfig;

impl PaletteConfig {
    /// Qualitative palette for raw station series.
    pub const SERIES: [&'static str; 10] = [
        "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
        "#FF97FF", "#FECB52",
    ];

    /// Palette for moving-average overlays.
    pub const MOVING_AVERAGE: [&'static str; 8] = [
        "rgb(102,194,165)",
        "rgb(252,141,98)",
        "rgb(141,160,203)",
        "rgb(231,138,195)",
        "rgb(166,216,84)",
        "rgb(255,217,47)",
        "rgb(229,196,148)",
        "rgb(179,179,179)",
    ];

    pub const THRESHOLD_LINE: &'static str = "red";
}

/// Session cache behavior.
pub struct SessionConfig;

impl SessionConfig {
    pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(3600);
    pub const MAX_SESSIONS: u64 = 1024;
}

/// Smoothing defaults as they appear in the settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingSettings {
    pub method: SmoothingMethod,
    pub window: usize,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            method: SmoothingConfig::DEFAULT_METHOD,
            window: SmoothingConfig::DEFAULT_WINDOW,
        }
    }
}

/// Runtime settings for the dashboard.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// ```toml
/// data_path = "data/all_stations_cleaned.csv"
/// port = 8501
///
/// [thresholds]
/// PM25 = 75.0
///
/// [smoothing]
/// method = "ema"
/// window = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Per-pollutant overrides of the default safe limits.
    pub thresholds: BTreeMap<Pollutant, f64>,
    pub smoothing: SmoothingSettings,
    pub session_ttl_secs: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(AppConfig::DEFAULT_DATA_PATH),
            host: AppConfig::DEFAULT_HOST.to_string(),
            port: 0,
            thresholds: BTreeMap::new(),
            smoothing: SmoothingSettings::default(),
            session_ttl_secs: SessionConfig::DEFAULT_IDLE_TTL.as_secs(),
        }
    }
}

impl DashboardSettings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: DashboardSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AirqError::FileNotFound(path.to_path_buf()));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| AirqError::io_with_path(e, path))?;
        debug!("Loaded settings from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for (pollutant, limit) in &self.thresholds {
            if !limit.is_finite() || *limit <= 0.0 {
                return Err(AirqError::validation(
                    format!("thresholds.{}", pollutant),
                    format!("limit must be a positive number, got {}", limit),
                ));
            }
        }

        let window = self.smoothing.window;
        if !(SmoothingConfig::MIN_WINDOW..=SmoothingConfig::MAX_WINDOW).contains(&window) {
            return Err(AirqError::validation(
                "smoothing.window",
                format!(
                    "window must be between {} and {}, got {}",
                    SmoothingConfig::MIN_WINDOW,
                    SmoothingConfig::MAX_WINDOW,
                    window
                ),
            ));
        }

        if self.session_ttl_secs == 0 {
            return Err(AirqError::validation(
                "session_ttl_secs",
                "session TTL must be greater than zero",
            ));
        }

        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = DashboardSettings::from_toml_str("").unwrap();
        assert_eq!(
            settings.data_path,
            PathBuf::from("data/all_stations_cleaned.csv")
        );
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 0);
        assert!(settings.thresholds.is_empty());
        assert_eq!(settings.smoothing.method, SmoothingMethod::Sma);
        assert_eq!(settings.smoothing.window, 90);
    }

    #[test]
    fn test_threshold_overrides_parse() {
        let settings = DashboardSettings::from_toml_str(
            r#"
            port = 8501

            [thresholds]
            PM25 = 75.0
            O3 = 100

            [smoothing]
            method = "ema"
            window = 30
            "#,
        )
        .unwrap();

        assert_eq!(settings.port, 8501);
        assert_eq!(settings.thresholds.get(&Pollutant::PM25), Some(&75.0));
        assert_eq!(settings.thresholds.get(&Pollutant::O3), Some(&100.0));
        assert_eq!(settings.smoothing.method, SmoothingMethod::Ema);
        assert_eq!(settings.smoothing.window, 30);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = DashboardSettings::from_toml_str("[thresholds]\nCO = -1.0").unwrap_err();
        assert!(matches!(err, AirqError::Validation { .. }));
    }

    #[test]
    fn test_window_out_of_range_rejected() {
        let err = DashboardSettings::from_toml_str("[smoothing]\nwindow = 500").unwrap_err();
        assert!(matches!(err, AirqError::Validation { ref field, .. } if field == "smoothing.window"));
    }

    #[test]
    fn test_unknown_pollutant_key_rejected() {
        let err = DashboardSettings::from_toml_str("[thresholds]\nPM1 = 10.0").unwrap_err();
        assert!(matches!(err, AirqError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DashboardSettings::load(Path::new("/nonexistent/airq.toml")).unwrap_err();
        assert!(matches!(err, AirqError::FileNotFound(_)));
    }

    #[test]
    fn test_default_limits() {
        assert_eq!(ThresholdConfig::default_limit(Pollutant::PM25), 150.4);
        assert_eq!(ThresholdConfig::default_limit(Pollutant::CO), 8000.0);
    }
}
