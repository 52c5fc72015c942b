//! Airq Core - Headless library for air quality station analysis.
//!
//! This crate loads hourly pollutant readings from monitoring stations and
//! computes everything an interactive dashboard shows: trend lines with
//! moving-average overlays, station comparisons, a correlation heatmap,
//! summary statistics and safe-limit alerts. It has no HTTP layer; see the
//! `airq-rpc` crate for the dashboard server.
//!
//! # Example
//!
//! ```rust,ignore
//! use airq_core::{AirqApi, Pollutant, Selection};
//!
//! #[tokio::main]
//! async fn main() -> airq_core::Result<()> {
//!     let api = AirqApi::new("data/all_stations_cleaned.csv").await?;
//!     let options = api.get_filter_options();
//!     let bounds = options.date_bounds.expect("dataset has rows");
//!
//!     let session = api.create_session().session_id;
//!     api.analyze(&session, Selection {
//!         stations: options.stations.clone(),
//!         pollutants: vec![Pollutant::PM25, Pollutant::NO2],
//!         start: bounds.min,
//!         end: bounds.max,
//!         smoothing_method: Default::default(),
//!         smoothing_window: 90,
//!     }).await?;
//!
//!     for alert in api.get_alerts(&session).await? {
//!         println!("{}", alert.message);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod session;

mod api;

// Re-export commonly used types
pub use analysis::{SmoothingMethod, SmoothingWindow, Thresholds};
pub use config::DashboardSettings;
pub use dataset::{DataFilter, Dataset, Observation};
pub use error::{AirqError, Result};
pub use models::{
    Aggregate, AirQualityAlert, AlertStatus, DashboardReport, DashboardView, Pollutant, Selection,
};
pub use session::{AnalysisSession, SessionStore};

pub use api::AirqApiBuilder;

use config::SessionConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main API struct for dashboard operations.
///
/// Owns the immutable dataset, the safe-limit table and the session store.
/// All methods take `&self`; share it behind an `Arc` across tasks.
pub struct AirqApi {
    dataset: Arc<Dataset>,
    thresholds: Thresholds,
    sessions: SessionStore,
    settings: DashboardSettings,
}

impl AirqApi {
    /// Create a builder for AirqApi.
    pub fn builder(data_path: impl Into<PathBuf>) -> AirqApiBuilder {
        AirqApiBuilder::new(data_path)
    }

    /// Load a CSV file with default settings.
    pub async fn new(data_path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(data_path).build().await
    }

    /// Wrap an already-loaded dataset.
    pub fn from_dataset(dataset: Dataset, settings: DashboardSettings) -> Result<Self> {
        settings.validate()?;
        api::assemble(dataset, settings, SessionConfig::MAX_SESSIONS)
    }

    pub fn data_path(&self) -> &Path {
        &self.settings.data_path
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }
}
