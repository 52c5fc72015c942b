//! Builder for configuring AirqApi initialization.

use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::Thresholds;
use crate::config::{DashboardSettings, SessionConfig};
use crate::dataset::Dataset;
use crate::error::{AirqError, Result};
use crate::session::SessionStore;
use crate::AirqApi;

/// Builder for configuring AirqApi initialization.
///
/// # Example
///
/// ```rust,ignore
/// use airq_core::{AirqApi, DashboardSettings};
///
/// let api = AirqApi::builder("data/all_stations_cleaned.csv")
///     .settings(DashboardSettings::load("airq.toml".as_ref())?)
///     .build()
///     .await?;
/// ```
pub struct AirqApiBuilder {
    data_path: PathBuf,
    settings: DashboardSettings,
    max_sessions: u64,
}

impl AirqApiBuilder {
    /// Create a new builder for the given CSV file.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            settings: DashboardSettings::default(),
            max_sessions: SessionConfig::MAX_SESSIONS,
        }
    }

    /// Use runtime settings (thresholds, smoothing defaults, session TTL).
    ///
    /// The builder's data path takes precedence over `settings.data_path`.
    pub fn settings(mut self, settings: DashboardSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Cap the number of concurrent sessions.
    ///
    /// Default: 1024
    pub fn max_sessions(mut self, max_sessions: u64) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Load the dataset and build the AirqApi instance.
    pub async fn build(mut self) -> Result<AirqApi> {
        self.settings.validate()?;
        self.settings.data_path = self.data_path.clone();

        let path = self.data_path.clone();
        let dataset = tokio::task::spawn_blocking(move || Dataset::from_path(&path))
            .await
            .map_err(|e| AirqError::Other(format!("Dataset loading task failed: {}", e)))??;

        assemble(dataset, self.settings, self.max_sessions)
    }
}

/// Wire a loaded dataset and validated settings into an API instance.
pub(crate) fn assemble(
    dataset: Dataset,
    settings: DashboardSettings,
    max_sessions: u64,
) -> Result<AirqApi> {
    let thresholds = Thresholds::with_overrides(&settings.thresholds)?;
    let sessions = SessionStore::new(settings.session_ttl(), max_sessions);

    if dataset.is_empty() {
        tracing::warn!("Dataset at {} has no rows", settings.data_path.display());
    }

    Ok(AirqApi {
        dataset: Arc::new(dataset),
        thresholds,
        sessions,
        settings,
    })
}
