//! Session and analysis methods on AirqApi.

use crate::analysis::{smooth, SmoothingMethod, SmoothingWindow};
use crate::error::Result;
use crate::models::{
    Aggregate, AirQualityAlert, ComparisonChart, CorrelationMatrix, DashboardView, Pollutant,
    Selection, SessionCreated, SummaryStats, TrendChart,
};
use crate::AirqApi;
use tracing::info;

impl AirqApi {
    // ========================================
    // Sessions
    // ========================================

    /// Open a session. Its initial view is idle and its export is the full dataset.
    pub fn create_session(&self) -> SessionCreated {
        let id = self.sessions.create(self.dataset.clone());
        SessionCreated {
            session_id: id.to_string(),
        }
    }

    /// Close a session. Returns whether it existed.
    pub fn close_session(&self, session_id: &str) -> Result<bool> {
        self.sessions.remove(session_id)
    }

    /// Run an analysis for a session and return the number of matching rows.
    pub async fn analyze(&self, session_id: &str, selection: Selection) -> Result<usize> {
        let rows = self
            .sessions
            .update(session_id, |session| session.analyze(&self.dataset, selection))
            .await?;
        info!("Session {} analyzed {} rows", session_id, rows);
        Ok(rows)
    }

    // ========================================
    // Report sections
    // ========================================

    /// Full dashboard view for a session.
    pub async fn get_report(&self, session_id: &str) -> Result<DashboardView> {
        let handle = self.sessions.get(session_id)?;
        let session = handle.read().await;
        session.report(&self.thresholds)
    }

    pub async fn get_trend(&self, session_id: &str, pollutant: Pollutant) -> Result<TrendChart> {
        let handle = self.sessions.get(session_id)?;
        let session = handle.read().await;
        session.trend(pollutant, &self.thresholds)
    }

    pub async fn get_comparison(
        &self,
        session_id: &str,
        aggregate: Aggregate,
    ) -> Result<ComparisonChart> {
        let handle = self.sessions.get(session_id)?;
        let session = handle.read().await;
        session.comparison(aggregate)
    }

    pub async fn get_correlation(&self, session_id: &str) -> Result<CorrelationMatrix> {
        let handle = self.sessions.get(session_id)?;
        let session = handle.read().await;
        session.correlation()
    }

    pub async fn get_summary(&self, session_id: &str) -> Result<Vec<SummaryStats>> {
        let handle = self.sessions.get(session_id)?;
        let session = handle.read().await;
        session.summary()
    }

    pub async fn get_alerts(&self, session_id: &str) -> Result<Vec<AirQualityAlert>> {
        let handle = self.sessions.get(session_id)?;
        let session = handle.read().await;
        session.alerts(&self.thresholds)
    }

    /// CSV download of the session's current data.
    pub async fn export_csv(&self, session_id: &str) -> Result<String> {
        let handle = self.sessions.get(session_id)?;
        let session = handle.read().await;
        session.export_csv()
    }

    // ========================================
    // Stateless helpers
    // ========================================

    /// Smooth an arbitrary series with a validated window.
    pub fn smooth_series(
        &self,
        values: &[Option<f64>],
        method: SmoothingMethod,
        window: usize,
    ) -> Result<Vec<Option<f64>>> {
        let window = SmoothingWindow::new(window)?;
        Ok(smooth(values, method, window))
    }
}
