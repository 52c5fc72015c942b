//! Per-client dashboard state.

use crate::analysis::{
    comparison_chart, correlation_matrix, evaluate_alerts, summarize, trend_chart, Thresholds,
};
use crate::dataset::Dataset;
use crate::error::{AirqError, Result};
use crate::models::{
    Aggregate, AirQualityAlert, ComparisonChart, CorrelationMatrix, DashboardReport,
    DashboardView, Pollutant, Selection, SummaryStats, TrendChart,
};
use std::sync::Arc;
use tracing::debug;

const IDLE_MESSAGE: &str = "Choose data filters and press 'Analyze' to start.";
const NO_SELECTION_MESSAGE: &str = "No data selected. Choose data to analyze.";
const STARTED_MESSAGE: &str = "Data analysis started!";

/// State kept between requests for one dashboard client.
///
/// Before the first analysis the session exposes the whole dataset, which is
/// what a download returns at that point.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    filtered: Arc<Dataset>,
    selection: Option<Selection>,
    analysis_triggered: bool,
}

impl AnalysisSession {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            filtered: dataset,
            selection: None,
            analysis_triggered: false,
        }
    }

    pub fn filtered(&self) -> &Arc<Dataset> {
        &self.filtered
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_triggered(&self) -> bool {
        self.analysis_triggered
    }

    /// Apply a selection: validate it, filter the dataset and mark the
    /// session as analyzed. On error the session is left unchanged.
    pub fn analyze(&mut self, dataset: &Dataset, selection: Selection) -> Result<usize> {
        selection.validate(dataset)?;
        let filtered = dataset.filter(&selection.filter());
        let rows = filtered.len();
        debug!(
            "Analysis over {} stations, {} pollutants: {} rows",
            selection.stations.len(),
            selection.pollutants.len(),
            rows
        );
        self.filtered = Arc::new(filtered);
        self.selection = Some(selection);
        self.analysis_triggered = true;
        Ok(rows)
    }

    /// The selection to analyze, or `EmptySelection` when there is none.
    fn active_selection(&self) -> Result<&Selection> {
        match &self.selection {
            Some(selection) if self.analysis_triggered && selection.has_data() => Ok(selection),
            _ => Err(AirqError::EmptySelection),
        }
    }

    pub fn trend(&self, pollutant: Pollutant, thresholds: &Thresholds) -> Result<TrendChart> {
        let selection = self.active_selection()?;
        Ok(trend_chart(
            &self.filtered,
            pollutant,
            &selection.stations,
            selection.smoothing_method,
            selection.window()?,
            thresholds,
        ))
    }

    pub fn comparison(&self, aggregate: Aggregate) -> Result<ComparisonChart> {
        let selection = self.active_selection()?;
        Ok(comparison_chart(
            &self.filtered,
            &selection.pollutants,
            aggregate,
        ))
    }

    pub fn correlation(&self) -> Result<CorrelationMatrix> {
        let selection = self.active_selection()?;
        Ok(correlation_matrix(&self.filtered, &selection.pollutants))
    }

    pub fn summary(&self) -> Result<Vec<SummaryStats>> {
        let selection = self.active_selection()?;
        Ok(summarize(&self.filtered, &selection.pollutants))
    }

    pub fn alerts(&self, thresholds: &Thresholds) -> Result<Vec<AirQualityAlert>> {
        let selection = self.active_selection()?;
        Ok(evaluate_alerts(
            &self.filtered,
            &selection.pollutants,
            thresholds,
        ))
    }

    /// Full report for the main dashboard area.
    pub fn report(&self, thresholds: &Thresholds) -> Result<DashboardView> {
        if !self.analysis_triggered {
            return Ok(DashboardView::Idle {
                message: IDLE_MESSAGE.to_string(),
            });
        }
        let selection = match &self.selection {
            Some(selection) if selection.has_data() => selection,
            _ => {
                return Ok(DashboardView::NoSelection {
                    message: NO_SELECTION_MESSAGE.to_string(),
                })
            }
        };

        let trends = selection
            .pollutants
            .iter()
            .map(|p| self.trend(*p, thresholds))
            .collect::<Result<Vec<_>>>()?;

        let report = DashboardReport {
            success_message: STARTED_MESSAGE.to_string(),
            row_count: self.filtered.len(),
            trends,
            comparison: self.comparison(Aggregate::default())?,
            correlation: self.correlation()?,
            summary: self.summary()?,
            alerts: self.alerts(thresholds)?,
        };
        Ok(DashboardView::Ready {
            report: Box::new(report),
        })
    }

    /// CSV of the session's current data.
    pub fn export_csv(&self) -> Result<String> {
        self.filtered.to_csv_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SmoothingMethod;
    use crate::dataset::fixtures::sample;
    use chrono::NaiveDate;

    fn selection(stations: &[&str], pollutants: &[Pollutant]) -> Selection {
        Selection {
            stations: stations.iter().map(|s| s.to_string()).collect(),
            pollutants: pollutants.to_vec(),
            start: NaiveDate::from_ymd_opt(2013, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2013, 3, 2).unwrap(),
            smoothing_method: SmoothingMethod::Ema,
            smoothing_window: 3,
        }
    }

    #[test]
    fn test_idle_before_analysis() {
        let session = AnalysisSession::new(Arc::new(sample()));
        let view = session.report(&Thresholds::default()).unwrap();
        assert!(matches!(view, DashboardView::Idle { .. }));
        assert!(matches!(session.summary(), Err(AirqError::EmptySelection)));
    }

    #[test]
    fn test_export_before_analysis_is_whole_dataset() {
        let session = AnalysisSession::new(Arc::new(sample()));
        let csv = session.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 7);
    }

    #[test]
    fn test_analyze_filters_and_reports() {
        let data = sample();
        let mut session = AnalysisSession::new(Arc::new(data.clone()));
        let rows = session
            .analyze(&data, selection(&["Aotizhongxin"], &[Pollutant::PM25, Pollutant::NO2]))
            .unwrap();
        assert_eq!(rows, 2);
        assert!(session.is_triggered());

        let view = session.report(&Thresholds::default()).unwrap();
        let DashboardView::Ready { report } = view else {
            panic!("expected a ready report");
        };
        assert_eq!(report.row_count, 2);
        assert_eq!(report.trends.len(), 2);
        assert_eq!(report.trends[0].pollutant, Pollutant::PM25);
        assert_eq!(report.summary.len(), 2);
        assert_eq!(report.alerts.len(), 2);
        assert_eq!(report.comparison.groups.len(), 1);
        assert_eq!(report.success_message, "Data analysis started!");

        // the third day, where PM25 exceeds its limit, is outside the range
        assert!(report.alerts.iter().all(|a| !a.is_exceeded()));
        assert_eq!(session.export_csv().unwrap().lines().count(), 3);
    }

    #[test]
    fn test_empty_selection_view() {
        let data = sample();
        let mut session = AnalysisSession::new(Arc::new(data.clone()));
        session
            .analyze(&data, selection(&["Changping"], &[]))
            .unwrap();
        let view = session.report(&Thresholds::default()).unwrap();
        assert!(matches!(view, DashboardView::NoSelection { .. }));
    }

    #[test]
    fn test_invalid_selection_leaves_session_untouched() {
        let data = sample();
        let mut session = AnalysisSession::new(Arc::new(data.clone()));
        let mut bad = selection(&["Changping"], &[Pollutant::CO]);
        bad.smoothing_window = 0;
        assert!(session.analyze(&data, bad).is_err());
        assert!(!session.is_triggered());
        assert_eq!(session.filtered().len(), 6);
    }
}
