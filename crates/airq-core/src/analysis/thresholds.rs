//! Per-pollutant safe limits.

use crate::config::{AppConfig, PaletteConfig, ThresholdConfig};
use crate::error::{AirqError, Result};
use crate::models::{LineStyle, Pollutant, ThresholdEntry, ThresholdLine};
use std::collections::BTreeMap;

/// Safe limits in µg/m³, keyed by pollutant.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    limits: BTreeMap<Pollutant, f64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        let limits = Pollutant::ALL
            .iter()
            .map(|p| (*p, ThresholdConfig::default_limit(*p)))
            .collect();
        Self { limits }
    }
}

impl Thresholds {
    /// A table with no limits at all.
    pub fn empty() -> Self {
        Self {
            limits: BTreeMap::new(),
        }
    }

    /// Defaults with the given overrides applied.
    pub fn with_overrides(overrides: &BTreeMap<Pollutant, f64>) -> Result<Self> {
        let mut thresholds = Self::default();
        for (pollutant, limit) in overrides {
            thresholds.set(*pollutant, *limit)?;
        }
        Ok(thresholds)
    }

    pub fn set(&mut self, pollutant: Pollutant, limit: f64) -> Result<()> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(AirqError::validation(
                format!("thresholds.{}", pollutant),
                format!("limit must be a positive number, got {}", limit),
            ));
        }
        self.limits.insert(pollutant, limit);
        Ok(())
    }

    pub fn remove(&mut self, pollutant: Pollutant) {
        self.limits.remove(&pollutant);
    }

    pub fn limit(&self, pollutant: Pollutant) -> Option<f64> {
        self.limits.get(&pollutant).copied()
    }

    /// Reference-line annotation, e.g. "Safe limit PM25 (150.4 µg/m³)".
    pub fn label(&self, pollutant: Pollutant) -> Option<String> {
        self.limit(pollutant).map(|limit| {
            format!(
                "Safe limit {} ({} {})",
                pollutant,
                limit,
                AppConfig::CONCENTRATION_UNIT
            )
        })
    }

    /// Dashed red line at the limit, if one is configured.
    pub fn line(&self, pollutant: Pollutant) -> Option<ThresholdLine> {
        let value = self.limit(pollutant)?;
        Some(ThresholdLine {
            value,
            label: self.label(pollutant)?,
            color: PaletteConfig::THRESHOLD_LINE.to_string(),
            style: LineStyle::Dashed,
        })
    }

    /// All configured limits in sidebar order.
    pub fn entries(&self) -> Vec<ThresholdEntry> {
        Pollutant::ALL
            .iter()
            .filter_map(|p| {
                Some(ThresholdEntry {
                    pollutant: *p,
                    limit: self.limit(*p)?,
                    unit: AppConfig::CONCENTRATION_UNIT.to_string(),
                    label: self.label(*p)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_pollutant() {
        let t = Thresholds::default();
        assert_eq!(t.limit(Pollutant::PM25), Some(150.4));
        assert_eq!(t.limit(Pollutant::NO2), Some(200.0));
        assert_eq!(t.limit(Pollutant::PM10), Some(350.0));
        assert_eq!(t.limit(Pollutant::SO2), Some(180.0));
        assert_eq!(t.limit(Pollutant::CO), Some(8000.0));
        assert_eq!(t.limit(Pollutant::O3), Some(235.0));
        assert_eq!(t.entries().len(), 6);
    }

    #[test]
    fn test_label_format() {
        let t = Thresholds::default();
        assert_eq!(
            t.label(Pollutant::PM25).unwrap(),
            "Safe limit PM25 (150.4 µg/m³)"
        );
        assert_eq!(t.label(Pollutant::NO2).unwrap(), "Safe limit NO2 (200 µg/m³)");
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert(Pollutant::PM25, 75.0);
        let t = Thresholds::with_overrides(&overrides).unwrap();
        assert_eq!(t.limit(Pollutant::PM25), Some(75.0));
        assert_eq!(t.limit(Pollutant::O3), Some(235.0));

        overrides.insert(Pollutant::O3, f64::NAN);
        assert!(Thresholds::with_overrides(&overrides).is_err());
    }

    #[test]
    fn test_line_absent_without_limit() {
        let mut t = Thresholds::default();
        t.remove(Pollutant::CO);
        assert!(t.line(Pollutant::CO).is_none());
        let line = t.line(Pollutant::O3).unwrap();
        assert_eq!(line.style, LineStyle::Dashed);
        assert_eq!(line.color, "red");
    }
}
