//! Moving-average smoothing for trend overlays.
//!
//! Both methods operate on row order and treat `None` as a missing reading.
//! Output always has the same length as the input.

use crate::config::SmoothingConfig;
use crate::error::{AirqError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smoothing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SmoothingMethod {
    /// Exponential moving average.
    Ema,
    /// Simple moving average.
    #[default]
    Sma,
}

impl SmoothingMethod {
    pub const ALL: [SmoothingMethod; 2] = [SmoothingMethod::Ema, SmoothingMethod::Sma];

    pub fn as_str(&self) -> &'static str {
        match self {
            SmoothingMethod::Ema => "EMA",
            SmoothingMethod::Sma => "SMA",
        }
    }
}

impl FromStr for SmoothingMethod {
    type Err = AirqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ema" => Ok(SmoothingMethod::Ema),
            "sma" => Ok(SmoothingMethod::Sma),
            other => Err(AirqError::validation(
                "smoothing_method",
                format!("expected EMA or SMA, got {}", other),
            )),
        }
    }
}

impl TryFrom<String> for SmoothingMethod {
    type Error = AirqError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for SmoothingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A window length within the slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingWindow(usize);

impl SmoothingWindow {
    pub fn new(window: usize) -> Result<Self> {
        if (SmoothingConfig::MIN_WINDOW..=SmoothingConfig::MAX_WINDOW).contains(&window) {
            Ok(Self(window))
        } else {
            Err(AirqError::validation(
                "smoothing_window",
                format!(
                    "window must be between {} and {}, got {}",
                    SmoothingConfig::MIN_WINDOW,
                    SmoothingConfig::MAX_WINDOW,
                    window
                ),
            ))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self(SmoothingConfig::DEFAULT_WINDOW)
    }
}

/// Smooth a series with the given method.
pub fn smooth(
    series: &[Option<f64>],
    method: SmoothingMethod,
    window: SmoothingWindow,
) -> Vec<Option<f64>> {
    match method {
        SmoothingMethod::Ema => ema(series, window.get()),
        SmoothingMethod::Sma => sma(series, window.get()),
    }
}

/// Exponential moving average with `span = window` and no bias adjustment.
///
/// Missing readings still age the running value: each step multiplies the old
/// weight by `1 - alpha`, so the next observation after a gap counts for more.
/// Output is `None` until the first observation and repeats the last value
/// across gaps.
pub fn ema(series: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;

    let mut out = Vec::with_capacity(series.len());
    let mut current: Option<f64> = None;
    let mut old_weight = 1.0;

    for value in series {
        match (current, *value) {
            (None, Some(x)) => {
                current = Some(x);
                old_weight = 1.0;
            }
            (Some(prev), observed) => {
                old_weight *= decay;
                if let Some(x) = observed {
                    if prev != x {
                        current = Some((old_weight * prev + alpha * x) / (old_weight + alpha));
                    }
                    old_weight = 1.0;
                }
            }
            (None, None) => {}
        }
        out.push(current);
    }
    out
}

/// Trailing simple moving average over exactly `window` rows.
///
/// A position yields a value only when all `window` rows ending there are
/// present, so the first `window - 1` outputs are always `None`. Each full
/// window is summed afresh so a large reading leaving the window cannot
/// swamp the small ones that remain.
pub fn sma(series: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(series.len());
    if window == 0 {
        out.resize(series.len(), None);
        return out;
    }

    let mut present = 0usize;

    for (i, value) in series.iter().enumerate() {
        if value.is_some() {
            present += 1;
        }
        if i >= window && series[i - window].is_some() {
            present -= 1;
        }
        if i + 1 >= window && present == window {
            let sum: f64 = series[i + 1 - window..=i].iter().flatten().sum();
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}
