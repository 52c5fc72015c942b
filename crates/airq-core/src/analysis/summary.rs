//! Descriptive statistics per pollutant.

use crate::dataset::Dataset;
use crate::models::{Pollutant, SummaryStats};

/// Quantile of sorted data by linear interpolation between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Statistics for a single column, skipping missing values.
pub fn describe(pollutant: Pollutant, column: &[Option<f64>]) -> SummaryStats {
    let mut values: Vec<f64> = column.iter().flatten().copied().collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std = match (mean, count) {
        (Some(m), n) if n > 1 => {
            let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
            Some((ss / (n - 1) as f64).sqrt())
        }
        _ => None,
    };

    SummaryStats {
        pollutant,
        count,
        mean,
        std,
        min: values.first().copied(),
        p25: quantile(&values, 0.25),
        p50: quantile(&values, 0.50),
        p75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

/// Summary table for the selected pollutants, in selection order.
pub fn summarize(data: &Dataset, pollutants: &[Pollutant]) -> Vec<SummaryStats> {
    pollutants
        .iter()
        .map(|p| describe(*p, &data.column(*p)))
        .collect()
}
