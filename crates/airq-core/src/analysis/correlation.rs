//! Pairwise Pearson correlation between pollutant columns.

use crate::dataset::Dataset;
use crate::models::{CorrelationMatrix, Pollutant};

/// Pearson correlation over rows where both values are present.
///
/// Returns `None` with fewer than two pairs or when either side is constant.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let (sum_x, sum_y) = pairs
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    let r = cov / (var_x.sqrt() * var_y.sqrt());
    Some(r.clamp(-1.0, 1.0))
}

/// Build the correlation heatmap for the selected pollutants.
pub fn correlation_matrix(data: &Dataset, pollutants: &[Pollutant]) -> CorrelationMatrix {
    let columns: Vec<Vec<Option<f64>>> = pollutants.iter().map(|p| data.column(*p)).collect();
    let n = pollutants.len();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let pairs: Vec<(f64, f64)> = columns[i]
                .iter()
                .zip(&columns[j])
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .collect();
            let r = if i == j {
                pearson(&pairs).map(|_| 1.0)
            } else {
                pearson(&pairs)
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        title: "Pollutant correlation heatmap".to_string(),
        labels: pollutants.to_vec(),
        values,
        color_scale: "RdBu_r".to_string(),
    }
}
