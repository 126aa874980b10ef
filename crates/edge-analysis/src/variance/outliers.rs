//! Z-score outliers among active factors.

use super::types::{OutlierFactor, VarianceMetrics};
use super::ActiveFactor;

/// Factors with `|z| > z_threshold`, largest `|z|` first. Empty when the
/// values have no spread.
pub(crate) fn outlier_factors(
    factors: &[ActiveFactor],
    overall: &VarianceMetrics,
    z_threshold: f64,
) -> Vec<OutlierFactor> {
    if overall.std_dev <= 0.0 {
        return Vec::new();
    }
    let mut outliers: Vec<OutlierFactor> = factors
        .iter()
        .filter_map(|f| {
            let deviation = f.value - overall.mean;
            let z_score = deviation / overall.std_dev;
            (z_score.abs() > z_threshold).then(|| OutlierFactor {
                name: f.name.clone(),
                value: f.value,
                z_score,
                deviation,
                category: f.group,
            })
        })
        .collect();
    outliers.sort_by(|a, b| b.z_score.abs().total_cmp(&a.z_score.abs()));
    outliers
}
