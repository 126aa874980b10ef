//! Dispersion statistics over a set of factor values.

use statrs::statistics::Statistics;

use super::types::VarianceMetrics;

/// Sample statistics. All-zero or empty input yields all zeros; a single
/// value has zero spread. CV is `|sd / mean|`, or `sd` when the mean is 0.
pub fn variance_metrics(values: &[f64]) -> VarianceMetrics {
    if values.is_empty() || values.iter().all(|v| *v == 0.0) {
        return VarianceMetrics::default();
    }

    let mean = values.iter().mean();
    let (std_dev, variance) = if values.len() > 1 {
        (values.iter().std_dev(), values.iter().variance())
    } else {
        (0.0, 0.0)
    };
    let coefficient_of_variation = if mean != 0.0 {
        (std_dev / mean).abs()
    } else {
        std_dev
    };
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);

    VarianceMetrics {
        mean,
        std_dev,
        variance,
        coefficient_of_variation,
        range: max - min,
    }
}
