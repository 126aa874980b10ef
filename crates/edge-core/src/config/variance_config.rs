//! Variance detector configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VarianceConfig {
    /// Minimum active factors before statistics are computed. Default: 3.
    pub min_active_factors: Option<usize>,
    /// |z| above which a factor is an outlier. Default: 1.5.
    pub outlier_z_threshold: Option<f64>,
    /// CV upper bounds for CONSENSUS, MILD, MODERATE, STRONG.
    /// Default: [0.15, 0.30, 0.50, 0.75].
    pub level_thresholds: Option<[f64; 4]>,
}

impl VarianceConfig {
    pub fn effective_min_active_factors(&self) -> usize {
        self.min_active_factors.unwrap_or(defaults::DEFAULT_MIN_ACTIVE_FACTORS)
    }

    pub fn effective_outlier_z_threshold(&self) -> f64 {
        self.outlier_z_threshold.unwrap_or(defaults::DEFAULT_OUTLIER_Z_THRESHOLD)
    }

    pub fn effective_level_thresholds(&self) -> [f64; 4] {
        self.level_thresholds.unwrap_or([
            defaults::DEFAULT_CONSENSUS_CV,
            defaults::DEFAULT_MILD_CV,
            defaults::DEFAULT_MODERATE_CV,
            defaults::DEFAULT_STRONG_CV,
        ])
    }

    pub(crate) fn merge(&mut self, other: &Self) {
        super::merge_option(&mut self.min_active_factors, &other.min_active_factors);
        super::merge_option(&mut self.outlier_z_threshold, &other.outlier_z_threshold);
        super::merge_option(&mut self.level_thresholds, &other.level_thresholds);
    }
}
