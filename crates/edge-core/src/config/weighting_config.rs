//! Dynamic weighter configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeightingConfig {
    /// Step size for weight updates. Default: 0.05.
    pub learning_rate: Option<f64>,
    /// Matched predictions required before any update. Default: 15.
    pub min_samples_for_adjustment: Option<usize>,
    /// Minimum fractional change for an update to count. Default: 0.1.
    pub stability_threshold: Option<f64>,
    /// Qualifying factors required to apply a batch. Default: 3.
    pub min_qualifying_factors: Option<usize>,
    /// Lower clamp for an updated base weight. Default: 0.01.
    pub min_factor_weight: Option<f64>,
    /// Upper clamp for an updated base weight. Default: 0.5.
    pub max_factor_weight: Option<f64>,
}

impl WeightingConfig {
    pub fn effective_learning_rate(&self) -> f64 {
        self.learning_rate.unwrap_or(defaults::DEFAULT_LEARNING_RATE)
    }

    pub fn effective_min_samples(&self) -> usize {
        self.min_samples_for_adjustment
            .unwrap_or(defaults::DEFAULT_WEIGHTING_MIN_SAMPLES)
    }

    pub fn effective_stability_threshold(&self) -> f64 {
        self.stability_threshold
            .unwrap_or(defaults::DEFAULT_STABILITY_THRESHOLD)
    }

    pub fn effective_min_qualifying_factors(&self) -> usize {
        self.min_qualifying_factors
            .unwrap_or(defaults::DEFAULT_MIN_QUALIFYING_FACTORS)
    }

    pub fn effective_weight_bounds(&self) -> (f64, f64) {
        (
            self.min_factor_weight.unwrap_or(defaults::DEFAULT_MIN_FACTOR_WEIGHT),
            self.max_factor_weight.unwrap_or(defaults::DEFAULT_MAX_FACTOR_WEIGHT),
        )
    }

    pub(crate) fn merge(&mut self, other: &Self) {
        super::merge_option(&mut self.learning_rate, &other.learning_rate);
        super::merge_option(
            &mut self.min_samples_for_adjustment,
            &other.min_samples_for_adjustment,
        );
        super::merge_option(&mut self.stability_threshold, &other.stability_threshold);
        super::merge_option(&mut self.min_qualifying_factors, &other.min_qualifying_factors);
        super::merge_option(&mut self.min_factor_weight, &other.min_factor_weight);
        super::merge_option(&mut self.max_factor_weight, &other.max_factor_weight);
    }
}
