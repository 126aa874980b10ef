//! Adaptive calibrator configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Samples a bucket or prediction type needs before it adjusts
    /// confidence. Default: 10.
    pub min_samples_for_adjustment: Option<u32>,
    /// Lowest calibrated confidence. Default: 0.15.
    pub confidence_floor: Option<f64>,
    /// Highest calibrated confidence. Default: 0.85.
    pub confidence_ceiling: Option<f64>,
}

impl CalibrationConfig {
    pub fn effective_min_samples(&self) -> u32 {
        self.min_samples_for_adjustment
            .unwrap_or(defaults::DEFAULT_CALIBRATION_MIN_SAMPLES)
    }

    pub fn effective_confidence_floor(&self) -> f64 {
        self.confidence_floor.unwrap_or(defaults::DEFAULT_CALIBRATION_FLOOR)
    }

    pub fn effective_confidence_ceiling(&self) -> f64 {
        self.confidence_ceiling.unwrap_or(defaults::DEFAULT_CALIBRATION_CEILING)
    }

    pub(crate) fn merge(&mut self, other: &Self) {
        super::merge_option(
            &mut self.min_samples_for_adjustment,
            &other.min_samples_for_adjustment,
        );
        super::merge_option(&mut self.confidence_floor, &other.confidence_floor);
        super::merge_option(&mut self.confidence_ceiling, &other.confidence_ceiling);
    }
}
