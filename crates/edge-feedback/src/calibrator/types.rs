//! Calibrator outputs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::{CalibrationFactors, HitCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalibrationQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    InsufficientData,
}

impl CalibrationQuality {
    pub fn name(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }

    /// Grade a mean absolute calibration error.
    pub fn from_mean_error(error: f64) -> Self {
        if error < 0.05 {
            Self::Excellent
        } else if error < 0.10 {
            Self::Good
        } else if error < 0.15 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for CalibrationQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Multipliers that made up a calibration. Absent entries did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationComponents {
    pub global: f64,
    pub week: Option<f64>,
    pub prediction_type: Option<f64>,
    pub edge: Option<f64>,
}

impl CalibrationComponents {
    pub fn total(&self) -> f64 {
        [self.week, self.prediction_type, self.edge]
            .into_iter()
            .flatten()
            .fold(self.global, |acc, m| acc * m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationMetrics {
    pub historical_accuracy: f64,
    pub sample_size: u64,
    pub calibration_quality: CalibrationQuality,
}

/// Result of `calibrate_confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    pub raw_confidence: f64,
    pub calibrated_confidence: f64,
    pub adjustment_factor: f64,
    pub components: CalibrationComponents,
    pub metrics: CalibrationMetrics,
    pub explanation: String,
}

/// A bucket whose observed accuracy is off its midpoint by more than the
/// flag threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketAdjustment {
    pub bucket: String,
    pub expected: f64,
    pub actual: f64,
    pub adjustment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationIssue {
    Overconfidence,
    Underconfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalCorrection {
    pub issue: CalibrationIssue,
    /// Multiplied into the running global adjustment.
    pub adjustment: f64,
    pub scaling: f64,
}

/// How a factor's magnitude split between correct and incorrect calls.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorPredictivePower {
    pub correct_sum: f64,
    pub incorrect_sum: f64,
    pub total: u64,
    pub predictive_power: f64,
}

/// Summary of one `update_calibration` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationUpdate {
    pub predictions_processed: usize,
    /// Hits in this batch only, by bucket label.
    pub accuracy_by_confidence: BTreeMap<String, HitCount>,
    pub bucket_adjustments: Vec<BucketAdjustment>,
    pub global_correction: Option<GlobalCorrection>,
    pub factor_performance: BTreeMap<String, FactorPredictivePower>,
    /// False when the state could not be saved; the in-memory state still
    /// reflects the update.
    pub persisted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub total_predictions: u64,
    pub overall_accuracy: f64,
    pub calibration_quality: CalibrationQuality,
    pub confidence_buckets: BTreeMap<String, HitCount>,
    pub current_adjustments: CalibrationFactors,
    pub factor_weights: BTreeMap<String, f64>,
    pub last_updated: String,
}
