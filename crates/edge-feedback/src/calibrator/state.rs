//! Persisted calibration state.

use std::collections::BTreeMap;

use edge_core::types::PredictionType;
use serde::{Deserialize, Serialize};

use crate::store::timestamp_now;

pub const CALIBRATION_STATE_VERSION: &str = "2.0";

/// One confidence band with its expected hit rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBucket {
    pub label: &'static str,
    /// Exclusive upper edge used for bucketing. The top bucket is open.
    pub upper: f64,
    pub midpoint: f64,
}

/// Seven contiguous bands from 0.15 to 0.85. Values below 0.25 fall in the
/// first band and values at or above 0.75 in the last.
pub const BUCKETS: [ConfidenceBucket; 7] = [
    ConfidenceBucket { label: "0.15-0.25", upper: 0.25, midpoint: 0.20 },
    ConfidenceBucket { label: "0.25-0.35", upper: 0.35, midpoint: 0.30 },
    ConfidenceBucket { label: "0.35-0.45", upper: 0.45, midpoint: 0.40 },
    ConfidenceBucket { label: "0.45-0.55", upper: 0.55, midpoint: 0.50 },
    ConfidenceBucket { label: "0.55-0.65", upper: 0.65, midpoint: 0.60 },
    ConfidenceBucket { label: "0.65-0.75", upper: 0.75, midpoint: 0.70 },
    ConfidenceBucket { label: "0.75-0.85", upper: f64::INFINITY, midpoint: 0.80 },
];

/// Bucket for a confidence on the 0–1 scale.
pub fn bucket_for(confidence: f64) -> &'static ConfidenceBucket {
    BUCKETS
        .iter()
        .find(|b| confidence < b.upper)
        .unwrap_or(&BUCKETS[BUCKETS.len() - 1])
}

/// Midpoint for a bucket label; 0.5 for labels outside the table.
pub fn bucket_midpoint(label: &str) -> f64 {
    BUCKETS
        .iter()
        .find(|b| b.label == label)
        .map_or(0.5, |b| b.midpoint)
}

/// Hit counter. `correct <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitCount {
    pub correct: u64,
    pub total: u64,
}

impl HitCount {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn accuracy(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationFactors {
    /// Running product of global corrections.
    pub global_adjustment: f64,
    /// Spread around 0.5; below 1 compresses, above 1 expands.
    pub confidence_scaling: f64,
    pub overconfidence_penalty: f64,
    pub week_adjustments: BTreeMap<u32, f64>,
}

impl Default for CalibrationFactors {
    fn default() -> Self {
        Self {
            global_adjustment: 1.0,
            confidence_scaling: 1.0,
            overconfidence_penalty: 0.0,
            week_adjustments: BTreeMap::new(),
        }
    }
}

const SEEDED_FACTOR_WEIGHTS: [&str; 5] = [
    "coaching_differential",
    "situational_context",
    "momentum_factors",
    "experience_differential",
    "desperation_index",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationState {
    pub version: String,
    pub last_updated: String,
    pub total_predictions: u64,
    pub confidence_buckets: BTreeMap<String, HitCount>,
    pub calibration_factors: CalibrationFactors,
    /// Per-factor multipliers in [0.5, 1.5].
    pub factor_weights: BTreeMap<String, f64>,
    pub prediction_type_performance: BTreeMap<PredictionType, HitCount>,
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self {
            version: CALIBRATION_STATE_VERSION.to_string(),
            last_updated: timestamp_now(),
            total_predictions: 0,
            confidence_buckets: BUCKETS
                .iter()
                .map(|b| (b.label.to_string(), HitCount::default()))
                .collect(),
            calibration_factors: CalibrationFactors::default(),
            factor_weights: SEEDED_FACTOR_WEIGHTS
                .iter()
                .map(|name| (name.to_string(), 1.0))
                .collect(),
            prediction_type_performance: PredictionType::TRACKED
                .iter()
                .map(|t| (*t, HitCount::default()))
                .collect(),
        }
    }
}

impl CalibrationState {
    /// Correct predictions across buckets over all predictions; 0.5 with
    /// no history.
    pub fn historical_accuracy(&self) -> f64 {
        if self.total_predictions == 0 {
            return 0.5;
        }
        let correct: u64 = self.confidence_buckets.values().map(|b| b.correct).sum();
        correct as f64 / self.total_predictions as f64
    }

    /// Week multiplier, 1.0 when none is recorded.
    pub fn week_adjustment(&self, week: Option<u32>) -> f64 {
        week.and_then(|w| self.calibration_factors.week_adjustments.get(&w).copied())
            .unwrap_or(1.0)
    }
}
