//! Adaptive confidence calibrator.
//!
//! Tracks hit rates per confidence bucket and per prediction type, and
//! rescales raw confidence so that stated confidence tracks observed
//! accuracy. State is loaded once at construction and persisted after
//! every update.

pub mod state;
pub mod types;

pub use state::{bucket_for, bucket_midpoint, CalibrationFactors, CalibrationState, HitCount, BUCKETS};
pub use types::{
    BucketAdjustment, CalibrationComponents, CalibrationIssue, CalibrationMetrics,
    CalibrationOutcome, CalibrationQuality, CalibrationReport, CalibrationUpdate,
    FactorPredictivePower, GlobalCorrection,
};

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use edge_core::config::defaults::{DEFAULT_BUCKET_ERROR_FLAG, DEFAULT_QUALITY_MIN_PREDICTIONS};
use edge_core::config::CalibrationConfig;
use edge_core::tracing::metrics as fields;
use edge_core::types::{GameResult, PredictionRecord, PredictionType};
use statrs::statistics::Statistics;
use tracing::{error, info, warn};

use crate::matching::{match_predictions, MatchedPrediction};
use crate::store::{timestamp_now, StateStore};

/// Buckets need more than this many samples to count toward quality.
const QUALITY_BUCKET_MIN_SAMPLES: u64 = 5;
const PENALTY_PIVOT: f64 = 0.65;
const OVERCONFIDENCE_PENALTY: f64 = 0.05;
const SMALL_EDGE: f64 = 1.0;
const LARGE_EDGE: f64 = 4.0;
const MINIMAL_CHANGE: f64 = 0.02;
const SIGNIFICANT_PREDICTIVE_POWER: f64 = 0.1;
const FACTOR_WEIGHT_BOUNDS: (f64, f64) = (0.5, 1.5);

/// Multiplier for an observed accuracy.
pub fn accuracy_adjustment(accuracy: f64) -> f64 {
    if accuracy < 0.35 {
        0.75
    } else if accuracy < 0.45 {
        0.85
    } else if accuracy < 0.55 {
        1.0
    } else if accuracy < 0.65 {
        1.1
    } else {
        1.2
    }
}

pub struct AdaptiveCalibrator {
    state: Mutex<CalibrationState>,
    store: Box<dyn StateStore<CalibrationState>>,
    min_samples: u32,
    floor: f64,
    ceiling: f64,
}

impl std::fmt::Debug for AdaptiveCalibrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveCalibrator")
            .field("store", &self.store.location())
            .field("min_samples", &self.min_samples)
            .field("bounds", &(self.floor, self.ceiling))
            .finish()
    }
}

impl AdaptiveCalibrator {
    /// Load state from `store`, falling back to a fresh state when nothing
    /// is stored or the stored document cannot be read.
    pub fn new(config: &CalibrationConfig, store: Box<dyn StateStore<CalibrationState>>) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => {
                info!({ fields::STATE_LOCATION } = %store.location(), "loaded calibration state");
                state
            }
            Ok(None) => CalibrationState::default(),
            Err(e) => {
                warn!(
                    { fields::STATE_LOCATION } = %store.location(),
                    error = %e,
                    "calibration state unreadable, starting fresh"
                );
                CalibrationState::default()
            }
        };
        Self {
            state: Mutex::new(state),
            store,
            min_samples: config.effective_min_samples(),
            floor: config.effective_confidence_floor(),
            ceiling: config.effective_confidence_ceiling(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CalibrationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CalibrationState {
        self.lock().clone()
    }

    /// Calibrate a raw 0–1 confidence. The result always lies within the
    /// configured bounds (default [0.15, 0.85]).
    pub fn calibrate_confidence(
        &self,
        raw_confidence: f64,
        prediction_type: PredictionType,
        edge_size: f64,
        week: Option<u32>,
    ) -> CalibrationOutcome {
        let state = self.lock();
        let factors = &state.calibration_factors;

        let week_adj = state.week_adjustment(week);
        let type_adj = state
            .prediction_type_performance
            .get(&prediction_type)
            .filter(|p| p.total >= u64::from(self.min_samples))
            .and_then(HitCount::accuracy)
            .map(accuracy_adjustment);
        let edge_adj = if edge_size < SMALL_EDGE {
            Some(0.9)
        } else if edge_size > LARGE_EDGE {
            Some(1.05)
        } else {
            None
        };
        let components = CalibrationComponents {
            global: factors.global_adjustment,
            week: (week_adj != 1.0).then_some(week_adj),
            prediction_type: type_adj,
            edge: edge_adj,
        };
        let total = components.total();

        let mut calibrated = raw_confidence * total;
        if factors.confidence_scaling != 1.0 {
            calibrated = 0.5 + (calibrated - 0.5) * factors.confidence_scaling;
        }
        let penalty = factors.overconfidence_penalty;
        if penalty > 0.0 && calibrated > PENALTY_PIVOT {
            calibrated -= penalty * (calibrated - PENALTY_PIVOT);
        }
        let calibrated = if calibrated.is_finite() {
            calibrated.clamp(self.floor, self.ceiling)
        } else {
            warn!(raw_confidence, "non-finite calibrated confidence, using floor");
            self.floor
        };

        CalibrationOutcome {
            raw_confidence,
            calibrated_confidence: calibrated,
            adjustment_factor: total,
            components,
            metrics: CalibrationMetrics {
                historical_accuracy: state.historical_accuracy(),
                sample_size: state.total_predictions,
                calibration_quality: quality(&state),
            },
            explanation: explanation(raw_confidence, calibrated, total),
        }
    }

    /// Fold settled results into the calibration state and persist it.
    pub fn update_calibration(
        &self,
        predictions: &[PredictionRecord],
        results: &[GameResult],
    ) -> CalibrationUpdate {
        let matched = match_predictions(predictions, results);
        let mut state = self.lock();

        let accuracy_by_confidence = track_accuracy(&mut state, &matched);
        let (bucket_adjustments, global_correction) = bucket_adjustments(&state, self.min_samples);
        let factor_performance = factor_performance(&matched);

        let factors = &mut state.calibration_factors;
        if let Some(correction) = global_correction {
            factors.global_adjustment *= correction.adjustment;
            factors.confidence_scaling = correction.scaling;
            if correction.issue == CalibrationIssue::Overconfidence {
                factors.overconfidence_penalty = OVERCONFIDENCE_PENALTY;
            }
        }
        for (name, perf) in &factor_performance {
            if perf.total < u64::from(self.min_samples) {
                continue;
            }
            let weight = state.factor_weights.entry(name.clone()).or_insert(1.0);
            let (lo, hi) = FACTOR_WEIGHT_BOUNDS;
            if perf.predictive_power > SIGNIFICANT_PREDICTIVE_POWER {
                *weight = (*weight * 1.1).min(hi);
            } else if perf.predictive_power < -SIGNIFICANT_PREDICTIVE_POWER {
                *weight = (*weight * 0.9).max(lo);
            }
        }

        state.last_updated = timestamp_now();
        let persisted = match self.store.save(&*state) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    { fields::STATE_LOCATION } = %self.store.location(),
                    error = %e,
                    "failed to save calibration state"
                );
                false
            }
        };

        info!(
            { fields::PREDICTIONS_PROCESSED } = matched.len(),
            { fields::GLOBAL_ADJUSTMENT } = state.calibration_factors.global_adjustment,
            flagged_buckets = bucket_adjustments.len(),
            persisted,
            "calibration updated"
        );

        CalibrationUpdate {
            predictions_processed: matched.len(),
            accuracy_by_confidence,
            bucket_adjustments,
            global_correction,
            factor_performance,
            persisted,
        }
    }

    pub fn get_calibration_report(&self) -> CalibrationReport {
        let state = self.lock();
        CalibrationReport {
            total_predictions: state.total_predictions,
            overall_accuracy: state.historical_accuracy(),
            calibration_quality: quality(&state),
            confidence_buckets: state.confidence_buckets.clone(),
            current_adjustments: state.calibration_factors.clone(),
            factor_weights: state.factor_weights.clone(),
            last_updated: state.last_updated.clone(),
        }
    }
}

fn track_accuracy(
    state: &mut CalibrationState,
    matched: &[MatchedPrediction<'_>],
) -> BTreeMap<String, HitCount> {
    let mut batch: BTreeMap<String, HitCount> = BTreeMap::new();
    for m in matched {
        let bucket = bucket_for(m.prediction.confidence_fraction());
        batch.entry(bucket.label.to_string()).or_default().record(m.correct);
        state
            .confidence_buckets
            .entry(bucket.label.to_string())
            .or_default()
            .record(m.correct);
        if let Some(prediction_type) = m.prediction.prediction_type {
            state
                .prediction_type_performance
                .entry(prediction_type)
                .or_default()
                .record(m.correct);
        }
    }
    state.total_predictions += matched.len() as u64;
    batch
}

fn bucket_adjustments(
    state: &CalibrationState,
    min_samples: u32,
) -> (Vec<BucketAdjustment>, Option<GlobalCorrection>) {
    let mut flagged = Vec::new();
    let mut errors = Vec::new();
    for (label, hits) in &state.confidence_buckets {
        if hits.total < u64::from(min_samples) {
            continue;
        }
        let Some(actual) = hits.accuracy() else { continue };
        let expected = bucket_midpoint(label);
        let error = actual - expected;
        errors.push(error);
        if error.abs() > DEFAULT_BUCKET_ERROR_FLAG {
            flagged.push(BucketAdjustment {
                bucket: label.clone(),
                expected,
                actual,
                adjustment: accuracy_adjustment(actual),
            });
        }
    }

    let global = (!errors.is_empty()).then(|| errors.iter().mean()).and_then(|mean| {
        if mean < -DEFAULT_BUCKET_ERROR_FLAG {
            Some(GlobalCorrection {
                issue: CalibrationIssue::Overconfidence,
                adjustment: 0.85,
                scaling: 0.8,
            })
        } else if mean > DEFAULT_BUCKET_ERROR_FLAG {
            Some(GlobalCorrection {
                issue: CalibrationIssue::Underconfidence,
                adjustment: 1.15,
                scaling: 1.1,
            })
        } else {
            None
        }
    });
    (flagged, global)
}

fn factor_performance(matched: &[MatchedPrediction<'_>]) -> BTreeMap<String, FactorPredictivePower> {
    let mut out: BTreeMap<String, FactorPredictivePower> = BTreeMap::new();
    for m in matched {
        for (name, snapshot) in &m.prediction.factor_breakdown {
            let perf = out.entry(name.clone()).or_default();
            perf.total += 1;
            if m.correct {
                perf.correct_sum += snapshot.value.abs();
            } else {
                perf.incorrect_sum += snapshot.value.abs();
            }
        }
    }
    for perf in out.values_mut() {
        let half = (perf.total as f64 / 2.0).max(1.0);
        perf.predictive_power = perf.correct_sum / half - perf.incorrect_sum / half;
    }
    out
}

fn quality(state: &CalibrationState) -> CalibrationQuality {
    if state.total_predictions < DEFAULT_QUALITY_MIN_PREDICTIONS {
        return CalibrationQuality::InsufficientData;
    }
    let errors: Vec<f64> = state
        .confidence_buckets
        .iter()
        .filter(|(_, hits)| hits.total > QUALITY_BUCKET_MIN_SAMPLES)
        .filter_map(|(label, hits)| hits.accuracy().map(|a| (a - bucket_midpoint(label)).abs()))
        .collect();
    if errors.is_empty() {
        return CalibrationQuality::InsufficientData;
    }
    CalibrationQuality::from_mean_error(errors.iter().mean())
}

fn explanation(raw: f64, calibrated: f64, adjustment: f64) -> String {
    if (raw - calibrated).abs() < MINIMAL_CHANGE {
        "Minimal calibration adjustment applied.".to_string()
    } else if adjustment < 0.9 {
        format!(
            "Confidence reduced by {:.0}% due to historical overconfidence.",
            (1.0 - adjustment) * 100.0
        )
    } else if adjustment > 1.1 {
        format!(
            "Confidence increased by {:.0}% based on strong historical accuracy.",
            (adjustment - 1.0) * 100.0
        )
    } else {
        "Standard calibration adjustment applied.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn calibrator_with(state: CalibrationState) -> AdaptiveCalibrator {
        AdaptiveCalibrator::new(
            &CalibrationConfig::default(),
            Box::new(MemoryStore::with_state(state)),
        )
    }

    #[test]
    fn test_accuracy_adjustment_steps() {
        assert_eq!(accuracy_adjustment(0.30), 0.75);
        assert_eq!(accuracy_adjustment(0.40), 0.85);
        assert_eq!(accuracy_adjustment(0.50), 1.0);
        assert_eq!(accuracy_adjustment(0.60), 1.1);
        assert_eq!(accuracy_adjustment(0.70), 1.2);
    }

    #[test]
    fn test_fresh_state_only_edge_adjusts() {
        let cal = calibrator_with(CalibrationState::default());
        let out = cal.calibrate_confidence(0.6, PredictionType::SlightContrarian, 0.5, Some(5));
        assert!((out.calibrated_confidence - 0.54).abs() < 1e-12);
        assert_eq!(out.components.edge, Some(0.9));
        assert_eq!(out.components.week, None);
        assert_eq!(out.components.prediction_type, None);
        assert_eq!(out.metrics.calibration_quality, CalibrationQuality::InsufficientData);
        assert_eq!(out.explanation, "Standard calibration adjustment applied.");

        let mid = cal.calibrate_confidence(0.6, PredictionType::SlightContrarian, 2.0, None);
        assert_eq!(mid.calibrated_confidence, 0.6);
        assert_eq!(mid.explanation, "Minimal calibration adjustment applied.");
    }

    #[test]
    fn test_type_and_week_adjustments_compose() {
        let mut state = CalibrationState::default();
        state.calibration_factors.week_adjustments.insert(12, 1.1);
        state.prediction_type_performance.insert(
            PredictionType::StrongContrarian,
            HitCount { correct: 7, total: 10 },
        );
        let cal = calibrator_with(state);
        let out = cal.calibrate_confidence(0.5, PredictionType::StrongContrarian, 5.0, Some(12));
        let expected_total = 1.1 * 1.2 * 1.05;
        assert!((out.adjustment_factor - expected_total).abs() < 1e-12);
        assert!((out.calibrated_confidence - 0.5 * expected_total).abs() < 1e-12);
        assert_eq!(out.explanation, "Confidence increased by 39% based on strong historical accuracy.");
    }

    #[test]
    fn test_scaling_and_penalty_pull_toward_center() {
        let mut state = CalibrationState::default();
        state.calibration_factors.confidence_scaling = 0.8;
        state.calibration_factors.overconfidence_penalty = 0.05;
        let cal = calibrator_with(state);
        let out = cal.calibrate_confidence(0.9, PredictionType::ConsensusAlignment, 2.0, None);
        // 0.5 + 0.4 * 0.8 = 0.82, then 0.82 - 0.05 * 0.17
        assert!((out.calibrated_confidence - (0.82 - 0.05 * 0.17)).abs() < 1e-12);
    }

    #[test]
    fn test_predictive_power_uses_half_total_denominator() {
        let mut winner = PredictionRecord::new("A", "B");
        winner.factor_breakdown.insert("x".into(), edge_core::types::FactorSnapshot { value: -2.0 });
        let mut loser = PredictionRecord::new("C", "D");
        loser.factor_breakdown.insert("x".into(), edge_core::types::FactorSnapshot { value: 1.0 });
        let preds = [winner, loser];
        let results = [GameResult::new("A", "B", true), GameResult::new("C", "D", false)];
        let perf = factor_performance(&match_predictions(&preds, &results));
        assert_eq!(perf["x"].total, 2);
        assert_eq!(perf["x"].predictive_power, 1.0);
    }
}
