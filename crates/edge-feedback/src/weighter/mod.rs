//! Dynamic factor weighter.
//!
//! Starts from persisted base weights and layers seasonal, conference,
//! prediction-type and tracked-performance multipliers on top. Settled
//! results retune the base weights, but only when enough factors move by a
//! significant amount.

pub mod state;
pub mod types;

pub use state::{ConferenceGroup, FactorPerformance, Multipliers, SeasonPhase, WeightState};
pub use types::{WeightAnalysisReport, WeightContext, WeightUpdate, DEFAULT_CONTEXT_WEEK};

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use edge_core::config::defaults::DEFAULT_PERFORMANCE_MIN_SAMPLES;
use edge_core::config::WeightingConfig;
use edge_core::tracing::metrics as fields;
use edge_core::types::{GameResult, PredictionRecord};
use tracing::{debug, error, info, warn};

use crate::matching::{match_predictions, MatchedPrediction};
use crate::store::{timestamp_now, StateStore};

/// Weight assumed for a factor that has no base weight yet.
const UNSEEN_FACTOR_WEIGHT: f64 = 0.1;

/// Scale `weights` to sum to 1.0. A non-positive sum gives an equal split.
pub fn normalize_weights(weights: &mut BTreeMap<String, f64>) {
    if weights.is_empty() {
        return;
    }
    let total: f64 = weights.values().sum();
    if total > 0.0 && total.is_finite() {
        weights.values_mut().for_each(|w| *w /= total);
    } else {
        let equal = 1.0 / weights.len() as f64;
        weights.values_mut().for_each(|w| *w = equal);
    }
}

/// Multiplier from tracked accuracy and predictive power.
pub fn performance_multiplier(perf: &FactorPerformance) -> f64 {
    let base = if perf.accuracy > 0.6 {
        1.0 + (perf.accuracy - 0.5) * 0.4
    } else if perf.accuracy < 0.4 {
        0.7 + perf.accuracy * 0.6
    } else {
        1.0
    };
    base * (1.0 + perf.predictive_power * 0.2)
}

fn apply_multipliers(weights: &mut BTreeMap<String, f64>, multipliers: Option<&Multipliers>) {
    for (name, m) in multipliers.into_iter().flatten() {
        if let Some(w) = weights.get_mut(name) {
            *w *= m;
        }
    }
}

pub struct DynamicWeighter {
    state: Mutex<WeightState>,
    store: Box<dyn StateStore<WeightState>>,
    learning_rate: f64,
    min_samples: usize,
    stability_threshold: f64,
    min_qualifying: usize,
    weight_bounds: (f64, f64),
}

impl std::fmt::Debug for DynamicWeighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicWeighter")
            .field("store", &self.store.location())
            .field("learning_rate", &self.learning_rate)
            .field("min_samples", &self.min_samples)
            .finish()
    }
}

impl DynamicWeighter {
    /// Load state from `store`, falling back to the seeded tables when
    /// nothing is stored or the stored document cannot be read.
    pub fn new(config: &WeightingConfig, store: Box<dyn StateStore<WeightState>>) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => {
                info!({ fields::STATE_LOCATION } = %store.location(), "loaded weight state");
                state
            }
            Ok(None) => WeightState::default(),
            Err(e) => {
                warn!(
                    { fields::STATE_LOCATION } = %store.location(),
                    error = %e,
                    "weight state unreadable, starting fresh"
                );
                WeightState::default()
            }
        };
        Self {
            state: Mutex::new(state),
            store,
            learning_rate: config.effective_learning_rate(),
            min_samples: config.effective_min_samples(),
            stability_threshold: config.effective_stability_threshold(),
            min_qualifying: config.effective_min_qualifying_factors(),
            weight_bounds: config.effective_weight_bounds(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WeightState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> WeightState {
        self.lock().clone()
    }

    /// Weights for one game, summing to 1.0.
    pub fn get_optimized_weights(&self, context: &WeightContext) -> BTreeMap<String, f64> {
        let state = self.lock();
        let mut weights = state.base_weights.clone();

        apply_multipliers(&mut weights, state.seasonal_adjustments.get(&context.season_phase()));
        if let Some(conference) = context.conference() {
            apply_multipliers(&mut weights, state.conference_adjustments.get(&conference));
        }
        apply_multipliers(
            &mut weights,
            state.prediction_type_weights.get(&context.effective_prediction_type()),
        );
        for (name, w) in weights.iter_mut() {
            if let Some(perf) = state
                .performance_tracking
                .get(name)
                .filter(|p| p.sample_size >= DEFAULT_PERFORMANCE_MIN_SAMPLES)
            {
                *w *= performance_multiplier(perf);
            }
        }

        normalize_weights(&mut weights);
        debug!(factors = weights.len(), "optimized weights computed");
        weights
    }

    /// Retune base weights from settled results.
    pub fn update_weights_from_results(
        &self,
        predictions: &[PredictionRecord],
        results: &[GameResult],
    ) -> WeightUpdate {
        let matched = match_predictions(predictions, results);
        let mut update = WeightUpdate {
            predictions_processed: matched.len(),
            ..WeightUpdate::default()
        };

        if matched.len() < self.min_samples {
            let message = format!("Need {} samples, got {}", self.min_samples, matched.len());
            info!({ fields::PREDICTIONS_PROCESSED } = matched.len(), "weight update rejected: {message}");
            update.message = Some(message);
            return update;
        }

        let performance = analyze_performance(&matched);
        let mut state = self.lock();
        let changes = self.candidate_weights(&state.base_weights, &performance);
        update.performance_metrics = performance;
        update.weight_changes = changes;

        if update.weight_changes.len() < self.min_qualifying {
            info!(
                { fields::QUALIFYING_CHANGES } = update.weight_changes.len(),
                "weight update rejected: changes below significance threshold"
            );
            update.message = Some("Weight changes below significance threshold".to_string());
            return update;
        }

        for (name, new_weight) in &update.weight_changes {
            let old = state
                .base_weights
                .insert(name.clone(), *new_weight)
                .unwrap_or(UNSEEN_FACTOR_WEIGHT);
            info!(factor = %name, old, new = *new_weight, "adjusted factor weight");
        }
        normalize_weights(&mut state.base_weights);
        state
            .performance_tracking
            .extend(update.performance_metrics.iter().map(|(k, v)| (k.clone(), *v)));
        state.total_predictions += matched.len() as u64;
        state.last_updated = timestamp_now();

        update.adjustment_applied = true;
        update.persisted = match self.store.save(&*state) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    { fields::STATE_LOCATION } = %self.store.location(),
                    error = %e,
                    "failed to save weight state"
                );
                false
            }
        };
        info!(
            { fields::QUALIFYING_CHANGES } = update.weight_changes.len(),
            persisted = update.persisted,
            "applied dynamic weight adjustments"
        );
        update
    }

    fn candidate_weights(
        &self,
        base: &BTreeMap<String, f64>,
        performance: &BTreeMap<String, FactorPerformance>,
    ) -> BTreeMap<String, f64> {
        let (lo, hi) = self.weight_bounds;
        performance
            .iter()
            .filter(|(_, p)| p.sample_size as usize >= self.min_samples)
            .filter_map(|(name, p)| {
                let current = base.get(name).copied().unwrap_or(UNSEEN_FACTOR_WEIGHT);
                let step = ((p.accuracy - 0.5) * 2.0 + p.predictive_power * 0.5) * self.learning_rate;
                let candidate = (current * (1.0 + step)).clamp(lo, hi);
                ((candidate - current).abs() > current * self.stability_threshold)
                    .then(|| (name.clone(), candidate))
            })
            .collect()
    }

    pub fn get_weight_analysis_report(&self) -> WeightAnalysisReport {
        let state = self.lock();
        WeightAnalysisReport {
            current_base_weights: state.base_weights.clone(),
            seasonal_adjustments: state.seasonal_adjustments.clone(),
            conference_adjustments: state.conference_adjustments.clone(),
            prediction_type_weights: state.prediction_type_weights.clone(),
            performance_tracking: state.performance_tracking.clone(),
            total_predictions: state.total_predictions,
            last_updated: state.last_updated.clone(),
        }
    }
}

#[derive(Default)]
struct FactorTally {
    correct: u32,
    total: u32,
    correct_sum: f64,
    incorrect_sum: f64,
}

fn analyze_performance(matched: &[MatchedPrediction<'_>]) -> BTreeMap<String, FactorPerformance> {
    let mut tallies: BTreeMap<String, FactorTally> = BTreeMap::new();
    for m in matched {
        for (name, snapshot) in &m.prediction.factor_breakdown {
            let t = tallies.entry(name.clone()).or_default();
            let magnitude = snapshot.value.abs();
            t.total += 1;
            if m.correct {
                t.correct += 1;
                t.correct_sum += magnitude;
            } else {
                t.incorrect_sum += magnitude;
            }
        }
    }

    tallies
        .into_iter()
        .map(|(name, t)| {
            let accuracy = if t.total > 0 {
                f64::from(t.correct) / f64::from(t.total)
            } else {
                0.5
            };
            let avg_correct = t.correct_sum / f64::from(t.correct.max(1));
            let avg_incorrect = t.incorrect_sum / f64::from((t.total - t.correct).max(1));
            let predictive_power = (avg_correct - avg_incorrect) / (avg_correct + avg_incorrect).max(1.0);
            let perf = FactorPerformance {
                accuracy,
                predictive_power,
                sample_size: t.total,
                avg_factor_magnitude: (t.correct_sum + t.incorrect_sum) / f64::from(t.total.max(1)),
            };
            (name, perf)
        })
        .collect()
}
