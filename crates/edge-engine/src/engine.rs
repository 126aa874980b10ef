//! The prediction engine.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use edge_analysis::VarianceDetector;
use edge_core::config::{EdgeConfig, EngineConfig};
use edge_core::tracing::metrics as fields;
use edge_core::traits::validate_matchup;
use edge_core::types::{GameContext, GameResult, PredictionRecord};
use edge_core::EdgeResult;
use edge_factors::{
    ConfigurationReport, ExecutionStats, FactorRegistry, FactorValidator, ValidationReport,
};
use edge_feedback::{
    AdaptiveCalibrator, CalibrationUpdate, DynamicWeighter, JsonFileStore, WeightContext,
    WeightUpdate,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::edge_detector::{EdgeDetector, EdgeSignal};
use crate::prediction::{raw_confidence, ContrarianCall, EdgeTier, Prediction};

/// Counters over every `predict` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStats {
    pub total_predictions: u64,
    pub successful_predictions: u64,
    pub failed_predictions: u64,
    pub registry: ExecutionStats,
}

impl EngineStats {
    pub fn success_rate(&self) -> f64 {
        self.successful_predictions as f64 / self.total_predictions.max(1) as f64
    }

    pub fn failure_rate(&self) -> f64 {
        self.failed_predictions as f64 / self.total_predictions.max(1) as f64
    }
}

/// What both feedback loops did with one batch of settled games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeUpdate {
    pub calibration: CalibrationUpdate,
    pub weights: WeightUpdate,
}

pub struct PredictionEngine {
    registry: FactorRegistry,
    variance: VarianceDetector,
    calibrator: AdaptiveCalibrator,
    weighter: DynamicWeighter,
    detector: EdgeDetector,
    min_edge: f64,
    type_thresholds: (f64, f64, f64),
    total_predictions: AtomicU64,
    successful_predictions: AtomicU64,
    failed_predictions: AtomicU64,
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("registry", &self.registry)
            .field("calibrator", &self.calibrator)
            .field("weighter", &self.weighter)
            .field("detector", &self.detector)
            .field("min_edge", &self.min_edge)
            .finish()
    }
}

impl PredictionEngine {
    pub fn new(
        registry: FactorRegistry,
        variance: VarianceDetector,
        calibrator: AdaptiveCalibrator,
        weighter: DynamicWeighter,
        config: &EngineConfig,
    ) -> Self {
        info!({ fields::FACTOR_COUNT } = registry.len(), "prediction engine initialized");
        Self {
            registry,
            variance,
            calibrator,
            weighter,
            detector: EdgeDetector::new(config),
            min_edge: config.effective_min_edge(),
            type_thresholds: config.effective_type_thresholds(),
            total_predictions: AtomicU64::new(0),
            successful_predictions: AtomicU64::new(0),
            failed_predictions: AtomicU64::new(0),
        }
    }

    /// Build every component from `config`, persisting feedback state in
    /// JSON files under `root`.
    pub fn from_config(config: &EdgeConfig, root: &Path) -> EdgeResult<Self> {
        let registry = FactorRegistry::new(&config.registry)?;
        let calibrator = AdaptiveCalibrator::new(
            &config.calibration,
            Box::new(JsonFileStore::new(config.storage.effective_calibration_path(root))),
        );
        let weighter = DynamicWeighter::new(
            &config.weighting,
            Box::new(JsonFileStore::new(config.storage.effective_weights_path(root))),
        );
        Ok(Self::new(
            registry,
            VarianceDetector::new(&config.variance),
            calibrator,
            weighter,
            &config.engine,
        ))
    }

    pub fn registry(&self) -> &FactorRegistry {
        &self.registry
    }

    pub fn calibrator(&self) -> &AdaptiveCalibrator {
        &self.calibrator
    }

    pub fn weighter(&self) -> &DynamicWeighter {
        &self.weighter
    }

    /// Predict one matchup. Never panics; an invalid matchup yields a
    /// `Prediction` with `error` set.
    pub fn predict(&self, home_team: &str, away_team: &str, context: Option<&GameContext>) -> Prediction {
        self.total_predictions.fetch_add(1, Ordering::Relaxed);
        let week = context.and_then(|c| c.week);

        if let Err(e) = validate_matchup(home_team, away_team) {
            warn!(home_team, away_team, error = %e, "prediction rejected");
            self.failed_predictions.fetch_add(1, Ordering::Relaxed);
            return Prediction::failed(home_team, away_team, week, e.to_string());
        }

        let analysis = self.registry.calculate_all_factors(home_team, away_team, context);
        let summary = &analysis.summary;
        let spread = context.and_then(GameContext::current_spread);
        let call = ContrarianCall::new(spread, summary.total_adjustment, self.min_edge, self.type_thresholds);

        let data_quality = context.and_then(|c| c.data_quality).unwrap_or(0.0);
        let raw = raw_confidence(
            data_quality,
            summary.factors_successful,
            summary.factors_calculated,
            call.edge_size,
        );
        let calibration = self.calibrator.calibrate_confidence(
            raw,
            call.prediction_type,
            call.edge_size.unwrap_or(0.0),
            week,
        );
        let edge = self.detector.detect(&EdgeSignal {
            home_team,
            away_team,
            vegas_spread: spread,
            contrarian_spread: call.contrarian_spread,
            edge_size: call.edge_size,
            edge_direction: call.edge_direction,
            confidence: calibration.calibrated_confidence,
            data_quality,
            category_adjustments: Some(&summary.category_adjustments),
        });
        let variance = self.variance.analyze_factor_variance(&analysis);

        let weight_context = match context {
            Some(ctx) => WeightContext::for_game(ctx, call.prediction_type),
            None => WeightContext {
                prediction_type: Some(call.prediction_type),
                ..WeightContext::default()
            },
        };
        let optimized_weights = self.weighter.get_optimized_weights(&weight_context);

        info!(
            home_team,
            away_team,
            { fields::TOTAL_ADJUSTMENT } = summary.total_adjustment,
            prediction_type = %call.prediction_type,
            edge_type = %edge.edge_type,
            confidence = calibration.calibrated_confidence,
            "prediction generated"
        );
        self.successful_predictions.fetch_add(1, Ordering::Relaxed);

        Prediction {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            week,
            timestamp: chrono::Utc::now().to_rfc3339(),
            vegas_spread: spread,
            contrarian_spread: call.contrarian_spread,
            edge_size: call.edge_size,
            edge_direction: call.edge_direction,
            has_edge: call.has_edge,
            prediction_type: Some(call.prediction_type),
            edge_tier: EdgeTier::from_edge(call.edge_size),
            edge_classification: Some(edge),
            total_adjustment: summary.total_adjustment,
            multiplicative_adjustment: summary.multiplicative_adjustment,
            data_quality,
            recommendation: call.recommendation(home_team, away_team),
            raw_confidence: raw,
            confidence: calibration.calibrated_confidence,
            calibration: Some(calibration),
            variance: Some(variance),
            factor_analysis: Some(analysis),
            optimized_weights,
            error: None,
        }
    }

    /// Feed settled games to both feedback loops.
    pub fn record_outcomes(&self, predictions: &[PredictionRecord], results: &[GameResult]) -> OutcomeUpdate {
        OutcomeUpdate {
            calibration: self.calibrator.update_calibration(predictions, results),
            weights: self.weighter.update_weights_from_results(predictions, results),
        }
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_predictions: self.total_predictions.load(Ordering::Relaxed),
            successful_predictions: self.successful_predictions.load(Ordering::Relaxed),
            failed_predictions: self.failed_predictions.load(Ordering::Relaxed),
            registry: self.registry.execution_stats(),
        }
    }

    pub fn validate_setup(&self) -> ConfigurationReport {
        self.registry.validate_configuration()
    }

    /// Output-quality checks over every registered factor.
    pub fn validate_factors(&self) -> ValidationReport {
        FactorValidator::new().validate_all_factors(&self.registry)
    }
}
