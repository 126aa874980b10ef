//! Shared fixtures for edge-engine integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use edge_analysis::VarianceDetector;
use edge_core::config::{
    CalibrationConfig, EngineConfig, RegistryConfig, VarianceConfig, WeightingConfig,
};
use edge_core::errors::FactorError;
use edge_core::types::{
    ConfidenceReading, FactorConfidence, FactorProfile, FactorType, GameContext, OutputRange,
};
use edge_core::Factor;
use edge_engine::PredictionEngine;
use edge_factors::FactorRegistry;
use edge_feedback::calibrator::CalibrationState;
use edge_feedback::weighter::WeightState;
use edge_feedback::{AdaptiveCalibrator, DynamicWeighter, MemoryStore};

/// Factor returning a fixed value at high confidence.
pub struct Fixed {
    profile: FactorProfile,
    value: f64,
}

impl Fixed {
    pub fn new(name: &str, factor_type: FactorType, weight: f64, value: f64) -> Self {
        Self {
            profile: FactorProfile::new(name)
                .category("statistical")
                .factor_type(factor_type)
                .weight(weight)
                .activation_threshold(0.0),
            value,
        }
    }
}

impl Factor for Fixed {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn profile(&self) -> FactorProfile {
        self.profile.clone()
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(5.0)
    }

    fn calculate(&self, _: &str, _: &str, _: Option<&GameContext>) -> Result<f64, FactorError> {
        Ok(self.value)
    }

    fn calculate_with_confidence(
        &self,
        home: &str,
        away: &str,
        context: Option<&GameContext>,
    ) -> Result<ConfidenceReading, FactorError> {
        let value = self.calculate(home, away, context)?;
        Ok(ConfidenceReading::new(value, FactorConfidence::High, vec![]))
    }
}

pub struct Harness {
    pub engine: PredictionEngine,
    pub calibration: Arc<MemoryStore<CalibrationState>>,
    pub weights: Arc<MemoryStore<WeightState>>,
}

/// Engine over three home-leaning fixed factors with in-memory state.
pub fn abc_engine() -> Harness {
    let factors: Vec<Box<dyn Factor>> = vec![
        Box::new(Fixed::new("A", FactorType::Primary, 0.5, 4.0)),
        Box::new(Fixed::new("B", FactorType::Secondary, 0.3, 3.0)),
        Box::new(Fixed::new("C", FactorType::Secondary, 0.2, 5.0)),
    ];
    let registry = FactorRegistry::with_factors(factors, &RegistryConfig::default()).unwrap();
    let calibration = Arc::new(MemoryStore::new());
    let weights = Arc::new(MemoryStore::new());
    let engine = PredictionEngine::new(
        registry,
        VarianceDetector::new(&VarianceConfig::default()),
        AdaptiveCalibrator::new(&CalibrationConfig::default(), Box::new(Arc::clone(&calibration))),
        DynamicWeighter::new(&WeightingConfig::default(), Box::new(Arc::clone(&weights))),
        &EngineConfig::default(),
    );
    Harness {
        engine,
        calibration,
        weights,
    }
}

pub fn market_context(spread: Option<f64>) -> GameContext {
    GameContext {
        vegas_spread: spread,
        week: Some(6),
        data_quality: Some(0.8),
        ..Default::default()
    }
}
