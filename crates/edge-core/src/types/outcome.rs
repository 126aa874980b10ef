//! Historical outcome feeds consumed by the feedback loops.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PredictionType;

/// Confidence assumed for a prediction that does not carry one (0–100 scale).
pub const DEFAULT_PREDICTION_CONFIDENCE: f64 = 50.0;

/// A factor's contribution as recorded in a past prediction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorSnapshot {
    pub value: f64,
}

/// A prediction as it was made, before the game was played.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionRecord {
    pub home_team: String,
    pub away_team: String,
    /// Stated confidence on a 0–100 scale.
    pub confidence: Option<f64>,
    pub predicted_edge: Option<f64>,
    pub prediction_type: Option<PredictionType>,
    pub week: Option<u32>,
    pub factor_breakdown: BTreeMap<String, FactorSnapshot>,
}

impl PredictionRecord {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            ..Self::default()
        }
    }

    /// Confidence on a 0–1 scale, defaulting to 0.5.
    pub fn confidence_fraction(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_PREDICTION_CONFIDENCE) / 100.0
    }

    /// Same game as `result`: exact, case-insensitive home and away names.
    pub fn matches(&self, result: &GameResult) -> bool {
        self.home_team.to_uppercase() == result.home_team.to_uppercase()
            && self.away_team.to_uppercase() == result.away_team.to_uppercase()
    }
}

/// The settled outcome of a predicted game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameResult {
    pub home_team: String,
    pub away_team: String,
    pub prediction_correct: bool,
}

impl GameResult {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>, correct: bool) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            prediction_correct: correct,
        }
    }
}
