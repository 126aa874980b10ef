use std::collections::BTreeMap;

use edge_core::types::{GameContext, PredictionType};
use serde::{Deserialize, Serialize};

use super::state::{ConferenceGroup, FactorPerformance, Multipliers, SeasonPhase};

/// Week assumed when the game carries none.
pub const DEFAULT_CONTEXT_WEEK: u32 = 4;

/// What the weighter needs to know about a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightContext {
    pub week: Option<u32>,
    pub prediction_type: Option<PredictionType>,
    pub home_conference: Option<ConferenceGroup>,
    pub away_conference: Option<ConferenceGroup>,
}

impl WeightContext {
    pub fn for_game(context: &GameContext, prediction_type: PredictionType) -> Self {
        Self {
            week: context.week,
            prediction_type: Some(prediction_type),
            home_conference: context.home_team_data.as_ref().map(ConferenceGroup::from_team),
            away_conference: context.away_team_data.as_ref().map(ConferenceGroup::from_team),
        }
    }

    pub fn season_phase(&self) -> SeasonPhase {
        SeasonPhase::from_week(self.week.unwrap_or(DEFAULT_CONTEXT_WEEK))
    }

    pub fn effective_prediction_type(&self) -> PredictionType {
        self.prediction_type.unwrap_or(PredictionType::ConsensusAlignment)
    }

    /// Home conference, falling back to away.
    pub fn conference(&self) -> Option<ConferenceGroup> {
        self.home_conference.or(self.away_conference)
    }
}

/// Summary of one `update_weights_from_results` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightUpdate {
    pub predictions_processed: usize,
    /// Proposed new base weights that passed the stability gate.
    pub weight_changes: BTreeMap<String, f64>,
    pub performance_metrics: BTreeMap<String, FactorPerformance>,
    pub adjustment_applied: bool,
    pub persisted: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightAnalysisReport {
    pub current_base_weights: BTreeMap<String, f64>,
    pub seasonal_adjustments: BTreeMap<SeasonPhase, Multipliers>,
    pub conference_adjustments: BTreeMap<ConferenceGroup, Multipliers>,
    pub prediction_type_weights: BTreeMap<PredictionType, Multipliers>,
    pub performance_tracking: BTreeMap<String, FactorPerformance>,
    pub total_predictions: u64,
    pub last_updated: String,
}
