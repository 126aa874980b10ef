//! Persisted weight state and the seeded adjustment tables.

use std::collections::BTreeMap;

use edge_core::types::{PredictionType, TeamData};
use serde::{Deserialize, Serialize};

use crate::store::timestamp_now;

pub const WEIGHT_STATE_VERSION: &str = "2.0";

/// Part of the season a week falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeasonPhase {
    #[serde(rename = "early_season")]
    Early,
    #[serde(rename = "mid_season")]
    Mid,
    #[serde(rename = "late_season")]
    Late,
}

impl SeasonPhase {
    /// Weeks 1–3 are early, 12 and later are late.
    pub fn from_week(week: u32) -> Self {
        if week <= 3 {
            Self::Early
        } else if week >= 12 {
            Self::Late
        } else {
            Self::Mid
        }
    }
}

/// Conference families with their own weight tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConferenceGroup {
    #[serde(rename = "SEC")]
    Sec,
    #[serde(rename = "BIG_TEN")]
    BigTen,
    #[serde(rename = "BIG_12")]
    Big12,
    #[serde(rename = "ACC")]
    Acc,
    #[serde(rename = "PAC_12")]
    Pac12,
    #[serde(rename = "OTHER")]
    Other,
}

impl ConferenceGroup {
    /// Map a conference name by substring, checked in table order.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_uppercase();
        if name.contains("SEC") {
            Self::Sec
        } else if name.contains("BIG TEN") || name.contains("BIG 10") {
            Self::BigTen
        } else if name.contains("BIG 12") {
            Self::Big12
        } else if name.contains("ACC") {
            Self::Acc
        } else if name.contains("PAC") {
            Self::Pac12
        } else {
            Self::Other
        }
    }

    /// A team without conference info maps to `Other`.
    pub fn from_team(team: &TeamData) -> Self {
        let name = team
            .info
            .as_ref()
            .and_then(|i| i.conference.as_ref())
            .map_or("", |c| c.name.as_str());
        Self::from_name(name)
    }
}

/// Observed performance of one factor from a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorPerformance {
    pub accuracy: f64,
    pub predictive_power: f64,
    pub sample_size: u32,
    pub avg_factor_magnitude: f64,
}

pub type Multipliers = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightState {
    pub version: String,
    pub last_updated: String,
    /// Sums to 1.0 after any update.
    pub base_weights: BTreeMap<String, f64>,
    pub seasonal_adjustments: BTreeMap<SeasonPhase, Multipliers>,
    pub conference_adjustments: BTreeMap<ConferenceGroup, Multipliers>,
    pub prediction_type_weights: BTreeMap<PredictionType, Multipliers>,
    pub performance_tracking: BTreeMap<String, FactorPerformance>,
    pub total_predictions: u64,
}

fn table(entries: &[(&str, f64)]) -> Multipliers {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl Default for WeightState {
    fn default() -> Self {
        Self {
            version: WEIGHT_STATE_VERSION.to_string(),
            last_updated: timestamp_now(),
            base_weights: table(&[
                ("coaching_differential", 0.25),
                ("experience_differential", 0.20),
                ("situational_context", 0.20),
                ("momentum_factors", 0.15),
                ("desperation_index", 0.10),
                ("revenge_game", 0.05),
                ("market_efficiency", 0.05),
            ]),
            seasonal_adjustments: BTreeMap::from([
                (
                    SeasonPhase::Early,
                    table(&[
                        ("coaching_differential", 0.9),
                        ("momentum_factors", 0.7),
                        ("market_efficiency", 1.2),
                    ]),
                ),
                (
                    SeasonPhase::Mid,
                    table(&[
                        ("coaching_differential", 1.0),
                        ("momentum_factors", 1.1),
                        ("situational_context", 1.0),
                    ]),
                ),
                (
                    SeasonPhase::Late,
                    table(&[
                        ("desperation_index", 1.3),
                        ("situational_context", 1.2),
                        ("coaching_differential", 1.1),
                    ]),
                ),
            ]),
            conference_adjustments: BTreeMap::from([
                (
                    ConferenceGroup::Sec,
                    table(&[("coaching_differential", 1.1), ("experience_differential", 1.1)]),
                ),
                (
                    ConferenceGroup::BigTen,
                    table(&[("situational_context", 1.1), ("momentum_factors", 1.0)]),
                ),
                (
                    ConferenceGroup::Big12,
                    table(&[("market_efficiency", 0.9), ("desperation_index", 1.1)]),
                ),
                (
                    ConferenceGroup::Acc,
                    table(&[("coaching_differential", 1.0), ("situational_context", 1.0)]),
                ),
                (
                    ConferenceGroup::Pac12,
                    table(&[("market_efficiency", 0.95), ("momentum_factors", 1.05)]),
                ),
            ]),
            prediction_type_weights: BTreeMap::from([
                (
                    PredictionType::StrongContrarian,
                    table(&[("market_efficiency", 1.3), ("coaching_differential", 1.1)]),
                ),
                (
                    PredictionType::ModerateContrarian,
                    table(&[("market_efficiency", 1.2), ("situational_context", 1.1)]),
                ),
                (
                    PredictionType::SlightContrarian,
                    table(&[("market_efficiency", 1.1), ("momentum_factors", 1.1)]),
                ),
                (
                    PredictionType::ConsensusAlignment,
                    table(&[("coaching_differential", 1.1), ("experience_differential", 1.1)]),
                ),
            ]),
            performance_tracking: BTreeMap::new(),
            total_predictions: 0,
        }
    }
}
