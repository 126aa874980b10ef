//! Prediction output and the pure pieces that build it.

use std::collections::BTreeMap;
use std::fmt;

use edge_analysis::VarianceAnalysis;
use edge_core::config::defaults::{DEFAULT_MAX_CONFIDENCE, DEFAULT_MIN_CONFIDENCE};
use edge_core::types::{FactorSnapshot, PredictionRecord, PredictionType};
use edge_factors::FactorAnalysis;
use edge_feedback::CalibrationOutcome;
use serde::{Deserialize, Serialize};

use crate::edge_detector::EdgeClassification;

/// Which side the factors lean relative to the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    Home,
    Away,
    Neutral,
}

impl EdgeDirection {
    pub fn from_adjustment(adjustment: f64) -> Self {
        if adjustment > 0.0 {
            Self::Home
        } else if adjustment < 0.0 {
            Self::Away
        } else {
            Self::Neutral
        }
    }
}

/// Coarse edge-size label for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeTier {
    None,
    Slight,
    Solid,
    Strong,
    Massive,
}

impl EdgeTier {
    /// ≥ 6.0 massive, ≥ 4.0 strong, ≥ 2.5 solid, ≥ 1.5 slight.
    pub fn from_edge(edge_size: Option<f64>) -> Self {
        match edge_size.map(f64::abs) {
            Some(e) if e >= 6.0 => Self::Massive,
            Some(e) if e >= 4.0 => Self::Strong,
            Some(e) if e >= 2.5 => Self::Solid,
            Some(e) if e >= 1.5 => Self::Slight,
            _ => Self::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Massive => "MASSIVE EDGE",
            Self::Strong => "STRONG EDGE",
            Self::Solid => "SOLID EDGE",
            Self::Slight => "SLIGHT LEAN",
            Self::None => "NO EDGE",
        }
    }
}

impl fmt::Display for EdgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Market-relative call derived from the factor adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ContrarianCall {
    pub(crate) contrarian_spread: Option<f64>,
    pub(crate) edge_size: Option<f64>,
    pub(crate) edge_direction: Option<EdgeDirection>,
    pub(crate) has_edge: bool,
    pub(crate) prediction_type: PredictionType,
}

impl ContrarianCall {
    pub(crate) fn new(
        spread: Option<f64>,
        total_adjustment: f64,
        min_edge: f64,
        (strong, moderate, slight): (f64, f64, f64),
    ) -> Self {
        let Some(spread) = spread else {
            return Self {
                contrarian_spread: None,
                edge_size: None,
                edge_direction: None,
                has_edge: false,
                prediction_type: PredictionType::NoBettingData,
            };
        };
        let edge_size = total_adjustment.abs();
        Self {
            contrarian_spread: Some(spread + total_adjustment),
            edge_size: Some(edge_size),
            edge_direction: Some(EdgeDirection::from_adjustment(total_adjustment)),
            has_edge: edge_size >= min_edge,
            prediction_type: PredictionType::from_edge_with(edge_size, strong, moderate, slight),
        }
    }

    pub(crate) fn recommendation(&self, home_team: &str, away_team: &str) -> String {
        match self.prediction_type {
            PredictionType::NoBettingData => {
                return "Cannot provide recommendation - no betting line available".to_string()
            }
            PredictionType::ConsensusAlignment => {
                return "No contrarian opportunity identified - align with market consensus"
                    .to_string()
            }
            _ => {}
        }
        let edge = self.edge_size.unwrap_or(0.0);
        let lead = match self.edge_direction {
            Some(EdgeDirection::Home) => format!("CONTRARIAN OPPORTUNITY: Consider {home_team}"),
            Some(EdgeDirection::Away) => format!("CONTRARIAN OPPORTUNITY: Consider {away_team}"),
            _ => "Neutral prediction - no clear contrarian edge".to_string(),
        };
        let strength = match self.prediction_type {
            PredictionType::StrongContrarian => "Strong",
            PredictionType::ModerateContrarian => "Moderate",
            _ => "Slight",
        };
        format!("{lead} ({strength} {edge:.1} point edge)")
    }
}

/// Pre-calibration confidence: data quality 40%, factor success rate
/// 30%, edge size 20% (saturating at 5 points), spread availability 10%.
pub fn raw_confidence(
    data_quality: f64,
    factors_successful: usize,
    factors_calculated: usize,
    edge_size: Option<f64>,
) -> f64 {
    let success_rate = factors_successful as f64 / factors_calculated.max(1) as f64;
    let edge_part = edge_size.map_or(0.0, |e| (e / 5.0).min(1.0) * 0.2);
    let spread_part = if edge_size.is_some() { 0.1 } else { 0.0 };
    let total = data_quality * 0.4 + success_rate * 0.3 + edge_part + spread_part;
    if total.is_finite() {
        total.clamp(DEFAULT_MIN_CONFIDENCE, DEFAULT_MAX_CONFIDENCE)
    } else {
        DEFAULT_MIN_CONFIDENCE
    }
}

/// Everything the engine can say about one matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub home_team: String,
    pub away_team: String,
    pub week: Option<u32>,
    /// RFC 3339.
    pub timestamp: String,
    pub vegas_spread: Option<f64>,
    pub contrarian_spread: Option<f64>,
    pub edge_size: Option<f64>,
    pub edge_direction: Option<EdgeDirection>,
    pub has_edge: bool,
    /// `None` when the prediction failed.
    pub prediction_type: Option<PredictionType>,
    pub edge_tier: EdgeTier,
    /// Risk-checked edge class. `None` when the prediction failed.
    pub edge_classification: Option<EdgeClassification>,
    pub total_adjustment: f64,
    pub multiplicative_adjustment: f64,
    pub data_quality: f64,
    pub recommendation: String,
    pub raw_confidence: f64,
    /// Calibrated confidence, 0–1. Zero for failed predictions.
    pub confidence: f64,
    pub calibration: Option<CalibrationOutcome>,
    pub variance: Option<VarianceAnalysis>,
    pub factor_analysis: Option<FactorAnalysis>,
    pub optimized_weights: BTreeMap<String, f64>,
    pub error: Option<String>,
}

impl Prediction {
    pub(crate) fn failed(home_team: &str, away_team: &str, week: Option<u32>, error: String) -> Self {
        Self {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            week,
            timestamp: chrono::Utc::now().to_rfc3339(),
            vegas_spread: None,
            contrarian_spread: None,
            edge_size: None,
            edge_direction: None,
            has_edge: false,
            prediction_type: None,
            edge_tier: EdgeTier::None,
            edge_classification: None,
            total_adjustment: 0.0,
            multiplicative_adjustment: 1.0,
            data_quality: 0.0,
            recommendation: format!("Prediction failed: {error}"),
            raw_confidence: 0.0,
            confidence: 0.0,
            calibration: None,
            variance: None,
            factor_analysis: None,
            optimized_weights: BTreeMap::new(),
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The record the feedback loops consume once the game settles.
    /// Confidence is stated on the 0–100 scale; the breakdown holds each
    /// successful factor's value.
    pub fn to_record(&self) -> PredictionRecord {
        let factor_breakdown = self
            .factor_analysis
            .iter()
            .flat_map(|a| a.factors.values())
            .filter(|r| r.success)
            .map(|r| (r.factor_name.clone(), FactorSnapshot { value: r.value }))
            .collect();
        PredictionRecord {
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            confidence: Some(self.confidence * 100.0),
            predicted_edge: self.edge_size,
            prediction_type: self.prediction_type,
            week: self.week,
            factor_breakdown,
        }
    }
}
