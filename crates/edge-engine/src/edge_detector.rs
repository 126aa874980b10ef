//! Risk-checked classification of a prediction's edge.
//!
//! The raw edge size gives an initial class. That class is then vetted:
//! a missing line, poor data, or an implausibly large edge makes the game
//! unclassifiable, and low confidence steps the class down.

use std::collections::BTreeMap;
use std::fmt;

use edge_core::config::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::prediction::{EdgeDirection, Prediction};

const STRONG_EDGE: f64 = 3.0;
const MODERATE_EDGE: f64 = 2.0;
const SLIGHT_EDGE: f64 = 1.0;
const MINIMAL_EDGE: f64 = 0.5;

const HIGH_CONFIDENCE: f64 = 0.75;
const MEDIUM_CONFIDENCE: f64 = 0.60;
const LOW_CONFIDENCE: f64 = 0.45;

/// Category adjustments smaller than this are not named as the driver.
const DRIVER_MIN_POINTS: f64 = 0.1;
const LIMITED_DATA_QUALITY: f64 = 0.5;
const TOP_OPPORTUNITIES: usize = 5;

/// Ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    InsufficientData,
    NoEdge,
    ConsensusPlay,
    SlightContrarian,
    ModerateContrarian,
    StrongContrarian,
}

impl EdgeType {
    /// Class from edge size alone: ≥ 3.0 strong, ≥ 2.0 moderate,
    /// ≥ 1.0 slight, ≥ 0.5 consensus play.
    pub fn from_edge_size(edge_size: f64) -> Self {
        if !edge_size.is_finite() {
            return Self::InsufficientData;
        }
        match edge_size.abs() {
            e if e >= STRONG_EDGE => Self::StrongContrarian,
            e if e >= MODERATE_EDGE => Self::ModerateContrarian,
            e if e >= SLIGHT_EDGE => Self::SlightContrarian,
            e if e >= MINIMAL_EDGE => Self::ConsensusPlay,
            _ => Self::NoEdge,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::StrongContrarian => "strong_contrarian",
            Self::ModerateContrarian => "moderate_contrarian",
            Self::SlightContrarian => "slight_contrarian",
            Self::ConsensusPlay => "consensus_play",
            Self::NoEdge => "no_edge",
            Self::InsufficientData => "insufficient_data",
        }
    }

    /// Whether the class is worth listing as an opportunity.
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::StrongContrarian | Self::ModerateContrarian)
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The detector's verdict on one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeClassification {
    pub edge_type: EdgeType,
    /// Absolute edge in points; 0.0 when there was no line.
    pub edge_size: f64,
    /// Calibrated confidence the class was judged at.
    pub confidence: f64,
    pub explanation: String,
    pub recommended_action: String,
}

/// What the detector reads from a finished prediction.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSignal<'a> {
    pub home_team: &'a str,
    pub away_team: &'a str,
    pub vegas_spread: Option<f64>,
    pub contrarian_spread: Option<f64>,
    pub edge_size: Option<f64>,
    pub edge_direction: Option<EdgeDirection>,
    pub confidence: f64,
    pub data_quality: f64,
    pub category_adjustments: Option<&'a BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDetector {
    max_recommended_edge: f64,
    min_action_confidence: f64,
    min_data_quality: f64,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl EdgeDetector {
    pub fn new(config: &EngineConfig) -> Self {
        let (max_recommended_edge, min_action_confidence, min_data_quality) =
            config.effective_risk_limits();
        Self {
            max_recommended_edge,
            min_action_confidence,
            min_data_quality,
        }
    }

    pub fn detect(&self, signal: &EdgeSignal<'_>) -> EdgeClassification {
        let edge_size = signal.edge_size.filter(|e| e.is_finite()).unwrap_or(0.0).abs();
        let confidence = if signal.confidence.is_finite() {
            signal.confidence
        } else {
            0.0
        };

        let initial = EdgeType::from_edge_size(edge_size);
        let edge_type = self.validate(initial, edge_size, confidence, signal);
        let recommended_action = self.recommendation(edge_type, edge_size, confidence, signal);
        let explanation = explanation(edge_type, edge_size, confidence, signal);

        debug!(
            edge_type = %edge_type,
            edge_size,
            confidence,
            "edge classified"
        );

        EdgeClassification {
            edge_type,
            edge_size,
            confidence,
            explanation,
            recommended_action,
        }
    }

    fn validate(
        &self,
        initial: EdgeType,
        edge_size: f64,
        confidence: f64,
        signal: &EdgeSignal<'_>,
    ) -> EdgeType {
        if signal.vegas_spread.is_none() || signal.contrarian_spread.is_none() {
            return EdgeType::InsufficientData;
        }
        if signal.data_quality.is_nan() || signal.data_quality < self.min_data_quality {
            return EdgeType::InsufficientData;
        }
        if edge_size > self.max_recommended_edge {
            warn!(
                home_team = signal.home_team,
                away_team = signal.away_team,
                edge_size,
                "suspiciously large edge, treating as bad data"
            );
            return EdgeType::InsufficientData;
        }

        if confidence < LOW_CONFIDENCE {
            match initial {
                EdgeType::StrongContrarian | EdgeType::ModerateContrarian => {
                    return EdgeType::SlightContrarian
                }
                EdgeType::SlightContrarian => return EdgeType::ConsensusPlay,
                _ => {}
            }
        } else if confidence < MEDIUM_CONFIDENCE && initial == EdgeType::StrongContrarian {
            return EdgeType::ModerateContrarian;
        }
        initial
    }

    fn recommendation(
        &self,
        edge_type: EdgeType,
        edge_size: f64,
        confidence: f64,
        signal: &EdgeSignal<'_>,
    ) -> String {
        if edge_type == EdgeType::InsufficientData {
            return "AVOID - Insufficient data for reliable prediction".to_string();
        }
        if confidence < self.min_action_confidence {
            return "AVOID - Confidence too low for recommended action".to_string();
        }
        let (team, side) = match signal.edge_direction {
            Some(EdgeDirection::Home) => (signal.home_team, "home"),
            Some(EdgeDirection::Away) => (signal.away_team, "away"),
            _ => return "NEUTRAL - No clear contrarian advantage identified".to_string(),
        };

        match edge_type {
            EdgeType::StrongContrarian if confidence >= HIGH_CONFIDENCE => format!(
                "STRONG BUY - {team} ({side}) - {edge_size:.1} point edge with high confidence"
            ),
            EdgeType::StrongContrarian => format!(
                "BUY - {team} ({side}) - {edge_size:.1} point edge with medium confidence"
            ),
            EdgeType::ModerateContrarian if confidence >= MEDIUM_CONFIDENCE => {
                format!("BUY - {team} ({side}) - {edge_size:.1} point edge")
            }
            EdgeType::ModerateContrarian => format!(
                "LEAN - {team} ({side}) - {edge_size:.1} point edge, moderate confidence"
            ),
            EdgeType::SlightContrarian => {
                format!("LEAN - {team} ({side}) - {edge_size:.1} point slight edge")
            }
            EdgeType::ConsensusPlay => {
                "CONSENSUS - Consider market consensus, minimal contrarian edge".to_string()
            }
            EdgeType::NoEdge | EdgeType::InsufficientData => {
                "PASS - No meaningful contrarian opportunity".to_string()
            }
        }
    }
}

fn confidence_level(confidence: f64) -> &'static str {
    match confidence {
        c if c >= HIGH_CONFIDENCE => "High",
        c if c >= MEDIUM_CONFIDENCE => "Medium",
        c if c >= LOW_CONFIDENCE => "Low",
        _ => "Very Low",
    }
}

fn explanation(edge_type: EdgeType, edge_size: f64, confidence: f64, signal: &EdgeSignal<'_>) -> String {
    let mut parts = vec![match edge_type {
        EdgeType::StrongContrarian => {
            format!("Strong contrarian opportunity identified with {edge_size:.1} point edge.")
        }
        EdgeType::ModerateContrarian => {
            format!("Moderate contrarian opportunity with {edge_size:.1} point edge.")
        }
        EdgeType::SlightContrarian => {
            format!("Slight contrarian edge of {edge_size:.1} points detected.")
        }
        EdgeType::ConsensusPlay => {
            format!("Minimal edge ({edge_size:.1} points) aligns mostly with market consensus.")
        }
        EdgeType::NoEdge => "No meaningful contrarian edge identified.".to_string(),
        EdgeType::InsufficientData => {
            "Insufficient data quality for reliable edge detection.".to_string()
        }
    }];

    parts.push(format!(
        "Prediction confidence: {} ({:.1}%).",
        confidence_level(confidence),
        confidence * 100.0
    ));

    let driver = signal
        .category_adjustments
        .into_iter()
        .flatten()
        .filter(|(_, v)| v.is_finite())
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()));
    if let Some((category, points)) = driver {
        if points.abs() > DRIVER_MIN_POINTS {
            parts.push(format!(
                "Primary driver: {} factors ({points:+.2} points).",
                category.replace('_', " ")
            ));
        }
    }

    if signal.data_quality < LIMITED_DATA_QUALITY {
        parts.push(format!(
            "Note: Limited data quality ({:.1}%) affects prediction reliability.",
            signal.data_quality * 100.0
        ));
    }

    parts.push(match (signal.vegas_spread, signal.contrarian_spread) {
        (Some(vegas), Some(contrarian)) => {
            format!("Vegas line: {vegas:+.1}, Contrarian prediction: {contrarian:+.1}.")
        }
        (Some(vegas), None) => {
            format!("Vegas line: {vegas:+.1}, but contrarian prediction unavailable.")
        }
        _ => "No betting line available for comparison.".to_string(),
    });

    parts.join(" ")
}

/// One listed opportunity in a slate summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeOpportunity {
    /// "Away @ Home".
    pub game: String,
    pub edge_type: EdgeType,
    pub edge_size: f64,
    pub confidence: f64,
    pub recommendation: String,
}

/// Edge classes across a slate of predictions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeOpportunitySummary {
    pub total_games: usize,
    /// Strong, moderate and slight edges together.
    pub edge_opportunities: usize,
    pub strong_edges: usize,
    pub moderate_edges: usize,
    pub slight_edges: usize,
    pub consensus_plays: usize,
    pub no_edge_games: usize,
    pub insufficient_data: usize,
    /// Strong and moderate edges, largest first, at most five.
    pub recommendations: Vec<EdgeOpportunity>,
    pub edge_rate: f64,
}

impl EdgeOpportunitySummary {
    /// Predictions without a classification count toward `total_games`
    /// only.
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let mut summary = Self {
            total_games: predictions.len(),
            ..Self::default()
        };
        for (prediction, edge) in predictions
            .iter()
            .filter_map(|p| p.edge_classification.as_ref().map(|e| (p, e)))
        {
            match edge.edge_type {
                EdgeType::StrongContrarian => summary.strong_edges += 1,
                EdgeType::ModerateContrarian => summary.moderate_edges += 1,
                EdgeType::SlightContrarian => summary.slight_edges += 1,
                EdgeType::ConsensusPlay => summary.consensus_plays += 1,
                EdgeType::NoEdge => summary.no_edge_games += 1,
                EdgeType::InsufficientData => summary.insufficient_data += 1,
            }
            if edge.edge_type.is_actionable() {
                summary.recommendations.push(EdgeOpportunity {
                    game: format!("{} @ {}", prediction.away_team, prediction.home_team),
                    edge_type: edge.edge_type,
                    edge_size: edge.edge_size,
                    confidence: edge.confidence,
                    recommendation: edge.recommended_action.clone(),
                });
            }
        }

        summary.recommendations.sort_by(|a, b| {
            b.edge_size
                .total_cmp(&a.edge_size)
                .then(b.confidence.total_cmp(&a.confidence))
        });
        summary.recommendations.truncate(TOP_OPPORTUNITIES);

        summary.edge_opportunities =
            summary.strong_edges + summary.moderate_edges + summary.slight_edges;
        if summary.total_games > 0 {
            summary.edge_rate = summary.edge_opportunities as f64 / summary.total_games as f64;
        }
        summary
    }
}
