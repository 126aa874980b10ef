//! Prediction engine configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum edge in points to report `has_edge`. Default: 1.0.
    pub min_edge: Option<f64>,
    /// Edge for STRONG_CONTRARIAN. Default: 3.0.
    pub strong_edge: Option<f64>,
    /// Edge for MODERATE_CONTRARIAN. Default: 1.5.
    pub moderate_edge: Option<f64>,
    /// Edge for SLIGHT_CONTRARIAN. Default: 0.5.
    pub slight_edge: Option<f64>,
    /// Larger edges are treated as bad data. Default: 5.0.
    pub max_recommended_edge: Option<f64>,
    /// Below this calibrated confidence no bet is recommended. Default: 0.40.
    pub min_action_confidence: Option<f64>,
    /// Below this data quality the edge is unclassifiable. Default: 0.30.
    pub min_data_quality: Option<f64>,
}

impl EngineConfig {
    pub fn effective_min_edge(&self) -> f64 {
        self.min_edge.unwrap_or(defaults::DEFAULT_MIN_EDGE)
    }

    /// (strong, moderate, slight) edge thresholds.
    pub fn effective_type_thresholds(&self) -> (f64, f64, f64) {
        (
            self.strong_edge.unwrap_or(defaults::DEFAULT_STRONG_EDGE),
            self.moderate_edge.unwrap_or(defaults::DEFAULT_MODERATE_EDGE),
            self.slight_edge.unwrap_or(defaults::DEFAULT_SLIGHT_EDGE),
        )
    }

    /// (max recommended edge, min action confidence, min data quality).
    pub fn effective_risk_limits(&self) -> (f64, f64, f64) {
        (
            self.max_recommended_edge
                .unwrap_or(defaults::DEFAULT_MAX_RECOMMENDED_EDGE),
            self.min_action_confidence
                .unwrap_or(defaults::DEFAULT_MIN_ACTION_CONFIDENCE),
            self.min_data_quality.unwrap_or(defaults::DEFAULT_MIN_DATA_QUALITY),
        )
    }

    pub(crate) fn merge(&mut self, other: &Self) {
        super::merge_option(&mut self.min_edge, &other.min_edge);
        super::merge_option(&mut self.strong_edge, &other.strong_edge);
        super::merge_option(&mut self.moderate_edge, &other.moderate_edge);
        super::merge_option(&mut self.slight_edge, &other.slight_edge);
        super::merge_option(&mut self.max_recommended_edge, &other.max_recommended_edge);
        super::merge_option(&mut self.min_action_confidence, &other.min_action_confidence);
        super::merge_option(&mut self.min_data_quality, &other.min_data_quality);
    }
}
