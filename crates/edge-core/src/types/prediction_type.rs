//! Classification of a prediction by how far it departs from the market.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionType {
    StrongContrarian,
    ModerateContrarian,
    SlightContrarian,
    #[default]
    ConsensusAlignment,
    /// No published spread, so no contrarian analysis was possible.
    NoBettingData,
}

impl PredictionType {
    /// Types tracked by the feedback loops.
    pub const TRACKED: [PredictionType; 4] = [
        Self::StrongContrarian,
        Self::ModerateContrarian,
        Self::SlightContrarian,
        Self::ConsensusAlignment,
    ];

    /// Classify an edge size in points: ≥ 3.0 strong, ≥ 1.5 moderate,
    /// ≥ 0.5 slight, otherwise consensus.
    pub fn from_edge(edge_size: f64) -> Self {
        Self::from_edge_with(edge_size, 3.0, 1.5, 0.5)
    }

    pub fn from_edge_with(edge_size: f64, strong: f64, moderate: f64, slight: f64) -> Self {
        if edge_size >= strong {
            Self::StrongContrarian
        } else if edge_size >= moderate {
            Self::ModerateContrarian
        } else if edge_size >= slight {
            Self::SlightContrarian
        } else {
            Self::ConsensusAlignment
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::StrongContrarian => "STRONG_CONTRARIAN",
            Self::ModerateContrarian => "MODERATE_CONTRARIAN",
            Self::SlightContrarian => "SLIGHT_CONTRARIAN",
            Self::ConsensusAlignment => "CONSENSUS_ALIGNMENT",
            Self::NoBettingData => "NO_BETTING_DATA",
        }
    }
}

impl fmt::Display for PredictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
