//! Variance analysis types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Disagreement level by coefficient of variation, ascending.
/// `InsufficientData` sits off the ladder: too few factors were active to
/// measure dispersion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceLevel {
    Consensus,
    Mild,
    Moderate,
    Strong,
    Extreme,
    InsufficientData,
}

impl VarianceLevel {
    /// Map a CV onto the ladder. `thresholds` are the exclusive upper
    /// bounds for CONSENSUS, MILD, MODERATE, STRONG.
    pub fn from_cv(cv: f64, thresholds: &[f64; 4]) -> Self {
        if cv < thresholds[0] {
            Self::Consensus
        } else if cv < thresholds[1] {
            Self::Mild
        } else if cv < thresholds[2] {
            Self::Moderate
        } else if cv < thresholds[3] {
            Self::Strong
        } else {
            Self::Extreme
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Consensus => "consensus",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::Extreme => "extreme",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for VarianceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VarianceMetrics {
    pub mean: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub coefficient_of_variation: f64,
    pub range: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionalConsensus {
    StrongPositive,
    StrongNegative,
    LeanPositive,
    LeanNegative,
    Mixed,
}

impl DirectionalConsensus {
    pub fn name(self) -> &'static str {
        match self {
            Self::StrongPositive => "strong_positive",
            Self::StrongNegative => "strong_negative",
            Self::LeanPositive => "lean_positive",
            Self::LeanNegative => "lean_negative",
            Self::Mixed => "mixed",
        }
    }

    pub fn is_strong(self) -> bool {
        matches!(self, Self::StrongPositive | Self::StrongNegative)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalAgreement {
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub consensus: DirectionalConsensus,
    /// At least two active PRIMARY factors pointing opposite ways.
    pub primary_disagreement: bool,
    /// Share of factors on the majority side.
    pub agreement_ratio: f64,
}

/// Named analytical groups used for per-group dispersion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorGroup {
    Market,
    Statistical,
    Situational,
    Coaching,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub factor_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub consensus: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryVariance {
    pub categories: BTreeMap<FactorGroup, CategoryStats>,
    /// CV of the group means; present when at least two groups are active.
    pub inter_category_cv: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierFactor {
    pub name: String,
    pub value: f64,
    pub z_score: f64,
    pub deviation: f64,
    pub category: FactorGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    Proceed,
    ProceedCautiously,
    ReduceExposure,
    AvoidOrMinimum,
    InsufficientData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationConfidence {
    High,
    Medium,
    Low,
    VeryLow,
    NoConfidence,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: RecommendedAction,
    pub confidence: RecommendationConfidence,
    /// Multiplier on the standard stake.
    pub bet_size_adjustment: f64,
    pub reasoning: String,
}

/// Full variance report for one game.
///
/// When too few factors were active, `variance_level` is
/// `InsufficientData` and the statistics are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceAnalysis {
    pub variance_level: VarianceLevel,
    pub overall_metrics: Option<VarianceMetrics>,
    pub directional_agreement: Option<DirectionalAgreement>,
    pub category_variance: Option<CategoryVariance>,
    pub outlier_factors: Vec<OutlierFactor>,
    pub implications: Vec<String>,
    pub factors_analyzed: usize,
    pub recommendation: Recommendation,
}

impl VarianceAnalysis {
    pub(crate) fn insufficient_data() -> Self {
        Self {
            variance_level: VarianceLevel::InsufficientData,
            overall_metrics: None,
            directional_agreement: None,
            category_variance: None,
            outlier_factors: Vec::new(),
            implications: vec!["Insufficient active factors for variance analysis".to_string()],
            factors_analyzed: 0,
            recommendation: Recommendation {
                action: RecommendedAction::InsufficientData,
                confidence: RecommendationConfidence::None,
                bet_size_adjustment: 0.5,
                reasoning: "Not enough factors activated for variance analysis".to_string(),
            },
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.variance_level == VarianceLevel::InsufficientData
    }

    pub fn active_factor_count(&self) -> usize {
        self.factors_analyzed
    }

    pub fn agreement_ratio(&self) -> Option<f64> {
        self.directional_agreement.map(|d| d.agreement_ratio)
    }
}
