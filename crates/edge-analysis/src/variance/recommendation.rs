//! Bet-sizing recommendation and plain-language implications.

use edge_core::config::defaults::DEFAULT_INTER_CATEGORY_CONFLICT_CV;

use super::types::{
    CategoryVariance, DirectionalAgreement, DirectionalConsensus, FactorGroup, Recommendation,
    RecommendationConfidence, RecommendedAction, VarianceLevel,
};

const PRIMARY_DISAGREEMENT_PENALTY: f64 = 0.7;
const HIGH_AGREEMENT_RATIO: f64 = 0.8;
const HIGH_AGREEMENT_BONUS: f64 = 1.1;

pub(crate) fn recommendation(
    level: VarianceLevel,
    directional: &DirectionalAgreement,
) -> Recommendation {
    let (mut confidence, mut bet_size_adjustment, action) = match level {
        VarianceLevel::Consensus => (RecommendationConfidence::High, 1.0, RecommendedAction::Proceed),
        VarianceLevel::Mild => (RecommendationConfidence::Medium, 0.9, RecommendedAction::Proceed),
        VarianceLevel::Moderate => (
            RecommendationConfidence::Low,
            0.7,
            RecommendedAction::ProceedCautiously,
        ),
        VarianceLevel::Strong => (
            RecommendationConfidence::VeryLow,
            0.5,
            RecommendedAction::ReduceExposure,
        ),
        VarianceLevel::Extreme => (
            RecommendationConfidence::NoConfidence,
            0.25,
            RecommendedAction::AvoidOrMinimum,
        ),
        VarianceLevel::InsufficientData => (
            RecommendationConfidence::None,
            0.5,
            RecommendedAction::InsufficientData,
        ),
    };

    if directional.primary_disagreement {
        bet_size_adjustment *= PRIMARY_DISAGREEMENT_PENALTY;
        confidence = RecommendationConfidence::VeryLow;
    } else if directional.agreement_ratio > HIGH_AGREEMENT_RATIO {
        bet_size_adjustment = (bet_size_adjustment * HIGH_AGREEMENT_BONUS).min(1.0);
    }

    Recommendation {
        action,
        confidence,
        bet_size_adjustment,
        reasoning: reasoning(level, directional),
    }
}

fn reasoning(level: VarianceLevel, directional: &DirectionalAgreement) -> String {
    match level {
        VarianceLevel::Consensus => {
            "Factors strongly agree, indicating a high-confidence opportunity".to_string()
        }
        VarianceLevel::Extreme => "Extreme factor disagreement suggests avoiding this game".to_string(),
        VarianceLevel::InsufficientData => {
            "Not enough factors activated for variance analysis".to_string()
        }
        _ if directional.primary_disagreement => {
            "Primary factors disagree, indicating fundamental uncertainty".to_string()
        }
        VarianceLevel::Moderate => {
            "Moderate disagreement suggests reducing bet size for risk management".to_string()
        }
        other => format!("Factor variance at {other} level"),
    }
}

pub(crate) fn implications(
    level: VarianceLevel,
    directional: &DirectionalAgreement,
    categories: &CategoryVariance,
) -> Vec<String> {
    let mut out = vec![match level {
        VarianceLevel::Consensus => "Strong factor agreement - high confidence signal",
        VarianceLevel::Mild => "Mild factor disagreement - proceed with standard confidence",
        VarianceLevel::Moderate => "Moderate disagreement - consider reducing bet size",
        VarianceLevel::Strong => "Strong disagreement - high uncertainty, reduce exposure",
        VarianceLevel::Extreme => "Extreme disagreement - avoid or minimum bet only",
        VarianceLevel::InsufficientData => "Insufficient active factors for variance analysis",
    }
    .to_string()];

    if directional.primary_disagreement {
        out.push("Primary factors disagree - fundamental conflict in analysis".to_string());
    }
    if directional.consensus == DirectionalConsensus::Mixed {
        out.push("No directional consensus - factors pulling both ways".to_string());
    } else if directional.consensus.is_strong() {
        out.push(format!(
            "Strong directional agreement ({})",
            directional.consensus.name()
        ));
    }

    if categories
        .inter_category_cv
        .is_some_and(|cv| cv > DEFAULT_INTER_CATEGORY_CONFLICT_CV)
    {
        out.push("Categories disagree - different analytical methods conflict".to_string());
    }

    let consensus = |group| categories.categories.get(&group).map(|c| c.consensus);
    if consensus(FactorGroup::Market) == Some(true)
        && consensus(FactorGroup::Statistical) == Some(false)
    {
        out.push("Market factors agree but stats disagree - potential trap".to_string());
    }
    out
}
