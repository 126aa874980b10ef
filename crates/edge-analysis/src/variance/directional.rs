//! Directional agreement among active factors.

use super::types::{DirectionalAgreement, DirectionalConsensus};
use super::ActiveFactor;

const STRONG_SHARE: f64 = 0.7;
const LEAN_SHARE: f64 = 0.5;

pub(crate) fn directional_agreement(factors: &[ActiveFactor]) -> DirectionalAgreement {
    let total = factors.len();
    let positive = factors.iter().filter(|f| f.value > 0.0).count();
    let negative = factors.iter().filter(|f| f.value < 0.0).count();
    let neutral = total - positive - negative;

    let share = |count: usize, of: f64| count as f64 >= total as f64 * of;
    let consensus = if share(positive, STRONG_SHARE) {
        DirectionalConsensus::StrongPositive
    } else if share(negative, STRONG_SHARE) {
        DirectionalConsensus::StrongNegative
    } else if share(positive, LEAN_SHARE) {
        DirectionalConsensus::LeanPositive
    } else if share(negative, LEAN_SHARE) {
        DirectionalConsensus::LeanNegative
    } else {
        DirectionalConsensus::Mixed
    };

    let primaries: Vec<&ActiveFactor> = factors.iter().filter(|f| f.is_primary).collect();
    let primary_disagreement = primaries.len() >= 2
        && primaries.iter().any(|f| f.value > 0.0)
        && primaries.iter().any(|f| f.value < 0.0);

    let agreement_ratio = if total == 0 {
        0.0
    } else {
        positive.max(negative) as f64 / total as f64
    };

    DirectionalAgreement {
        positive_count: positive,
        negative_count: negative,
        neutral_count: neutral,
        consensus,
        primary_disagreement,
        agreement_ratio,
    }
}
