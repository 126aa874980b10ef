//! Per-group dispersion over fixed analytical groups.

use std::collections::BTreeMap;

use edge_core::config::defaults::DEFAULT_CATEGORY_CONSENSUS_CV;

use super::metrics::variance_metrics;
use super::types::{CategoryStats, CategoryVariance, FactorGroup};
use super::ActiveFactor;

const GROUPS: &[(FactorGroup, &[&str])] = &[
    (FactorGroup::Market, &["MarketSentiment"]),
    (
        FactorGroup::Statistical,
        &["StyleMismatch", "PointDifferentialTrends", "CloseGamePerformance"],
    ),
    (
        FactorGroup::Situational,
        &["DesperationIndex", "RevengeGame", "LookaheadSandwich", "SchedulingFatigue"],
    ),
    (
        FactorGroup::Coaching,
        &["ExperienceDifferential", "PressureSituation", "HeadToHeadRecord"],
    ),
];

/// Group for a factor name; names outside the table are `Other`.
pub fn factor_group(name: &str) -> FactorGroup {
    GROUPS
        .iter()
        .find(|(_, names)| names.contains(&name))
        .map_or(FactorGroup::Other, |(group, _)| *group)
}

pub(crate) fn category_variance(factors: &[ActiveFactor]) -> CategoryVariance {
    let mut values: BTreeMap<FactorGroup, Vec<f64>> = BTreeMap::new();
    for factor in factors.iter().filter(|f| f.group != FactorGroup::Other) {
        values.entry(factor.group).or_default().push(factor.value);
    }

    let categories: BTreeMap<FactorGroup, CategoryStats> = values
        .into_iter()
        .map(|(group, vals)| {
            let m = variance_metrics(&vals);
            let stats = CategoryStats {
                factor_count: vals.len(),
                mean: m.mean,
                std_dev: m.std_dev,
                consensus: m.coefficient_of_variation < DEFAULT_CATEGORY_CONSENSUS_CV,
            };
            (group, stats)
        })
        .collect();

    let inter_category_cv = (categories.len() >= 2).then(|| {
        let means: Vec<f64> = categories.values().map(|c| c.mean).collect();
        variance_metrics(&means).coefficient_of_variation
    });

    CategoryVariance {
        categories,
        inter_category_cv,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(name: &str, value: f64) -> ActiveFactor {
        ActiveFactor {
            name: name.to_string(),
            value,
            is_primary: false,
            group: factor_group(name),
        }
    }

    #[test]
    fn test_group_lookup() {
        assert_eq!(factor_group("MarketSentiment"), FactorGroup::Market);
        assert_eq!(factor_group("SchedulingFatigue"), FactorGroup::Situational);
        assert_eq!(factor_group("VenuePerformance"), FactorGroup::Other);
    }

    #[test]
    fn test_other_group_excluded_and_single_group_has_no_inter_cv() {
        let cv = category_variance(&[f("RevengeGame", 1.0), f("Custom", 5.0)]);
        assert_eq!(cv.categories.len(), 1);
        assert!(cv.inter_category_cv.is_none());
        assert!(cv.categories[&FactorGroup::Situational].consensus);
    }

    #[test]
    fn test_inter_category_cv_over_group_means() {
        let cv = category_variance(&[
            f("StyleMismatch", 2.0),
            f("CloseGamePerformance", -1.0),
            f("RevengeGame", 1.0),
        ]);
        let stats = &cv.categories[&FactorGroup::Statistical];
        assert_eq!(stats.factor_count, 2);
        assert_eq!(stats.mean, 0.5);
        assert!(!stats.consensus);
        assert!(cv.inter_category_cv.is_some());
    }
}
