//! Property-based regression gates for variance analysis.

use edge_analysis::VarianceDetector;
use edge_core::types::{FactorResult, FactorType};
use proptest::prelude::*;

const NAMES: [&str; 12] = [
    "StyleMismatch",
    "MarketSentiment",
    "SchedulingFatigue",
    "DesperationIndex",
    "RevengeGame",
    "LookaheadSandwich",
    "ExperienceDifferential",
    "PressureSituation",
    "HeadToHeadRecord",
    "PointDifferentialTrends",
    "CloseGamePerformance",
    "VenuePerformance",
];

fn results(values: &[(f64, bool)]) -> Vec<FactorResult> {
    values
        .iter()
        .enumerate()
        .map(|(i, (value, primary))| {
            let factor_type = if *primary {
                FactorType::Primary
            } else {
                FactorType::Secondary
            };
            let mut r = FactorResult::pending(NAMES[i % NAMES.len()], factor_type, "test", 0.1, false);
            r.success = true;
            r.activated = true;
            r.value = *value;
            r
        })
        .collect()
}

fn factor_values() -> impl Strategy<Value = Vec<(f64, bool)>> {
    prop::collection::vec((-5.0f64..5.0, any::<bool>()), 3..12)
}

proptest! {
    #[test]
    fn regression_gate_direction_counts_cover_every_factor(values in factor_values()) {
        let analysis = VarianceDetector::default().analyze_results(&results(&values));
        let d = analysis.directional_agreement.expect("enough factors");
        prop_assert_eq!(d.positive_count + d.negative_count + d.neutral_count, values.len());
        prop_assert!((0.0..=1.0).contains(&d.agreement_ratio));
    }

    #[test]
    fn regression_gate_outliers_sorted_by_magnitude(values in factor_values()) {
        let analysis = VarianceDetector::default().analyze_results(&results(&values));
        for pair in analysis.outlier_factors.windows(2) {
            prop_assert!(pair[0].z_score.abs() >= pair[1].z_score.abs());
        }
        for outlier in &analysis.outlier_factors {
            prop_assert!(outlier.z_score.abs() > 1.5);
        }
    }

    #[test]
    fn regression_gate_bet_size_within_unit_interval(values in factor_values()) {
        let analysis = VarianceDetector::default().analyze_results(&results(&values));
        let size = analysis.recommendation.bet_size_adjustment;
        prop_assert!(size > 0.0 && size <= 1.0, "bet size {}", size);
        prop_assert!(analysis.overall_metrics.expect("enough factors").coefficient_of_variation >= 0.0);
    }
}
