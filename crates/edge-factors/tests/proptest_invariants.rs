//! Property-based invariants for normalization and aggregation.

mod common;

use common::Fixed;
use edge_core::config::RegistryConfig;
use edge_core::types::{FactorType, GameContext};
use edge_core::Factor;
use edge_factors::factors::MarketSentiment;
use edge_factors::registry::normalize_weights;
use edge_factors::FactorRegistry;
use proptest::prelude::*;

fn factor_type() -> impl Strategy<Value = FactorType> {
    prop_oneof![
        Just(FactorType::Primary),
        Just(FactorType::Secondary),
        Just(FactorType::Trigger),
    ]
}

proptest! {
    #[test]
    fn regression_gate_normalized_weights_sum_to_one(
        weights in prop::collection::vec(0.0f64..10.0, 1..20)
    ) {
        let mut w = weights.clone();
        normalize_weights(&mut w, 1e-3).unwrap();
        let sum: f64 = w.iter().sum();
        prop_assert!((sum - 1.0).abs() <= 1e-3);
        prop_assert!(w.iter().all(|x| *x >= 0.0));
    }

    #[test]
    fn regression_gate_additive_total_matches_category_sums(
        specs in prop::collection::vec((factor_type(), 0.01f64..1.0, -5.0f64..5.0), 1..10)
    ) {
        let factors: Vec<Box<dyn Factor>> = specs
            .iter()
            .enumerate()
            .map(|(i, (ty, w, v))| {
                Box::new(Fixed::new(&format!("F{i}"), *ty, *w, 0.5, *v)) as Box<dyn Factor>
            })
            .collect();
        let registry = FactorRegistry::with_factors(factors, &RegistryConfig::default()).unwrap();
        let ctx = GameContext::default();
        let analysis = registry.calculate_all_factors("Home", "Away", Some(&ctx));
        let s = &analysis.summary;

        let category_total: f64 = s.category_adjustments.values().sum();
        prop_assert!((s.total_adjustment - category_total).abs() < 1e-9);
        let active = specs.iter().filter(|(_, _, v)| v.abs() >= 0.5).count();
        prop_assert_eq!(s.factors_activated, active);
        prop_assert_eq!(s.multiplicative_adjustment, 1.0);
    }

    #[test]
    fn regression_gate_market_modifier_stays_in_range(
        spread in -40.0f64..40.0,
        week in 0u32..16,
    ) {
        let ctx = GameContext {
            vegas_spread: Some(spread),
            week: Some(week),
            ..Default::default()
        };
        let v = MarketSentiment.calculate("Alabama", "Auburn", Some(&ctx)).unwrap();
        prop_assert!((-0.5..=0.5).contains(&v));
    }
}
