//! Registry aggregation, skipping, and determinism across the full factor set.

mod common;

use common::{full_context, Fixed};
use edge_core::config::RegistryConfig;
use edge_core::errors::RegistryError;
use edge_core::types::{BookLine, FactorType, GameContext, OutputRange};
use edge_core::Factor;
use edge_factors::registry::builtin_factors;
use edge_factors::FactorRegistry;

fn abc_registry() -> FactorRegistry {
    let factors: Vec<Box<dyn Factor>> = vec![
        Box::new(Fixed::new("A", FactorType::Primary, 0.5, 1.0, 2.0)),
        Box::new(Fixed::new("B", FactorType::Secondary, 0.3, 0.5, -0.2)),
        Box::new(Fixed::new("C", FactorType::Modifier, 1.0, 0.1, 1.2).multiplicative(2.5)),
    ];
    FactorRegistry::with_factors(factors, &RegistryConfig::default()).unwrap()
}

#[test]
fn test_abc_scenario_partitions_sum_and_product() {
    let registry = abc_registry();
    let ctx = GameContext::default();
    let analysis = registry.calculate_all_factors("Home", "Away", Some(&ctx));
    let s = &analysis.summary;

    assert_eq!(s.factors_calculated, 3);
    assert_eq!(s.factors_failed, 0);
    assert_eq!(s.factors_activated, 2);
    assert_eq!(s.primary_signals, 1);
    assert_eq!(s.secondary_signals, 0);

    let a = analysis.result("A").unwrap();
    assert!(a.activated);
    assert!((s.total_adjustment - a.dynamic_weight * 2.0).abs() < 1e-12);

    let b = analysis.result("B").unwrap();
    assert!(b.success && !b.activated);
    assert_eq!(b.value, 0.0);

    let c = analysis.result("C").unwrap();
    assert!(c.is_multiplicative);
    assert!((s.multiplicative_adjustment - (1.0 + 1.2 / 2.5)).abs() < 1e-12);
    assert_ne!(s.multiplicative_adjustment, 1.0);
    assert_eq!(s.data_quality_impact, 1.0);
}

#[test]
fn test_missing_context_skips_every_factor() {
    let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
    let analysis = registry.calculate_all_factors("Georgia", "Florida", None);

    assert_eq!(analysis.summary.factors_calculated, 12);
    assert_eq!(analysis.summary.factors_failed, 12);
    assert_eq!(analysis.summary.total_adjustment, 0.0);
    assert_eq!(analysis.summary.multiplicative_adjustment, 1.0);
    for result in analysis.factors.values() {
        assert_eq!(result.error.as_deref(), Some("Cannot calculate: No context data provided"));
        assert_eq!(
            result.explanation.as_deref(),
            Some("Insufficient data: No context data provided")
        );
        assert_eq!(result.value, 0.0);
    }
}

#[test]
fn test_factor_missing_its_data_is_skipped_others_run() {
    let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
    let ctx = GameContext {
        week: Some(9),
        ..Default::default()
    };
    let analysis = registry.calculate_all_factors("Georgia", "Florida", Some(&ctx));

    let experience = analysis.result("ExperienceDifferential").unwrap();
    assert!(!experience.success);
    assert_eq!(
        experience.error.as_deref(),
        Some("Cannot calculate: Missing required data: coaching_data")
    );
    let revenge = analysis.result("RevengeGame").unwrap();
    assert!(revenge.success);
    assert!(analysis.summary.factors_successful > 0);
    assert_eq!(
        analysis.summary.factors_successful + analysis.summary.factors_failed,
        analysis.summary.factors_calculated
    );
}

#[test]
fn test_full_context_runs_every_factor() {
    let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
    let ctx = full_context();
    let analysis = registry.calculate_all_factors("Georgia", "Florida", Some(&ctx));
    for (name, result) in &analysis.factors {
        assert!(result.success, "{name} failed: {:?}", result.error);
    }
    assert_eq!(analysis.summary.data_quality_impact, 1.0);
}

#[test]
fn test_every_factor_is_deterministic() {
    let ctx = full_context();
    for factor in builtin_factors() {
        let first = factor.calculate("Georgia", "Florida", Some(&ctx)).unwrap();
        for _ in 0..2 {
            let again = factor.calculate("Georgia", "Florida", Some(&ctx)).unwrap();
            assert!((first - again).abs() < 1e-6, "{} is not deterministic", factor.name());
        }
        assert!(factor.output_range().contains(first), "{} out of range", factor.name());
    }
}

#[test]
fn test_invalid_teams_fail_every_evaluated_factor() {
    let registry = abc_registry();
    let ctx = GameContext::default();
    let analysis = registry.calculate_all_factors("Texas", "Texas", Some(&ctx));
    assert_eq!(analysis.summary.factors_failed, 3);
    assert_eq!(analysis.summary.factors_activated, 0);
    assert_eq!(analysis.summary.data_quality_impact, 0.0);
}

#[test]
fn test_execution_stats_accumulate() {
    let registry = abc_registry();
    let ctx = GameContext::default();
    registry.calculate_all_factors("Home", "Away", Some(&ctx));
    registry.calculate_all_factors("Home", "Home", Some(&ctx));
    let stats = registry.execution_stats();
    assert_eq!(stats.games_scored, 2);
    assert_eq!(stats.total_calculations, 6);
    assert_eq!(stats.successful_calculations, 3);
    assert_eq!(stats.failure_rate(), 0.5);
}

#[test]
fn test_zero_weights_split_equally() {
    let factors: Vec<Box<dyn Factor>> = vec![
        Box::new(Fixed::new("A", FactorType::Secondary, 0.0, 0.5, 1.0)),
        Box::new(Fixed::new("B", FactorType::Secondary, 0.0, 0.5, 1.0)),
    ];
    let registry = FactorRegistry::with_factors(factors, &RegistryConfig::default()).unwrap();
    assert_eq!(registry.profile("A").unwrap().weight, 0.5);
    assert_eq!(registry.factor_info("B").unwrap().original_weight, 0.0);
}

#[test]
fn test_build_rejects_bad_configuration() {
    let mut degenerate = Fixed::new("A", FactorType::Secondary, 0.5, 0.5, 1.0);
    degenerate.bound = OutputRange::new(1.0, 1.0);
    let err = FactorRegistry::with_factors(vec![Box::new(degenerate)], &RegistryConfig::default())
        .unwrap_err();
    assert!(matches!(err, RegistryError::DegenerateRange { .. }));

    let dupes: Vec<Box<dyn Factor>> = vec![
        Box::new(Fixed::new("A", FactorType::Secondary, 0.5, 0.5, 1.0)),
        Box::new(Fixed::new("A", FactorType::Secondary, 0.5, 0.5, 1.0)),
    ];
    let err = FactorRegistry::with_factors(dupes, &RegistryConfig::default()).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateFactor { name: "A".to_string() });

    let err = FactorRegistry::with_factors(Vec::new(), &RegistryConfig::default()).unwrap_err();
    assert_eq!(err, RegistryError::EmptyRegistry);
}

#[test]
fn test_category_summary_covers_every_factor() {
    let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
    let categories = registry.category_summary();
    let count: usize = categories.values().map(|c| c.factor_count).sum();
    assert_eq!(count, registry.len());
    let weight: f64 = categories.values().map(|c| c.total_weight).sum();
    assert!((weight - 1.0).abs() < 1e-9);
    assert!(categories.contains_key("coaching_edge"));
}

#[test]
fn test_neutral_market_leaves_multiplier_untouched() {
    let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
    // Mid-sized spread, no big names, mid-season, whole number: mean 0.1,
    // a 0.04 deviation that stays under the 0.1 activation threshold.
    let ctx = GameContext {
        vegas_spread: Some(-5.0),
        week: Some(5),
        ..Default::default()
    };
    let analysis = registry.calculate_all_factors("Duke", "Wake Forest", Some(&ctx));

    let market = analysis.result("MarketSentiment").unwrap();
    assert!(market.success);
    assert!(!market.activated);
    assert!((market.raw_value - 0.04).abs() < 1e-9);
    assert_eq!(market.value, 0.0);
    assert_eq!(analysis.summary.multiplicative_adjustment, 1.0);
    assert!(analysis.active_results().all(|r| r.factor_name != "MarketSentiment"));
}

#[test]
fn test_market_line_movement_scales_multiplier_from_neutral() {
    let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
    let ctx = GameContext {
        vegas_spread: Some(-3.5),
        week: Some(5),
        betting_lines: vec![BookLine {
            provider: Some("consensus".to_string()),
            spread: Some(-3.5),
            spread_open: Some(-6.0),
        }],
        ..Default::default()
    };
    let analysis = registry.calculate_all_factors("Duke", "Wake Forest", Some(&ctx));

    let market = analysis.result("MarketSentiment").unwrap();
    let deviation = (1.0 * 0.7 - 0.1 * 0.3) * 0.4;
    assert!(market.activated);
    assert!((market.value - deviation).abs() < 1e-9);
    assert!((analysis.summary.multiplicative_adjustment - (1.0 + deviation / 2.5)).abs() < 1e-9);
}
