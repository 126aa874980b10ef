//! End-to-end prediction and outcome recording.

mod common;

use common::{abc_engine, market_context};
use edge_core::config::EdgeConfig;
use edge_core::types::{GameResult, PredictionType};
use edge_engine::{EdgeDirection, EdgeOpportunitySummary, EdgeTier, EdgeType, PredictionEngine};
use edge_factors::{SystemHealth, Verdict};

#[test]
fn test_home_lean_against_the_market() {
    let harness = abc_engine();
    let ctx = market_context(Some(-7.0));
    let prediction = harness.engine.predict("Georgia", "Florida", Some(&ctx));

    assert!(!prediction.is_error());
    // 0.5 * 0.75 * 4 + 0.3 * 0.75 * 3 + 0.2 * 0.75 * 5
    assert!((prediction.total_adjustment - 2.925).abs() < 1e-9);
    assert!((prediction.contrarian_spread.unwrap() + 4.075).abs() < 1e-9);
    assert_eq!(prediction.vegas_spread, Some(-7.0));
    assert_eq!(prediction.edge_direction, Some(EdgeDirection::Home));
    assert!(prediction.has_edge);
    assert_eq!(prediction.prediction_type, Some(PredictionType::ModerateContrarian));
    assert_eq!(prediction.edge_tier, EdgeTier::Solid);
    assert_eq!(
        prediction.recommendation,
        "CONTRARIAN OPPORTUNITY: Consider Georgia (Moderate 2.9 point edge)"
    );

    let expected_raw = 0.8 * 0.4 + 0.3 + 2.925 / 5.0 * 0.2 + 0.1;
    assert!((prediction.raw_confidence - expected_raw).abs() < 1e-9);
    // Fresh calibration state with a mid-sized edge leaves confidence alone.
    assert!((prediction.confidence - expected_raw).abs() < 1e-9);
    let calibration = prediction.calibration.as_ref().unwrap();
    assert_eq!(calibration.adjustment_factor, 1.0);

    let edge = prediction.edge_classification.as_ref().unwrap();
    assert_eq!(edge.edge_type, EdgeType::ModerateContrarian);
    assert_eq!(edge.recommended_action, "BUY - Georgia (home) - 2.9 point edge");
    assert!(edge
        .explanation
        .starts_with("Moderate contrarian opportunity with 2.9 point edge. Prediction confidence: High (83.7%)."));
    assert!(edge.explanation.contains("Primary driver: statistical factors"));
    assert!(edge
        .explanation
        .ends_with("Vegas line: -7.0, Contrarian prediction: -4.1."));

    let variance = prediction.variance.as_ref().unwrap();
    assert_eq!(variance.factors_analyzed, 3);
    assert!(!variance.is_insufficient());

    assert_eq!(prediction.optimized_weights.len(), 7);
    let total: f64 = prediction.optimized_weights.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_missing_spread_is_no_betting_data() {
    let harness = abc_engine();
    let ctx = market_context(None);
    let prediction = harness.engine.predict("Georgia", "Florida", Some(&ctx));

    assert_eq!(prediction.prediction_type, Some(PredictionType::NoBettingData));
    assert_eq!(prediction.contrarian_spread, None);
    assert_eq!(prediction.edge_size, None);
    assert_eq!(prediction.edge_tier, EdgeTier::None);
    assert!(!prediction.has_edge);
    assert!((prediction.raw_confidence - 0.62).abs() < 1e-9);
    assert_eq!(
        prediction.recommendation,
        "Cannot provide recommendation - no betting line available"
    );
    let edge = prediction.edge_classification.as_ref().unwrap();
    assert_eq!(edge.edge_type, EdgeType::InsufficientData);
    assert_eq!(edge.recommended_action, "AVOID - Insufficient data for reliable prediction");
}

#[test]
fn test_poor_data_quality_makes_edge_unclassifiable() {
    let harness = abc_engine();
    let mut ctx = market_context(Some(-7.0));
    ctx.data_quality = Some(0.2);
    let prediction = harness.engine.predict("Georgia", "Florida", Some(&ctx));

    assert_eq!(prediction.prediction_type, Some(PredictionType::ModerateContrarian));
    let edge = prediction.edge_classification.as_ref().unwrap();
    assert_eq!(edge.edge_type, EdgeType::InsufficientData);
    assert!(edge
        .explanation
        .contains("Note: Limited data quality (20.0%) affects prediction reliability."));
}

#[test]
fn test_slate_summary_counts_edge_classes() {
    let harness = abc_engine();
    let with_line = market_context(Some(-7.0));
    let without_line = market_context(None);
    let slate = vec![
        harness.engine.predict("Georgia", "Florida", Some(&with_line)),
        harness.engine.predict("Texas", "Oklahoma", Some(&with_line)),
        harness.engine.predict("Iowa", "Nebraska", Some(&without_line)),
        harness.engine.predict("Iowa", "Iowa", None),
    ];

    let summary = EdgeOpportunitySummary::from_predictions(&slate);
    assert_eq!(summary.total_games, 4);
    assert_eq!(summary.moderate_edges, 2);
    assert_eq!(summary.insufficient_data, 1);
    assert_eq!(summary.edge_opportunities, 2);
    assert_eq!(summary.edge_rate, 0.5);
    assert_eq!(summary.recommendations.len(), 2);
    assert_eq!(summary.recommendations[0].game, "Florida @ Georgia");
    assert_eq!(summary.recommendations[1].game, "Oklahoma @ Texas");
}

#[test]
fn test_without_context_every_factor_is_skipped() {
    let harness = abc_engine();
    let prediction = harness.engine.predict("Georgia", "Florida", None);

    assert!(!prediction.is_error());
    let analysis = prediction.factor_analysis.as_ref().unwrap();
    assert_eq!(analysis.summary.factors_successful, 0);
    assert_eq!(prediction.total_adjustment, 0.0);
    assert_eq!(prediction.raw_confidence, 0.15);
    assert_eq!(prediction.prediction_type, Some(PredictionType::NoBettingData));
}

#[test]
fn test_identical_teams_yield_error_prediction() {
    let harness = abc_engine();
    let prediction = harness.engine.predict("Georgia", "Georgia", None);

    assert!(prediction.is_error());
    assert_eq!(prediction.error.as_deref(), Some("Home and away teams cannot be the same"));
    assert_eq!(prediction.confidence, 0.0);
    assert_eq!(prediction.prediction_type, None);
    assert!(prediction.recommendation.starts_with("Prediction failed:"));

    let blank = harness.engine.predict("", "Florida", None);
    assert_eq!(blank.error.as_deref(), Some("Both home and away teams must be provided"));

    let stats = harness.engine.stats();
    assert_eq!(stats.total_predictions, 2);
    assert_eq!(stats.failed_predictions, 2);
    assert_eq!(stats.successful_predictions, 0);
    assert_eq!(stats.failure_rate(), 1.0);
    assert_eq!(stats.registry.games_scored, 0);
}

#[test]
fn test_stats_count_successful_predictions() {
    let harness = abc_engine();
    let ctx = market_context(Some(3.0));
    harness.engine.predict("Georgia", "Florida", Some(&ctx));
    harness.engine.predict("Alabama", "Auburn", Some(&ctx));
    harness.engine.predict("Alabama", "Alabama", Some(&ctx));

    let stats = harness.engine.stats();
    assert_eq!(stats.total_predictions, 3);
    assert_eq!(stats.successful_predictions, 2);
    assert!((stats.success_rate() - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.registry.games_scored, 2);
    assert_eq!(stats.registry.total_calculations, 6);
}

#[test]
fn test_recorded_outcome_reaches_both_loops() {
    let harness = abc_engine();
    let ctx = market_context(Some(-7.0));
    let prediction = harness.engine.predict("Georgia", "Florida", Some(&ctx));

    let record = prediction.to_record();
    assert!((record.confidence.unwrap() - prediction.confidence * 100.0).abs() < 1e-9);
    assert_eq!(record.prediction_type, Some(PredictionType::ModerateContrarian));
    assert_eq!(record.factor_breakdown.len(), 3);
    assert_eq!(record.factor_breakdown["A"].value, 4.0);

    let update = harness
        .engine
        .record_outcomes(&[record], &[GameResult::new("Georgia", "Florida", true)]);
    assert_eq!(update.calibration.predictions_processed, 1);
    assert!(update.calibration.persisted);
    assert_eq!(harness.calibration.save_count(), 1);

    assert!(!update.weights.adjustment_applied);
    assert_eq!(update.weights.message.as_deref(), Some("Need 15 samples, got 1"));
    assert_eq!(harness.weights.save_count(), 0);

    let state = harness.engine.calibrator().snapshot();
    assert_eq!(state.total_predictions, 1);
    let moderate = state.prediction_type_performance[&PredictionType::ModerateContrarian];
    assert_eq!((moderate.correct, moderate.total), (1, 1));
}

#[test]
fn test_validate_setup_reports_clean_registry() {
    let harness = abc_engine();
    let report = harness.engine.validate_setup();
    assert!(report.valid);
    assert!(report.errors.is_empty());
    assert_eq!(harness.engine.registry().len(), 3);
}

#[test]
fn test_validate_factors_flags_constant_outputs() {
    let harness = abc_engine();
    let report = harness.engine.validate_factors();
    assert_eq!(report.factors.len(), 3);
    assert!(report.factors.values().all(|f| f.verdict == Verdict::Fail));
    assert_eq!(report.summary.system_health, SystemHealth::Poor);
    assert_eq!(report.summary.recommendations[0], "Fix uniform output in factors: A, B, C");
}

#[test]
fn test_from_config_persists_under_root() {
    let dir = tempfile::tempdir().unwrap();
    let config = EdgeConfig::default();
    let ctx = market_context(Some(-3.5));

    {
        let engine = PredictionEngine::from_config(&config, dir.path()).unwrap();
        assert_eq!(engine.registry().len(), 12);
        let prediction = engine.predict("Georgia", "Florida", Some(&ctx));
        assert!(!prediction.is_error());
        assert!((0.15..=0.85).contains(&prediction.confidence));

        let update = engine.record_outcomes(
            &[prediction.to_record()],
            &[GameResult::new("Georgia", "Florida", false)],
        );
        assert!(update.calibration.persisted);
    }

    let path = config.storage.effective_calibration_path(dir.path());
    assert!(path.exists());
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["total_predictions"], 1);

    let reloaded = PredictionEngine::from_config(&config, dir.path()).unwrap();
    assert_eq!(reloaded.calibrator().snapshot().total_predictions, 1);
}
