//! Property-based regression gates for the prediction engine.

mod common;

use common::{abc_engine, market_context};
use edge_core::types::{GameContext, PredictionType};
use edge_engine::{EdgeDetector, EdgeDirection, EdgeSignal, EdgeType};
use proptest::prelude::*;

proptest! {
    #[test]
    fn regression_gate_confidence_within_calibrated_bounds(
        spread in prop::option::of(-30.0f64..30.0),
        data_quality in prop::option::of(0.0f64..1.0),
        week in prop::option::of(1u32..16),
    ) {
        let harness = abc_engine();
        let ctx = GameContext { week, data_quality, ..market_context(spread) };
        let prediction = harness.engine.predict("Home", "Away", Some(&ctx));
        prop_assert!(!prediction.is_error());
        prop_assert!((0.15..=0.95).contains(&prediction.raw_confidence));
        prop_assert!((0.15..=0.85).contains(&prediction.confidence));
    }

    #[test]
    fn regression_gate_contrarian_spread_is_market_plus_adjustment(spread in -30.0f64..30.0) {
        let harness = abc_engine();
        let ctx = market_context(Some(spread));
        let prediction = harness.engine.predict("Home", "Away", Some(&ctx));
        let contrarian = prediction.contrarian_spread.unwrap();
        prop_assert!((contrarian - (spread + prediction.total_adjustment)).abs() < 1e-9);
        prop_assert_eq!(prediction.edge_size, Some(prediction.total_adjustment.abs()));
        prop_assert_ne!(prediction.prediction_type, Some(PredictionType::NoBettingData));
    }

    #[test]
    fn regression_gate_edge_class_never_exceeds_size_class(
        edge in -8.0f64..8.0,
        confidence in 0.0f64..1.0,
        data_quality in 0.0f64..1.0,
        has_line in any::<bool>(),
    ) {
        let spread = has_line.then_some(-3.0);
        let signal = EdgeSignal {
            home_team: "Home",
            away_team: "Away",
            vegas_spread: spread,
            contrarian_spread: spread.map(|s| s + edge),
            edge_size: spread.map(|_| edge.abs()),
            edge_direction: Some(EdgeDirection::from_adjustment(edge)),
            confidence,
            data_quality,
            category_adjustments: None,
        };
        let classified = EdgeDetector::default().detect(&signal);
        prop_assert!(classified.edge_type <= EdgeType::from_edge_size(edge));
        if !has_line || data_quality < 0.3 || edge.abs() > 5.0 {
            prop_assert_eq!(classified.edge_type, EdgeType::InsufficientData);
        }
    }
}
