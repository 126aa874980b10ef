//! # edge-engine
//!
//! Composition root. A [`PredictionEngine`] owns a factor registry, a
//! variance detector, an edge detector and the two feedback loops, and
//! turns one matchup into a [`Prediction`].

pub mod edge_detector;
pub mod engine;
pub mod prediction;

pub use edge_detector::{
    EdgeClassification, EdgeDetector, EdgeOpportunity, EdgeOpportunitySummary, EdgeSignal,
    EdgeType,
};
pub use engine::{EngineStats, OutcomeUpdate, PredictionEngine};
pub use prediction::{EdgeDirection, EdgeTier, Prediction};
