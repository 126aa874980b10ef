//! # edge-analysis
//!
//! Agreement analysis over the active factors of one game: dispersion,
//! directional consensus, per-group spread, outliers, and a bet-sizing
//! recommendation.

pub mod variance;

pub use variance::{VarianceAnalysis, VarianceDetector, VarianceLevel};
