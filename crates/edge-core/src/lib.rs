//! # edge-core
//!
//! Foundation crate for the edge engine.
//! Defines the factor contract, shared types, errors, config, and tracing.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::EdgeConfig;
pub use errors::{EdgeError, EdgeErrorCode, EdgeResult};
pub use traits::{safe_calculate, validate_matchup, Factor};
pub use types::{
    Availability, DataKind, FactorConfidence, FactorProfile, FactorResult, FactorType,
    GameContext, GameResult, OutputRange, PredictionRecord, PredictionType,
};
