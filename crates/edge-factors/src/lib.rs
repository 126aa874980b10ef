//! # edge-factors
//!
//! The factor registry and the concrete factor set.
//! The registry builds once from a static catalog, assigns hierarchy tiers,
//! normalizes weights, and runs the per-game aggregation pipeline.
//! [`FactorValidator`] checks factor output quality over a fixed slate.

pub mod factors;
pub mod registry;
pub mod validation;

pub use registry::{
    CategorySummary, ConfigurationReport, ExecutionStats, FactorAnalysis, FactorInfo,
    FactorRegistry, PredictionSummary,
};
pub use validation::{
    CheckOutcome, FactorValidation, FactorValidator, SystemHealth, ValidationCheck,
    ValidationReport, ValidationSummary, Verdict,
};
