//! Registry configuration errors.
//!
//! Raised while building a registry. A registry that fails any of these
//! checks never serves predictions.

use super::error_code::{self, EdgeErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("factor '{factor}' has invalid output range: [{min}, {max}]")]
    DegenerateRange { factor: String, min: f64, max: f64 },

    #[error("normalized factor weights sum to {total}, expected 1.0 (tolerance {tolerance})")]
    WeightNormalization { total: f64, tolerance: f64 },

    #[error("factor '{factor}' has a negative or non-finite weight: {weight}")]
    NegativeWeight { factor: String, weight: f64 },

    #[error("factor '{name}' is registered more than once")]
    DuplicateFactor { name: String },

    #[error("registry has no factors")]
    EmptyRegistry,

    #[error("factor '{name}' not found")]
    UnknownFactor { name: String },
}

impl EdgeErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        error_code::REGISTRY_CONFIG_ERROR
    }
}
