//! Per-factor calculation errors.
//!
//! These never escape `safe_calculate`; they are converted into a failed
//! `FactorResult` with the message recorded in `error`.

use super::error_code::{self, EdgeErrorCode};
use crate::types::DataKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactorError {
    /// Bad team identity (empty or identical names).
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Missing required data: {kind}")]
    MissingData { kind: DataKind },

    #[error("{factor} calculation failed: {message}")]
    CalculationFailure { factor: String, message: String },

    #[error("{factor} produced a non-finite value")]
    NonFiniteOutput { factor: String },
}

impl FactorError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    pub fn calculation(factor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CalculationFailure {
            factor: factor.into(),
            message: message.into(),
        }
    }
}

impl EdgeErrorCode for FactorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => error_code::FACTOR_INVALID_INPUT,
            Self::MissingData { .. } => error_code::FACTOR_MISSING_DATA,
            Self::CalculationFailure { .. } | Self::NonFiniteOutput { .. } => {
                error_code::FACTOR_CALCULATION_FAILED
            }
        }
    }
}
