//! Per-call factor output records.

use serde::{Deserialize, Serialize};

use super::{FactorConfidence, FactorType};

/// Value, confidence, and reasoning produced by
/// `Factor::calculate_with_confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReading {
    pub value: f64,
    pub confidence: FactorConfidence,
    pub reasoning: Vec<String>,
}

impl ConfidenceReading {
    pub fn new(value: f64, confidence: FactorConfidence, reasoning: Vec<String>) -> Self {
        Self {
            value,
            confidence,
            reasoning,
        }
    }
}

/// The record produced by `safe_calculate` for one factor on one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorResult {
    pub factor_name: String,
    pub factor_type: FactorType,
    pub category: String,
    /// Value before threshold gating.
    pub raw_value: f64,
    /// Value after gating and clamping; 0.0 when not activated.
    pub value: f64,
    /// `None` when the pipeline stopped before a confidence was obtained.
    pub confidence: Option<FactorConfidence>,
    pub reasoning: Vec<String>,
    pub success: bool,
    pub error: Option<String>,
    pub weight: f64,
    pub dynamic_weight: f64,
    pub weighted_value: f64,
    pub is_multiplicative: bool,
    pub activated: bool,
    pub explanation: Option<String>,
}

impl FactorResult {
    /// Empty failed record for a factor; pipeline stages fill it in.
    pub fn pending(
        factor_name: impl Into<String>,
        factor_type: FactorType,
        category: impl Into<String>,
        weight: f64,
        is_multiplicative: bool,
    ) -> Self {
        Self {
            factor_name: factor_name.into(),
            factor_type,
            category: category.into(),
            raw_value: 0.0,
            value: 0.0,
            confidence: None,
            reasoning: Vec::new(),
            success: false,
            error: None,
            weight,
            dynamic_weight: 0.0,
            weighted_value: 0.0,
            is_multiplicative,
            activated: false,
            explanation: None,
        }
    }

    /// Successful and above threshold.
    pub fn is_active(&self) -> bool {
        self.success && self.activated
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.success = false;
        self.activated = false;
        self.error = Some(error.into());
        self
    }
}
