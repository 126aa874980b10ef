//! Read-only views over a built registry.

use std::collections::BTreeMap;

use edge_core::types::{DataKind, FactorType, OutputRange};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorInfo {
    pub name: String,
    pub description: String,
    pub category: String,
    pub factor_type: FactorType,
    /// Normalized weight currently in force.
    pub weight: f64,
    /// Declared or overridden weight before normalization.
    pub original_weight: f64,
    pub activation_threshold: f64,
    pub max_impact: f64,
    pub is_multiplicative: bool,
    pub output_range: OutputRange,
    pub required_data: BTreeMap<DataKind, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub factor_count: usize,
    pub total_weight: f64,
    pub factors: Vec<String>,
}

/// Lifetime counters across every factor evaluation the registry has run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStats {
    pub games_scored: u64,
    pub total_calculations: u64,
    pub successful_calculations: u64,
    pub failed_calculations: u64,
    pub factors_registered: usize,
}

impl ExecutionStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_calculations == 0 {
            return 0.0;
        }
        self.successful_calculations as f64 / self.total_calculations as f64
    }

    pub fn failure_rate(&self) -> f64 {
        if self.total_calculations == 0 {
            return 0.0;
        }
        self.failed_calculations as f64 / self.total_calculations as f64
    }
}

/// Result of `validate_configuration`. Errors make the registry invalid,
/// warnings do not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigurationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub total_factors: usize,
    pub total_weight: f64,
    pub categories: usize,
}
