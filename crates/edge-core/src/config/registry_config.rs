//! Factor registry configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegistryConfig {
    /// Allowed deviation of the normalized weight sum from 1.0. Default: 1e-3.
    pub weight_tolerance: Option<f64>,
    /// Base weight overrides applied before normalization, by factor name.
    pub weight_overrides: BTreeMap<String, f64>,
    /// Factors left out of the registry.
    pub disabled_factors: Vec<String>,
}

impl RegistryConfig {
    pub fn effective_weight_tolerance(&self) -> f64 {
        self.weight_tolerance.unwrap_or(defaults::DEFAULT_WEIGHT_TOLERANCE)
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_factors.iter().any(|d| d == name)
    }

    pub(crate) fn merge(&mut self, other: &Self) {
        super::merge_option(&mut self.weight_tolerance, &other.weight_tolerance);
        if !other.weight_overrides.is_empty() {
            self.weight_overrides.clone_from(&other.weight_overrides);
        }
        if !other.disabled_factors.is_empty() {
            self.disabled_factors.clone_from(&other.disabled_factors);
        }
    }
}
