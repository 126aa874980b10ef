//! Static description of a factor: identity, tier, and weighting knobs.

use serde::{Deserialize, Serialize};

use super::FactorType;
use crate::constants::{DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_CATEGORY, DEFAULT_MAX_IMPACT};

/// The tunable attributes of a factor.
///
/// A factor declares its defaults through `Factor::profile`. The registry
/// owns the live copy: it applies the hierarchy table and weight
/// normalization to it once at build time and treats it as read-only while
/// serving predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorProfile {
    pub name: String,
    pub description: String,
    pub category: String,
    pub weight: f64,
    pub factor_type: FactorType,
    pub activation_threshold: f64,
    pub max_impact: f64,
    pub is_multiplicative: bool,
}

impl FactorProfile {
    /// Profile with base-calculator defaults: weight 0.0, category
    /// "unknown", SECONDARY, threshold 0.5, max impact 5.0, additive.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            weight: 0.0,
            factor_type: FactorType::default(),
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            max_impact: DEFAULT_MAX_IMPACT,
            is_multiplicative: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn factor_type(mut self, factor_type: FactorType) -> Self {
        self.factor_type = factor_type;
        self
    }

    pub fn activation_threshold(mut self, threshold: f64) -> Self {
        self.activation_threshold = threshold;
        self
    }

    pub fn max_impact(mut self, max_impact: f64) -> Self {
        self.max_impact = max_impact;
        self
    }

    pub fn multiplicative(mut self, is_multiplicative: bool) -> Self {
        self.is_multiplicative = is_multiplicative;
        self
    }
}
