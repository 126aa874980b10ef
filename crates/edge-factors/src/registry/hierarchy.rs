//! Fixed tier table.
//!
//! Factors named here get their tier, activation threshold, and max impact
//! overwritten at registry build. Everything else keeps what its profile
//! declares.

use edge_core::types::{FactorProfile, FactorType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HierarchyEntry {
    pub factor_type: FactorType,
    pub activation_threshold: f64,
    pub max_impact: f64,
}

pub const HIERARCHY: &[(&str, HierarchyEntry)] = &[
    (
        "SchedulingFatigue",
        HierarchyEntry {
            factor_type: FactorType::Primary,
            activation_threshold: 1.0,
            max_impact: 3.5,
        },
    ),
    (
        "StyleMismatch",
        HierarchyEntry {
            factor_type: FactorType::Secondary,
            activation_threshold: 0.05,
            max_impact: 4.0,
        },
    ),
    (
        "MarketSentiment",
        HierarchyEntry {
            factor_type: FactorType::Modifier,
            activation_threshold: 0.1,
            max_impact: 2.5,
        },
    ),
];

pub fn lookup(name: &str) -> Option<&'static HierarchyEntry> {
    HIERARCHY
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, entry)| entry)
}

/// Overwrite tier fields from the table. Returns whether an entry applied.
pub fn apply(profile: &mut FactorProfile) -> bool {
    let Some(entry) = lookup(&profile.name) else {
        return false;
    };
    profile.factor_type = entry.factor_type;
    profile.activation_threshold = entry.activation_threshold;
    profile.max_impact = entry.max_impact;
    true
}
