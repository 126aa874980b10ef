//! The factor registry.
//!
//! Built once from a list of factors: each profile gets its hierarchy tier,
//! any configured weight override, and then a unit-sum normalization. After
//! that the registry is read-only apart from `apply_weights`, and
//! `calculate_all_factors` can be called from many threads at once.

pub mod catalog;
pub mod hierarchy;
pub mod introspection;
pub mod normalization;
pub mod summary;

pub use catalog::{builtin_factors, CATALOG};
pub use introspection::{CategorySummary, ConfigurationReport, ExecutionStats, FactorInfo};
pub use normalization::{normalize_weights, NormalizationOutcome};
pub use summary::{FactorAnalysis, PredictionSummary};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use edge_core::config::RegistryConfig;
use edge_core::errors::RegistryError;
use edge_core::tracing::metrics;
use edge_core::types::{FactorProfile, FactorResult, GameContext};
use edge_core::{safe_calculate, Factor};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

struct RegisteredFactor {
    factor: Box<dyn Factor>,
    /// Live profile: hierarchy applied, weight normalized.
    profile: FactorProfile,
    original_weight: f64,
}

pub struct FactorRegistry {
    entries: Vec<RegisteredFactor>,
    index: FxHashMap<String, usize>,
    tolerance: f64,
    games_scored: AtomicU64,
    total_calculations: AtomicU64,
    successful_calculations: AtomicU64,
    failed_calculations: AtomicU64,
}

impl FactorRegistry {
    /// Registry over the built-in catalog, minus disabled factors.
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        Self::with_factors(builtin_factors(), config)
    }

    pub fn with_factors(
        factors: Vec<Box<dyn Factor>>,
        config: &RegistryConfig,
    ) -> Result<Self, RegistryError> {
        let tolerance = config.effective_weight_tolerance();
        let mut entries: Vec<RegisteredFactor> = Vec::with_capacity(factors.len());
        let mut index = FxHashMap::default();

        for factor in factors {
            let mut profile = factor.profile();
            if config.is_disabled(&profile.name) {
                debug!(factor = %profile.name, "factor disabled by configuration");
                continue;
            }
            hierarchy::apply(&mut profile);
            if let Some(weight) = config.weight_overrides.get(&profile.name) {
                profile.weight = *weight;
            }

            if !profile.weight.is_finite() || profile.weight < 0.0 {
                return Err(RegistryError::NegativeWeight {
                    factor: profile.name,
                    weight: profile.weight,
                });
            }
            let range = factor.output_range();
            if !range.is_valid() {
                return Err(RegistryError::DegenerateRange {
                    factor: profile.name,
                    min: range.min,
                    max: range.max,
                });
            }
            if index.contains_key(&profile.name) {
                return Err(RegistryError::DuplicateFactor { name: profile.name });
            }

            index.insert(profile.name.clone(), entries.len());
            entries.push(RegisteredFactor {
                factor,
                original_weight: profile.weight,
                profile,
            });
        }

        if entries.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }

        let mut weights: Vec<f64> = entries.iter().map(|e| e.profile.weight).collect();
        normalize_weights(&mut weights, tolerance)?;
        for (entry, weight) in entries.iter_mut().zip(weights) {
            entry.profile.weight = weight;
        }

        info!(
            { metrics::FACTOR_COUNT } = entries.len(),
            tolerance, "factor registry initialized"
        );

        Ok(Self {
            entries,
            index,
            tolerance,
            games_scored: AtomicU64::new(0),
            total_calculations: AtomicU64::new(0),
            successful_calculations: AtomicU64::new(0),
            failed_calculations: AtomicU64::new(0),
        })
    }

    /// Evaluate every factor for one matchup and aggregate the results.
    ///
    /// Factors whose data requirements are not met are recorded as failed
    /// without being called. Never fails; per-factor problems end up in
    /// the corresponding `FactorResult`.
    pub fn calculate_all_factors(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> FactorAnalysis {
        let mut factors = BTreeMap::new();
        let mut summary = PredictionSummary::default();

        for entry in &self.entries {
            let availability = entry.factor.can_calculate(context);
            let result = match availability.reason() {
                None => safe_calculate(
                    entry.factor.as_ref(),
                    &entry.profile,
                    home_team,
                    away_team,
                    context,
                ),
                Some(reason) => {
                    debug!(factor = %entry.profile.name, reason, "factor skipped");
                    skipped(&entry.profile, reason)
                }
            };

            summary.record(&result);
            self.total_calculations.fetch_add(1, Ordering::Relaxed);
            if result.success {
                self.successful_calculations.fetch_add(1, Ordering::Relaxed);
            } else {
                self.failed_calculations.fetch_add(1, Ordering::Relaxed);
            }
            factors.insert(entry.profile.name.clone(), result);
        }

        summary.finish(factors.values());
        self.games_scored.fetch_add(1, Ordering::Relaxed);

        debug!(
            home_team,
            away_team,
            { metrics::FACTORS_ACTIVATED } = summary.factors_activated,
            { metrics::TOTAL_ADJUSTMENT } = summary.total_adjustment,
            "factors calculated"
        );

        FactorAnalysis {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            factors,
            summary,
        }
    }

    /// Overwrite base weights for the named factors and renormalize.
    ///
    /// Unknown names are ignored. Returns how many factors matched. On
    /// error the registry keeps its previous weights.
    pub fn apply_weights(&mut self, weights: &BTreeMap<String, f64>) -> Result<usize, RegistryError> {
        let mut next: Vec<f64> = self.entries.iter().map(|e| e.profile.weight).collect();
        let mut matched = 0;
        for (name, weight) in weights {
            let Some(&idx) = self.index.get(name) else {
                debug!(factor = %name, "weight for unregistered factor ignored");
                continue;
            };
            if !weight.is_finite() || *weight < 0.0 {
                return Err(RegistryError::NegativeWeight {
                    factor: name.clone(),
                    weight: *weight,
                });
            }
            next[idx] = *weight;
            matched += 1;
        }

        normalize_weights(&mut next, self.tolerance)?;
        for (entry, weight) in self.entries.iter_mut().zip(next) {
            entry.profile.weight = weight;
        }
        info!(matched, "factor weights applied");
        Ok(matched)
    }

    pub fn profile(&self, name: &str) -> Option<&FactorProfile> {
        self.index.get(name).map(|&idx| &self.entries[idx].profile)
    }

    pub fn factor_info(&self, name: &str) -> Result<FactorInfo, RegistryError> {
        self.index
            .get(name)
            .map(|&idx| info_for(&self.entries[idx]))
            .ok_or_else(|| RegistryError::UnknownFactor {
                name: name.to_string(),
            })
    }

    /// Info for every factor in registration order.
    pub fn all_factor_info(&self) -> Vec<FactorInfo> {
        self.entries.iter().map(info_for).collect()
    }

    /// Current normalized weights by factor name.
    pub fn weights(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.profile.name.clone(), e.profile.weight))
            .collect()
    }

    pub fn category_summary(&self) -> BTreeMap<String, CategorySummary> {
        let mut out: BTreeMap<String, CategorySummary> = BTreeMap::new();
        for entry in &self.entries {
            let summary = out
                .entry(entry.profile.category.clone())
                .or_insert_with(|| CategorySummary {
                    factor_count: 0,
                    total_weight: 0.0,
                    factors: Vec::new(),
                });
            summary.factor_count += 1;
            summary.total_weight += entry.profile.weight;
            summary.factors.push(entry.profile.name.clone());
        }
        out
    }

    pub fn execution_stats(&self) -> ExecutionStats {
        ExecutionStats {
            games_scored: self.games_scored.load(Ordering::Relaxed),
            total_calculations: self.total_calculations.load(Ordering::Relaxed),
            successful_calculations: self.successful_calculations.load(Ordering::Relaxed),
            failed_calculations: self.failed_calculations.load(Ordering::Relaxed),
            factors_registered: self.entries.len(),
        }
    }

    /// Re-check the live configuration without failing.
    pub fn validate_configuration(&self) -> ConfigurationReport {
        let mut report = ConfigurationReport {
            total_factors: self.entries.len(),
            ..Default::default()
        };

        report.total_weight = self.entries.iter().map(|e| e.profile.weight).sum();
        if (report.total_weight - 1.0).abs() > self.tolerance {
            report.errors.push(format!(
                "Total weights sum to {:.3}, expected 1.0",
                report.total_weight
            ));
        }

        for entry in &self.entries {
            let name = &entry.profile.name;
            let range = entry.factor.output_range();
            if !range.is_valid() {
                report.errors.push(format!(
                    "Factor '{name}' has invalid output range: [{}, {}]",
                    range.min, range.max
                ));
            }
            if entry.profile.weight == 0.0 {
                report.warnings.push(format!("Factor '{name}' has zero weight"));
            }
            if entry.profile.category == edge_core::constants::DEFAULT_CATEGORY {
                report
                    .warnings
                    .push(format!("Factor '{name}' has no category"));
            }
        }

        report.categories = self.category_summary().len();
        report.valid = report.errors.is_empty();
        report
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn factor_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.profile.name.as_str())
    }

    /// Each factor with its live profile, in registration order.
    pub(crate) fn registered(&self) -> impl Iterator<Item = (&dyn Factor, &FactorProfile)> {
        self.entries.iter().map(|e| (e.factor.as_ref(), &e.profile))
    }
}

impl fmt::Debug for FactorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactorRegistry")
            .field("factors", &self.factor_names().collect::<Vec<_>>())
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

fn skipped(profile: &FactorProfile, reason: &str) -> FactorResult {
    let mut result = FactorResult::pending(
        &profile.name,
        profile.factor_type,
        &profile.category,
        profile.weight,
        profile.is_multiplicative,
    )
    .with_error(format!("Cannot calculate: {reason}"));
    result.explanation = Some(format!("Insufficient data: {reason}"));
    result
}

fn info_for(entry: &RegisteredFactor) -> FactorInfo {
    let p = &entry.profile;
    FactorInfo {
        name: p.name.clone(),
        description: p.description.clone(),
        category: p.category.clone(),
        factor_type: p.factor_type,
        weight: p.weight,
        original_weight: entry.original_weight,
        activation_threshold: p.activation_threshold,
        max_impact: p.max_impact,
        is_multiplicative: p.is_multiplicative,
        output_range: entry.factor.output_range(),
        required_data: entry.factor.required_data().as_map(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_core::types::FactorType;

    #[test]
    fn test_builtin_registry_normalizes_to_one() {
        let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
        assert_eq!(registry.len(), 12);
        let total: f64 = registry.weights().values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(registry.validate_configuration().valid);
    }

    #[test]
    fn test_hierarchy_applied_at_build() {
        let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
        let fatigue = registry.profile("SchedulingFatigue").unwrap();
        assert_eq!(fatigue.factor_type, FactorType::Primary);
        assert_eq!(fatigue.activation_threshold, 1.0);
        let market = registry.factor_info("MarketSentiment").unwrap();
        assert!(market.is_multiplicative);
        assert_eq!(market.original_weight, 1.0);
    }

    #[test]
    fn test_disabled_and_overridden_factors() {
        let mut config = RegistryConfig::default();
        config.disabled_factors = vec!["RevengeGame".to_string()];
        config.weight_overrides.insert("StyleMismatch".to_string(), 0.0);
        let registry = FactorRegistry::new(&config).unwrap();
        assert_eq!(registry.len(), 11);
        assert!(registry.profile("RevengeGame").is_none());
        assert_eq!(registry.profile("StyleMismatch").unwrap().weight, 0.0);
        assert!(registry
            .validate_configuration()
            .warnings
            .contains(&"Factor 'StyleMismatch' has zero weight".to_string()));
    }

    #[test]
    fn test_negative_override_is_rejected() {
        let mut config = RegistryConfig::default();
        config.weight_overrides.insert("RevengeGame".to_string(), -0.1);
        let err = FactorRegistry::new(&config).unwrap_err();
        assert!(matches!(err, RegistryError::NegativeWeight { .. }));
    }

    #[test]
    fn test_apply_weights_renormalizes_and_ignores_unknown() {
        let mut registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
        let mut weights: BTreeMap<String, f64> =
            registry.factor_names().map(|n| (n.to_string(), 1.0)).collect();
        weights.insert("NotAFactor".to_string(), 5.0);
        assert_eq!(registry.apply_weights(&weights).unwrap(), 12);
        for w in registry.weights().values() {
            assert!((w - 1.0 / 12.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unknown_factor_info_is_an_error() {
        let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
        assert_eq!(
            registry.factor_info("Nope"),
            Err(RegistryError::UnknownFactor { name: "Nope".to_string() })
        );
    }
}
