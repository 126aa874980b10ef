//! Variance detector.
//!
//! Measures how much the active factors of a game agree. High dispersion
//! flags an uncertain game; the recommendation scales the stake down
//! accordingly.

pub mod categories;
mod directional;
pub mod metrics;
mod outliers;
mod recommendation;
pub mod types;

pub use categories::factor_group;
pub use metrics::variance_metrics;
pub use types::*;

use edge_core::config::VarianceConfig;
use edge_core::tracing::metrics as fields;
use edge_core::types::{FactorResult, FactorType};
use edge_factors::FactorAnalysis;
use tracing::debug;

/// The slice of a factor result the analysis needs.
#[derive(Debug, Clone)]
pub(crate) struct ActiveFactor {
    pub(crate) name: String,
    pub(crate) value: f64,
    pub(crate) is_primary: bool,
    pub(crate) group: FactorGroup,
}

impl ActiveFactor {
    fn from_result(result: &FactorResult) -> Self {
        Self {
            name: result.factor_name.clone(),
            value: result.value,
            is_primary: result.factor_type == FactorType::Primary,
            group: factor_group(&result.factor_name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VarianceDetector {
    min_active_factors: usize,
    outlier_z_threshold: f64,
    level_thresholds: [f64; 4],
}

impl Default for VarianceDetector {
    fn default() -> Self {
        Self::new(&VarianceConfig::default())
    }
}

impl VarianceDetector {
    pub fn new(config: &VarianceConfig) -> Self {
        Self {
            min_active_factors: config.effective_min_active_factors(),
            outlier_z_threshold: config.effective_outlier_z_threshold(),
            level_thresholds: config.effective_level_thresholds(),
        }
    }

    pub fn level_for(&self, cv: f64) -> VarianceLevel {
        VarianceLevel::from_cv(cv, &self.level_thresholds)
    }

    pub fn analyze_factor_variance(&self, analysis: &FactorAnalysis) -> VarianceAnalysis {
        self.analyze_results(analysis.factors.values())
    }

    /// Analyze any set of factor results. Only successful, activated
    /// results take part.
    pub fn analyze_results<'a>(
        &self,
        results: impl IntoIterator<Item = &'a FactorResult>,
    ) -> VarianceAnalysis {
        let active: Vec<ActiveFactor> = results
            .into_iter()
            .filter(|r| r.is_active())
            .map(ActiveFactor::from_result)
            .collect();

        if active.len() < self.min_active_factors {
            debug!(active = active.len(), "too few active factors for variance analysis");
            return VarianceAnalysis::insufficient_data();
        }

        let values: Vec<f64> = active.iter().map(|f| f.value).collect();
        let overall = variance_metrics(&values);
        let directional = directional::directional_agreement(&active);
        let category_variance = categories::category_variance(&active);
        let outlier_factors =
            outliers::outlier_factors(&active, &overall, self.outlier_z_threshold);
        let level = self.level_for(overall.coefficient_of_variation);

        debug!(
            { fields::COEFFICIENT_OF_VARIATION } = overall.coefficient_of_variation,
            level = %level,
            outliers = outlier_factors.len(),
            "factor variance analyzed"
        );

        VarianceAnalysis {
            variance_level: level,
            overall_metrics: Some(overall),
            implications: recommendation::implications(level, &directional, &category_variance),
            recommendation: recommendation::recommendation(level, &directional),
            directional_agreement: Some(directional),
            category_variance: Some(category_variance),
            outlier_factors,
            factors_analyzed: active.len(),
        }
    }
}
