//! Per-game aggregation output.

use std::collections::BTreeMap;

use edge_core::types::{FactorResult, FactorType};
use serde::{Deserialize, Serialize};

/// Aggregate numbers for one `calculate_all_factors` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    /// Sum of weighted values over active additive factors.
    pub total_adjustment: f64,
    /// Product of weighted values over active multiplicative factors.
    pub multiplicative_adjustment: f64,
    /// Additive sums per category.
    pub category_adjustments: BTreeMap<String, f64>,
    pub factors_calculated: usize,
    pub factors_successful: usize,
    pub factors_failed: usize,
    pub factors_activated: usize,
    pub primary_signals: usize,
    pub secondary_signals: usize,
    /// Mean confidence value over results that produced a confidence.
    pub avg_confidence: f64,
    /// `factors_successful / factors_calculated`.
    pub data_quality_impact: f64,
}

impl Default for PredictionSummary {
    fn default() -> Self {
        Self {
            total_adjustment: 0.0,
            multiplicative_adjustment: 1.0,
            category_adjustments: BTreeMap::new(),
            factors_calculated: 0,
            factors_successful: 0,
            factors_failed: 0,
            factors_activated: 0,
            primary_signals: 0,
            secondary_signals: 0,
            avg_confidence: 0.0,
            data_quality_impact: 0.0,
        }
    }
}

impl PredictionSummary {
    /// Fold one factor result into the running totals. Call `finish` once
    /// every result has been recorded.
    pub(crate) fn record(&mut self, result: &FactorResult) {
        self.factors_calculated += 1;
        if result.success {
            self.factors_successful += 1;
        } else {
            self.factors_failed += 1;
        }
        if !result.is_active() {
            return;
        }

        self.factors_activated += 1;
        match result.factor_type {
            FactorType::Primary => self.primary_signals += 1,
            FactorType::Secondary => self.secondary_signals += 1,
            FactorType::Trigger | FactorType::Modifier => {}
        }

        if result.is_multiplicative {
            self.multiplicative_adjustment *= result.weighted_value;
        } else {
            let amount = result.dynamic_weight * result.value;
            self.total_adjustment += amount;
            *self
                .category_adjustments
                .entry(result.category.clone())
                .or_insert(0.0) += amount;
        }
    }

    pub(crate) fn finish<'a>(&mut self, results: impl Iterator<Item = &'a FactorResult>) {
        let confidences: Vec<f64> = results
            .filter_map(|r| r.confidence.map(|c| c.value()))
            .collect();
        self.avg_confidence = if confidences.is_empty() {
            0.0
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };
        self.data_quality_impact = if self.factors_calculated == 0 {
            0.0
        } else {
            self.factors_successful as f64 / self.factors_calculated as f64
        };
    }
}

/// Every factor result for one matchup plus the aggregate summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorAnalysis {
    pub home_team: String,
    pub away_team: String,
    pub factors: BTreeMap<String, FactorResult>,
    pub summary: PredictionSummary,
}

impl FactorAnalysis {
    /// Results that succeeded and cleared their activation threshold.
    pub fn active_results(&self) -> impl Iterator<Item = &FactorResult> {
        self.factors.values().filter(|r| r.is_active())
    }

    pub fn result(&self, name: &str) -> Option<&FactorResult> {
        self.factors.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_core::types::FactorConfidence;

    fn active(name: &str, ty: FactorType, value: f64, dw: f64, mult: bool) -> FactorResult {
        let mut r = FactorResult::pending(name, ty, "situational_context", dw, mult);
        r.success = true;
        r.activated = true;
        r.value = value;
        r.dynamic_weight = dw;
        r.weighted_value = if mult { 1.0 + value * dw / 2.5 } else { value * dw };
        r.confidence = Some(FactorConfidence::High);
        r
    }

    #[test]
    fn test_partition_into_sum_and_product() {
        let results = [
            active("A", FactorType::Primary, 2.0, 0.375, false),
            active("C", FactorType::Modifier, 1.2, 1.0, true),
            FactorResult::pending("F", FactorType::Secondary, "x", 0.1, false).with_error("boom"),
        ];
        let mut s = PredictionSummary::default();
        results.iter().for_each(|r| s.record(r));
        s.finish(results.iter());

        assert_eq!(s.total_adjustment, 0.75);
        assert!((s.multiplicative_adjustment - 1.48).abs() < 1e-12);
        assert_eq!(s.category_adjustments["situational_context"], 0.75);
        assert_eq!((s.factors_calculated, s.factors_successful, s.factors_failed), (3, 2, 1));
        assert_eq!((s.primary_signals, s.secondary_signals), (1, 0));
        assert_eq!(s.avg_confidence, 0.75);
        assert!((s.data_quality_impact - 2.0 / 3.0).abs() < 1e-12);
    }
}
