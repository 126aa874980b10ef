//! Quality checks for factor output.
//!
//! Every factor is run over a fixed slate of matchups and its outputs are
//! checked for uniformity, variety, range compliance, distribution,
//! response to context, determinism, edge-case handling and activation
//! rate. Nothing here changes the registry.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use edge_core::tracing::metrics;
use edge_core::traits::panic_message;
use edge_core::types::{FactorProfile, GameContext};
use edge_core::Factor;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::{debug, info, warn};

use crate::registry::FactorRegistry;

const UNIFORMITY_MAX_CV: f64 = 0.05;
const MIN_UNIQUE_VALUES: usize = 5;
const MIN_VARIETY_RATIO: f64 = 0.3;
const MIN_RANGE_UTILIZATION: f64 = 0.1;
const MAX_OUTLIER_RATIO: f64 = 0.15;
const MAX_ZERO_RATIO: f64 = 0.3;
const MIN_CONTEXT_CV: f64 = 0.1;
const CONSISTENCY_TOLERANCE: f64 = 1e-6;
const CONSISTENCY_SCENARIOS: usize = 3;
const CONSISTENCY_REPEATS: usize = 3;
const ZERO_EPSILON: f64 = 1e-10;
/// Share of checks a factor must pass to rate a warning instead of a fail.
const WARNING_PASS_SHARE: f64 = 0.7;

const SEASON: i32 = 2024;

const BASIC_MATCHUPS: &[(&str, &str, f64, u32)] = &[
    ("Alabama", "Vanderbilt", -28.0, 8),
    ("Ohio State", "Akron", -42.5, 3),
    ("Michigan", "Ohio State", -3.5, 13),
    ("Alabama", "Auburn", -7.0, 12),
    ("Texas", "Oklahoma", -4.5, 10),
    ("Georgia", "Tennessee", -2.5, 11),
    ("USC", "UCLA", -1.0, 12),
    ("Clemson", "Duke", 10.5, 9),
    ("Penn State", "Maryland", 14.0, 7),
    ("Michigan", "Wisconsin", -9.5, 12),
    ("Oregon", "Washington", -6.5, 11),
    ("Illinois", "Northwestern", -3.0, 11),
    ("Minnesota", "Iowa", 2.5, 10),
];

const WEEK_VARIATIONS: &[(&str, &str, f64, u32)] = &[
    ("Notre Dame", "Navy", -14.0, 1),
    ("Florida State", "Miami", -3.5, 6),
    ("LSU", "Texas A&M", -7.0, 13),
];

const SPREAD_VARIATIONS: &[(&str, &str, f64, u32)] = &[
    ("Kentucky", "Louisville", 0.0, 12),
    ("TCU", "Baylor", -21.5, 9),
    ("Virginia", "Virginia Tech", -35.5, 12),
];

const EDGE_CASES: &[(&str, &str, f64, u32)] = &[
    ("Duke", "Wake Forest", 0.0, 8),
    ("Georgia", "Georgia Southern", -49.5, 2),
    ("Alabama", "Miami", -14.0, 1),
    ("Ohio State", "Michigan", -7.0, 14),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    BasicMatchup,
    WeekVariation,
    SpreadVariation,
    EdgeCase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationScenario {
    pub home_team: String,
    pub away_team: String,
    pub kind: ScenarioKind,
    pub context: GameContext,
}

impl ValidationScenario {
    fn from_table(table: &[(&str, &str, f64, u32)], kind: ScenarioKind) -> Vec<Self> {
        table
            .iter()
            .map(|&(home, away, spread, week)| Self {
                home_team: home.to_string(),
                away_team: away.to_string(),
                kind,
                context: GameContext {
                    vegas_spread: Some(spread),
                    week: Some(week),
                    year: Some(SEASON),
                    ..GameContext::default()
                },
            })
            .collect()
    }

    fn label(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

/// One factor output on one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub home_team: String,
    pub away_team: String,
    pub kind: ScenarioKind,
    pub value: f64,
    pub is_zero: bool,
    pub is_activated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCheck {
    Uniformity,
    Variety,
    RangeCompliance,
    Distribution,
    ContextualResponse,
    Consistency,
    EdgeCases,
    Activation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Warning,
    Fail,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub verdict: Verdict,
    pub message: String,
}

impl CheckOutcome {
    fn new(verdict: Verdict, message: impl Into<String>) -> Self {
        Self {
            verdict,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorValidation {
    pub factor_name: String,
    pub verdict: Verdict,
    pub checks: BTreeMap<ValidationCheck, CheckOutcome>,
    pub outputs: Vec<ScenarioOutput>,
    pub tests_passed: usize,
    pub tests_total: usize,
    pub pass_rate: f64,
    /// Set when no scenario produced a value.
    pub error: Option<String>,
}

impl FactorValidation {
    pub fn check(&self, check: ValidationCheck) -> Option<&CheckOutcome> {
        self.checks.get(&check)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemHealth {
    Healthy,
    Moderate,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_factors: usize,
    pub passed_factors: usize,
    pub warning_factors: usize,
    pub failed_factors: usize,
    pub error_factors: usize,
    pub pass_rate: f64,
    /// Healthy at ≥ 80% passing, moderate at ≥ 60%, poor below.
    pub system_health: SystemHealth,
    pub scenarios_used: usize,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub factors: BTreeMap<String, FactorValidation>,
    pub summary: ValidationSummary,
    /// RFC 3339.
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct FactorValidator {
    scenarios: Vec<ValidationScenario>,
    edge_cases: Vec<ValidationScenario>,
}

impl Default for FactorValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FactorValidator {
    pub fn new() -> Self {
        let scenarios = [
            (BASIC_MATCHUPS, ScenarioKind::BasicMatchup),
            (WEEK_VARIATIONS, ScenarioKind::WeekVariation),
            (SPREAD_VARIATIONS, ScenarioKind::SpreadVariation),
        ]
        .into_iter()
        .flat_map(|(table, kind)| ValidationScenario::from_table(table, kind))
        .collect();
        Self {
            scenarios,
            edge_cases: ValidationScenario::from_table(EDGE_CASES, ScenarioKind::EdgeCase),
        }
    }

    pub fn scenarios(&self) -> &[ValidationScenario] {
        &self.scenarios
    }

    pub fn validate_all_factors(&self, registry: &FactorRegistry) -> ValidationReport {
        info!({ metrics::FACTOR_COUNT } = registry.len(), "factor validation started");
        let factors: BTreeMap<String, FactorValidation> = registry
            .registered()
            .map(|(factor, profile)| (profile.name.clone(), self.validate_factor(factor, profile)))
            .collect();
        let summary = self.summarize(&factors);
        info!(
            { metrics::FACTOR_COUNT } = summary.total_factors,
            passed = summary.passed_factors,
            health = ?summary.system_health,
            "factor validation finished"
        );
        ValidationReport {
            factors,
            summary,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Run every check on one factor. `profile` supplies the activation
    /// threshold in force.
    pub fn validate_factor(&self, factor: &dyn Factor, profile: &FactorProfile) -> FactorValidation {
        let name = profile.name.clone();
        let mut outputs = Vec::with_capacity(self.scenarios.len());
        let mut first_error = None;
        for scenario in &self.scenarios {
            match evaluate(factor, scenario) {
                Ok(value) => outputs.push(ScenarioOutput {
                    home_team: scenario.home_team.clone(),
                    away_team: scenario.away_team.clone(),
                    kind: scenario.kind,
                    value,
                    is_zero: value.abs() < ZERO_EPSILON,
                    is_activated: value.abs() > profile.activation_threshold,
                }),
                Err(e) => {
                    debug!(
                        factor = %name,
                        scenario = %scenario.label(),
                        error = %e,
                        "scenario evaluation failed"
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        if outputs.is_empty() {
            let error = first_error.unwrap_or_else(|| "No valid outputs generated".to_string());
            warn!(factor = %name, error = %error, "factor produced no outputs");
            return FactorValidation {
                factor_name: name,
                verdict: Verdict::Error,
                checks: BTreeMap::new(),
                outputs,
                tests_passed: 0,
                tests_total: 0,
                pass_rate: 0.0,
                error: Some(error),
            };
        }

        let values: Vec<f64> = outputs.iter().map(|o| o.value).collect();
        let checks: BTreeMap<ValidationCheck, CheckOutcome> = [
            (ValidationCheck::Uniformity, uniformity(&outputs)),
            (ValidationCheck::Variety, variety(&values)),
            (ValidationCheck::RangeCompliance, range_compliance(factor, &values)),
            (ValidationCheck::Distribution, distribution(&outputs)),
            (ValidationCheck::ContextualResponse, contextual_response(&outputs)),
            (ValidationCheck::Consistency, self.consistency(factor)),
            (ValidationCheck::EdgeCases, self.edge_case_handling(factor)),
            (ValidationCheck::Activation, activation(&outputs)),
        ]
        .into_iter()
        .collect();

        let tests_total = checks.len();
        let tests_passed = checks.values().filter(|c| c.verdict == Verdict::Pass).count();
        let verdict = if tests_passed == tests_total {
            Verdict::Pass
        } else if tests_passed as f64 >= tests_total as f64 * WARNING_PASS_SHARE {
            Verdict::Warning
        } else {
            Verdict::Fail
        };

        if verdict == Verdict::Fail {
            warn!(factor = %name, tests_passed, tests_total, "factor failed validation");
        } else {
            debug!(factor = %name, tests_passed, tests_total, "factor validated");
        }

        FactorValidation {
            factor_name: name,
            verdict,
            checks,
            outputs,
            tests_passed,
            tests_total,
            pass_rate: tests_passed as f64 / tests_total as f64,
            error: None,
        }
    }

    fn consistency(&self, factor: &dyn Factor) -> CheckOutcome {
        let checked = &self.scenarios[..CONSISTENCY_SCENARIOS.min(self.scenarios.len())];
        let inconsistent = checked
            .iter()
            .filter(|scenario| {
                let runs: Result<Vec<f64>, String> =
                    (0..CONSISTENCY_REPEATS).map(|_| evaluate(factor, scenario)).collect();
                match runs {
                    Ok(values) => values
                        .iter()
                        .any(|v| (v - values[0]).abs() >= CONSISTENCY_TOLERANCE),
                    Err(_) => true,
                }
            })
            .count();

        if inconsistent > 0 {
            CheckOutcome::new(
                Verdict::Fail,
                format!("Deterministic inconsistencies detected in {inconsistent} scenarios"),
            )
        } else {
            CheckOutcome::new(
                Verdict::Pass,
                "Factor produces consistent outputs for identical inputs",
            )
        }
    }

    fn edge_case_handling(&self, factor: &dyn Factor) -> CheckOutcome {
        let errors = self
            .edge_cases
            .iter()
            .filter(|scenario| evaluate(factor, scenario).is_err())
            .count();
        if errors > 0 {
            CheckOutcome::new(Verdict::Fail, format!("Errors in {errors} edge cases"))
        } else {
            CheckOutcome::new(
                Verdict::Pass,
                format!("Handled {} edge cases successfully", self.edge_cases.len()),
            )
        }
    }

    fn summarize(&self, factors: &BTreeMap<String, FactorValidation>) -> ValidationSummary {
        let count = |verdict: Verdict| factors.values().filter(|f| f.verdict == verdict).count();
        let total_factors = factors.len();
        let passed_factors = count(Verdict::Pass);
        let share = passed_factors as f64 / total_factors.max(1) as f64;
        let system_health = if share >= 0.8 {
            SystemHealth::Healthy
        } else if share >= 0.6 {
            SystemHealth::Moderate
        } else {
            SystemHealth::Poor
        };

        ValidationSummary {
            total_factors,
            passed_factors,
            warning_factors: count(Verdict::Warning),
            failed_factors: count(Verdict::Fail),
            error_factors: count(Verdict::Error),
            pass_rate: share,
            system_health,
            scenarios_used: self.scenarios.len(),
            recommendations: recommendations(factors),
        }
    }
}

/// One guarded `calculate` call. Errors, panics and non-finite values all
/// come back as `Err`.
fn evaluate(factor: &dyn Factor, scenario: &ValidationScenario) -> Result<f64, String> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        factor.calculate(&scenario.home_team, &scenario.away_team, Some(&scenario.context))
    }));
    match outcome {
        Ok(Ok(value)) if value.is_finite() => Ok(value),
        Ok(Ok(value)) => Err(format!("non-finite output {value}")),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn distinct(values: &[f64], scale: f64) -> usize {
    values
        .iter()
        .map(|v| (v * scale).round() as i64)
        .collect::<FxHashSet<_>>()
        .len()
}

/// Sample standard deviation; 0.0 below two values.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        0.0
    } else {
        values.iter().std_dev()
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn uniformity(outputs: &[ScenarioOutput]) -> CheckOutcome {
    let values: Vec<f64> = outputs.iter().filter(|o| !o.is_zero).map(|o| o.value).collect();
    if values.len() < 3 {
        return CheckOutcome::new(
            Verdict::Warning,
            "Insufficient non-zero values for uniformity test",
        );
    }
    let mean = values.iter().mean();
    let cv = if mean == 0.0 {
        f64::INFINITY
    } else {
        (std_dev(&values) / mean).abs()
    };

    if distinct(&values, 1e6) == 1 {
        CheckOutcome::new(
            Verdict::Fail,
            format!("Uniform output detected: all values = {:.6}", values[0]),
        )
    } else if cv < UNIFORMITY_MAX_CV {
        CheckOutcome::new(Verdict::Warning, format!("Very low variation detected (CV = {cv:.6})"))
    } else {
        CheckOutcome::new(Verdict::Pass, format!("Good variation detected (CV = {cv:.3})"))
    }
}

fn variety(values: &[f64]) -> CheckOutcome {
    let unique = distinct(values, 1e3);
    let ratio = unique as f64 / values.len() as f64;
    if unique < MIN_UNIQUE_VALUES {
        CheckOutcome::new(
            Verdict::Fail,
            format!(
                "Insufficient variety: only {unique} unique values across {} tests",
                values.len()
            ),
        )
    } else if ratio < MIN_VARIETY_RATIO {
        CheckOutcome::new(Verdict::Warning, format!("Low variety: {} unique values", percent(ratio)))
    } else {
        CheckOutcome::new(
            Verdict::Pass,
            format!("Good variety: {unique} unique values ({})", percent(ratio)),
        )
    }
}

fn range_compliance(factor: &dyn Factor, values: &[f64]) -> CheckOutcome {
    let range = factor.output_range();
    let violations = values.iter().filter(|v| !range.contains(**v)).count();
    if violations > 0 {
        return CheckOutcome::new(
            Verdict::Fail,
            format!(
                "{violations} values outside expected range [{}, {}]",
                range.min, range.max
            ),
        );
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = range.max - range.min;
    let utilization = if span > 0.0 { (hi - lo) / span } else { 0.0 };
    if utilization < MIN_RANGE_UTILIZATION {
        CheckOutcome::new(
            Verdict::Warning,
            format!("Low range utilization: {} of expected range", percent(utilization)),
        )
    } else {
        CheckOutcome::new(
            Verdict::Pass,
            format!("Good range compliance: {} utilization", percent(utilization)),
        )
    }
}

fn distribution(outputs: &[ScenarioOutput]) -> CheckOutcome {
    let zeros = outputs.iter().filter(|o| o.is_zero).count();
    let zero_ratio = zeros as f64 / outputs.len() as f64;
    if zero_ratio > MAX_ZERO_RATIO {
        return CheckOutcome::new(
            Verdict::Fail,
            format!("Too many zero outputs: {}", percent(zero_ratio)),
        );
    }

    let values: Vec<f64> = outputs.iter().map(|o| o.value).collect();
    if values.len() > 2 {
        let mean = values.iter().mean();
        let sd = std_dev(&values);
        if sd > 0.0 {
            let outliers = values.iter().filter(|v| (*v - mean).abs() > 2.0 * sd).count();
            let outlier_ratio = outliers as f64 / values.len() as f64;
            if outlier_ratio > MAX_OUTLIER_RATIO {
                return CheckOutcome::new(
                    Verdict::Warning,
                    format!("High outlier ratio: {}", percent(outlier_ratio)),
                );
            }
        }
    }

    CheckOutcome::new(
        Verdict::Pass,
        format!("Good distribution: {} zeros", percent(zero_ratio)),
    )
}

fn contextual_response(outputs: &[ScenarioOutput]) -> CheckOutcome {
    let mut by_kind: BTreeMap<ScenarioKind, Vec<f64>> = BTreeMap::new();
    for output in outputs {
        by_kind.entry(output.kind).or_default().push(output.value);
    }
    let variations: Vec<f64> = by_kind
        .values()
        .filter(|values| values.len() > 1)
        .map(|values| {
            let mean = values.iter().mean();
            if mean == 0.0 {
                0.0
            } else {
                (std_dev(values) / mean).abs()
            }
        })
        .collect();
    let average = if variations.is_empty() {
        0.0
    } else {
        variations.iter().mean()
    };

    if average < MIN_CONTEXT_CV {
        CheckOutcome::new(
            Verdict::Warning,
            format!("Low contextual responsiveness: avg CV = {average:.3}"),
        )
    } else {
        CheckOutcome::new(
            Verdict::Pass,
            format!("Good contextual responsiveness: avg CV = {average:.3}"),
        )
    }
}

fn activation(outputs: &[ScenarioOutput]) -> CheckOutcome {
    let activated = outputs.iter().filter(|o| o.is_activated).count();
    if activated == 0 {
        CheckOutcome::new(
            Verdict::Warning,
            "Factor never activates - may need threshold adjustment",
        )
    } else if activated == outputs.len() {
        CheckOutcome::new(
            Verdict::Warning,
            "Factor always activates - may need threshold adjustment",
        )
    } else {
        let rate = activated as f64 / outputs.len() as f64;
        CheckOutcome::new(
            Verdict::Pass,
            format!("Good activation pattern: {} activation rate", percent(rate)),
        )
    }
}

fn recommendations(factors: &BTreeMap<String, FactorValidation>) -> Vec<String> {
    let failing = |check: ValidationCheck| -> Vec<&str> {
        factors
            .values()
            .filter(|f| f.check(check).is_some_and(|c| c.verdict == Verdict::Fail))
            .map(|f| f.factor_name.as_str())
            .collect()
    };

    let mut out = Vec::new();
    let uniform = failing(ValidationCheck::Uniformity);
    if !uniform.is_empty() {
        out.push(format!("Fix uniform output in factors: {}", uniform.join(", ")));
    }
    let low_variety = failing(ValidationCheck::Variety);
    if !low_variety.is_empty() {
        out.push(format!("Increase output variety in factors: {}", low_variety.join(", ")));
    }
    let errored: Vec<&str> = factors
        .values()
        .filter(|f| f.verdict == Verdict::Error)
        .map(|f| f.factor_name.as_str())
        .collect();
    if !errored.is_empty() {
        out.push(format!("Fix critical errors in factors: {}", errored.join(", ")));
    }
    if out.is_empty() {
        out.push("All factors are performing well - no critical issues detected".to_string());
    }
    out
}
