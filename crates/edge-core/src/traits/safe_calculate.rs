//! The isolation boundary around a single factor evaluation.
//!
//! `safe_calculate` never returns an error and never unwinds: validation
//! failures, calculation errors, non-finite outputs, and panics inside a
//! factor all become a failed `FactorResult`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use super::Factor;
use crate::constants::PRIMARY_CONFIDENCE_FLOOR;
use crate::errors::FactorError;
use crate::types::{FactorConfidence, FactorProfile, FactorResult, FactorType, GameContext};

/// Scale a base weight by confidence according to the factor's tier.
pub fn dynamic_weight(factor_type: FactorType, weight: f64, confidence: FactorConfidence) -> f64 {
    match factor_type {
        FactorType::Primary => weight * confidence.value().max(PRIMARY_CONFIDENCE_FLOOR),
        FactorType::Secondary => weight * confidence.value(),
        FactorType::Trigger => {
            if confidence == FactorConfidence::None {
                0.0
            } else {
                weight
            }
        }
        FactorType::Modifier => 1.0,
    }
}

/// Contribution of a validated value: a multiplier around 1.0 for
/// multiplicative factors, a point adjustment otherwise.
pub fn weighted_value(profile: &FactorProfile, validated_value: f64, dynamic_weight: f64) -> f64 {
    if profile.is_multiplicative {
        if profile.max_impact == 0.0 {
            return 1.0;
        }
        1.0 + validated_value * dynamic_weight / profile.max_impact
    } else {
        validated_value * dynamic_weight
    }
}

/// Run the full evaluation pipeline for one factor on one game.
///
/// `profile` is the registry's configured copy (normalized weight, assigned
/// tier), not necessarily what `factor.profile()` declares.
pub fn safe_calculate(
    factor: &dyn Factor,
    profile: &FactorProfile,
    home_team: &str,
    away_team: &str,
    context: Option<&GameContext>,
) -> FactorResult {
    let mut result = FactorResult::pending(
        &profile.name,
        profile.factor_type,
        &profile.category,
        profile.weight,
        profile.is_multiplicative,
    );

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run_pipeline(factor, profile, home_team, away_team, context, &mut result)
    }));

    let failure = match outcome {
        Ok(Ok(())) => return result,
        Ok(Err(err)) => err.to_string(),
        Err(payload) => format!("{} panicked: {}", profile.name, panic_message(payload.as_ref())),
    };

    warn!(factor = %profile.name, home_team, away_team, error = %failure, "factor calculation failed");
    result.dynamic_weight = 0.0;
    result.weighted_value = 0.0;
    result.value = 0.0;
    result.with_error(failure)
}

fn run_pipeline(
    factor: &dyn Factor,
    profile: &FactorProfile,
    home_team: &str,
    away_team: &str,
    context: Option<&GameContext>,
    result: &mut FactorResult,
) -> Result<(), FactorError> {
    factor.validate_teams(home_team, away_team)?;

    let reading = factor.calculate_with_confidence(home_team, away_team, context)?;
    if !reading.value.is_finite() {
        return Err(FactorError::NonFiniteOutput {
            factor: profile.name.clone(),
        });
    }
    result.raw_value = reading.value;
    result.confidence = Some(reading.confidence);

    if reading.value.abs() < profile.activation_threshold {
        result.success = true;
        result.activated = false;
        result.value = 0.0;
        result.reasoning = vec![format!(
            "Below activation threshold ({})",
            profile.activation_threshold
        )];
        result.explanation = Some("below activation threshold".to_string());
        return Ok(());
    }

    let validated = factor.validate_output(reading.value);
    let dw = dynamic_weight(profile.factor_type, profile.weight, reading.confidence);

    result.value = validated;
    result.dynamic_weight = dw;
    result.weighted_value = weighted_value(profile, validated, dw);
    result.reasoning = reading.reasoning;
    result.explanation = factor.explanation(home_team, away_team, validated, context);
    result.activated = true;
    result.success = true;

    debug!(
        factor = %profile.name,
        value = validated,
        confidence = %reading.confidence,
        dynamic_weight = dw,
        weighted_value = result.weighted_value,
        "factor evaluated"
    );
    Ok(())
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfidenceReading, OutputRange};

    struct Fixed {
        value: f64,
        confidence: FactorConfidence,
    }

    impl Factor for Fixed {
        fn name(&self) -> &str {
            "Fixed"
        }

        fn output_range(&self) -> OutputRange {
            OutputRange::symmetric(2.0)
        }

        fn calculate(&self, _: &str, _: &str, _: Option<&GameContext>) -> Result<f64, FactorError> {
            Ok(self.value)
        }

        fn calculate_with_confidence(
            &self,
            h: &str,
            a: &str,
            c: Option<&GameContext>,
        ) -> Result<ConfidenceReading, FactorError> {
            Ok(ConfidenceReading::new(self.calculate(h, a, c)?, self.confidence, vec![]))
        }
    }

    struct Panicky;

    impl Factor for Panicky {
        fn name(&self) -> &str {
            "Panicky"
        }

        fn calculate(&self, _: &str, _: &str, _: Option<&GameContext>) -> Result<f64, FactorError> {
            panic!("schedule index out of bounds")
        }
    }

    fn profile(factor_type: FactorType, weight: f64, threshold: f64) -> FactorProfile {
        FactorProfile::new("Fixed")
            .factor_type(factor_type)
            .weight(weight)
            .activation_threshold(threshold)
    }

    #[test]
    fn test_dynamic_weight_rules() {
        let high = FactorConfidence::High;
        assert_eq!(dynamic_weight(FactorType::Primary, 0.4, FactorConfidence::Low), 0.2);
        assert_eq!(dynamic_weight(FactorType::Primary, 0.4, high), 0.4 * 0.75);
        assert_eq!(dynamic_weight(FactorType::Secondary, 0.4, high), 0.4 * 0.75);
        assert_eq!(dynamic_weight(FactorType::Trigger, 0.4, FactorConfidence::None), 0.0);
        assert_eq!(dynamic_weight(FactorType::Trigger, 0.4, FactorConfidence::Low), 0.4);
        assert_eq!(dynamic_weight(FactorType::Modifier, 0.4, FactorConfidence::None), 1.0);
    }

    #[test]
    fn test_below_threshold_is_success_but_inactive() {
        let f = Fixed { value: -0.2, confidence: FactorConfidence::Low };
        let r = safe_calculate(&f, &profile(FactorType::Secondary, 0.3, 0.5), "A", "B", None);
        assert!(r.success);
        assert!(!r.activated);
        assert_eq!(r.value, 0.0);
        assert_eq!(r.raw_value, -0.2);
        assert_eq!(r.weighted_value, 0.0);
        assert_eq!(r.explanation.as_deref(), Some("below activation threshold"));
    }

    #[test]
    fn test_out_of_range_value_is_clamped_then_weighted() {
        let f = Fixed { value: 9.0, confidence: FactorConfidence::High };
        let r = safe_calculate(&f, &profile(FactorType::Primary, 0.5, 1.0), "A", "B", None);
        assert!(r.activated);
        assert_eq!(r.value, 2.0);
        assert_eq!(r.dynamic_weight, 0.5 * 0.75);
        assert_eq!(r.weighted_value, 2.0 * 0.5 * 0.75);
    }

    #[test]
    fn test_multiplicative_weighted_value() {
        let f = Fixed { value: 1.2, confidence: FactorConfidence::Low };
        let p = FactorProfile::new("Fixed")
            .factor_type(FactorType::Modifier)
            .weight(1.0)
            .activation_threshold(0.1)
            .max_impact(2.5)
            .multiplicative(true);
        let r = safe_calculate(&f, &p, "A", "B", None);
        assert!((r.weighted_value - (1.0 + 1.2 / 2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_teams_fail_without_panicking() {
        let f = Fixed { value: 1.0, confidence: FactorConfidence::High };
        let r = safe_calculate(&f, &profile(FactorType::Secondary, 0.3, 0.5), "Texas", "Texas", None);
        assert!(!r.success);
        assert!(!r.activated);
        assert_eq!(r.error.as_deref(), Some("Home and away teams cannot be the same"));
    }

    #[test]
    fn test_panicking_factor_is_isolated() {
        let p = FactorProfile::new("Panicky");
        let r = safe_calculate(&Panicky, &p, "A", "B", None);
        assert!(!r.success);
        assert!(!r.activated);
        assert!(r.error.unwrap().contains("schedule index out of bounds"));
    }

    #[test]
    fn test_non_finite_value_is_a_failure() {
        let f = Fixed { value: f64::NAN, confidence: FactorConfidence::High };
        let r = safe_calculate(&f, &profile(FactorType::Secondary, 0.3, 0.5), "A", "B", None);
        assert!(!r.success);
        assert_eq!(r.value, 0.0);
    }
}
