//! The factor contract.
//!
//! A factor is an independent scoring unit: given two teams and the game
//! context it produces a signed adjustment in points (positive favors the
//! home team). Implementations must be pure for fixed inputs and hold no
//! per-call mutable state, since the registry evaluates them concurrently
//! across games.

use crate::constants::{DEFAULT_OUTPUT_BOUND, NEUTRAL_IMPACT_EPSILON};
use crate::errors::FactorError;
use crate::types::{
    Availability, ConfidenceReading, FactorConfidence, FactorProfile, GameContext, OutputRange,
    RequiredData,
};

/// Both teams named and distinct.
pub fn validate_matchup(home_team: &str, away_team: &str) -> Result<(), FactorError> {
    if home_team.trim().is_empty() || away_team.trim().is_empty() {
        return Err(FactorError::invalid_input(
            "Both home and away teams must be provided",
        ));
    }
    if home_team == away_team {
        return Err(FactorError::invalid_input(
            "Home and away teams cannot be the same",
        ));
    }
    Ok(())
}

pub trait Factor: Send + Sync {
    /// Unique identity used as the registry key.
    fn name(&self) -> &str;

    /// Declared defaults for weight, tier, threshold, and impact.
    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(DEFAULT_OUTPUT_BOUND)
    }

    fn required_data(&self) -> RequiredData {
        RequiredData::none()
    }

    /// Raw signed adjustment for the matchup.
    fn calculate(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError>;

    /// Value plus confidence and reasoning. The default derives confidence
    /// from the magnitude of `calculate`.
    fn calculate_with_confidence(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<ConfidenceReading, FactorError> {
        let value = self.calculate(home_team, away_team, context)?;
        Ok(ConfidenceReading::new(
            value,
            FactorConfidence::from_magnitude(value),
            vec![format!("Factor value: {value:.2}")],
        ))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        let name = self.name();
        if value.abs() < NEUTRAL_IMPACT_EPSILON {
            Some(format!("{name}: Neutral impact"))
        } else if value > 0.0 {
            Some(format!("{name}: Favors {home_team} (+{value:.1})"))
        } else {
            Some(format!("{name}: Favors {away_team} ({value:.1})"))
        }
    }

    fn validate_teams(&self, home_team: &str, away_team: &str) -> Result<(), FactorError> {
        validate_matchup(home_team, away_team)
    }

    /// Clamp into `output_range`; non-finite values become 0.0.
    fn validate_output(&self, value: f64) -> f64 {
        self.output_range().clamp_logged(self.name(), value)
    }

    /// Pre-flight check against `required_data`.
    fn can_calculate(&self, context: Option<&GameContext>) -> Availability {
        let Some(context) = context else {
            return Availability::unavailable("No context data provided");
        };
        match self
            .required_data()
            .required()
            .find(|kind| !context.has_data(*kind))
        {
            Some(kind) => Availability::unavailable(format!("Missing required data: {kind}")),
            None => Availability::Available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataKind;

    struct Constant(f64);

    impl Factor for Constant {
        fn name(&self) -> &str {
            "Constant"
        }

        fn required_data(&self) -> RequiredData {
            RequiredData::none().with(DataKind::BettingData)
        }

        fn calculate(&self, _: &str, _: &str, _: Option<&GameContext>) -> Result<f64, FactorError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_validate_teams_rejects_empty_and_identical() {
        let f = Constant(1.0);
        assert!(f.validate_teams("", "Texas").is_err());
        assert!(f.validate_teams("Texas", "Texas").is_err());
        assert!(f.validate_teams("Texas", "Oklahoma").is_ok());
    }

    #[test]
    fn test_default_confidence_and_reasoning() {
        let reading = Constant(1.6).calculate_with_confidence("A", "B", None).unwrap();
        assert_eq!(reading.confidence, FactorConfidence::Medium);
        assert_eq!(reading.reasoning, vec!["Factor value: 1.60".to_string()]);
    }

    #[test]
    fn test_default_explanation_text() {
        let f = Constant(0.0);
        assert_eq!(f.explanation("A", "B", 0.05, None).unwrap(), "Constant: Neutral impact");
        assert_eq!(f.explanation("A", "B", 1.26, None).unwrap(), "Constant: Favors A (+1.3)");
        assert_eq!(f.explanation("A", "B", -2.0, None).unwrap(), "Constant: Favors B (-2.0)");
    }

    #[test]
    fn test_can_calculate_reports_reason() {
        let f = Constant(0.0);
        assert_eq!(
            f.can_calculate(None).reason(),
            Some("No context data provided")
        );
        let ctx = GameContext::default();
        assert_eq!(
            f.can_calculate(Some(&ctx)).reason(),
            Some("Missing required data: betting_data")
        );
        let ctx = GameContext {
            vegas_spread: Some(-7.0),
            ..GameContext::default()
        };
        assert!(f.can_calculate(Some(&ctx)).is_available());
    }
}
