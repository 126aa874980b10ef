//! Market sentiment: a contrarian signal built from line movement and
//! game characteristics that attract public money.
//!
//! The factor reports the signed deviation from a neutral market, so 0.0
//! means no signal. The registry turns it into a multiplier around 1.0.

use edge_core::errors::FactorError;
use edge_core::types::{
    BookLine, ConfidenceReading, DataKind, FactorConfidence, FactorProfile, FactorType,
    GameContext, OutputRange, RequiredData,
};
use edge_core::Factor;
use tracing::{debug, info};

use super::SITUATIONAL_CONTEXT;

/// Programs that draw recreational money regardless of the number.
const BIG_NAMES: &[&str] = &[
    "ALABAMA",
    "GEORGIA",
    "OHIO STATE",
    "TEXAS",
    "USC",
    "NOTRE DAME",
    "MICHIGAN",
    "PENN STATE",
    "FLORIDA",
    "LSU",
    "CLEMSON",
    "OKLAHOMA",
];

const NEUTRAL: f64 = 0.0;
const SENTIMENT_SCALE: f64 = 0.4;
const LINE_MOVEMENT_SHARE: f64 = 0.7;
const MIN_MOVEMENT: f64 = 0.5;

#[derive(Debug, Default, Clone, Copy)]
pub struct MarketSentiment;

impl MarketSentiment {
    /// Signal for one book's movement from open. Positive movement means
    /// the line moved toward the favorite.
    fn interpret_movement(movement: f64) -> f64 {
        let magnitude = movement.abs();
        if magnitude < MIN_MOVEMENT {
            return 0.0;
        }
        let strength = if magnitude >= 2.0 {
            1.0
        } else if magnitude >= 1.0 {
            0.7
        } else {
            0.4
        };
        if movement > 0.0 {
            strength
        } else {
            -strength * 0.5
        }
    }

    /// Average movement signal across books quoting both an open and a
    /// current spread.
    fn line_movement(lines: &[BookLine]) -> f64 {
        let signals: Vec<f64> = lines
            .iter()
            .filter_map(|line| Some(Self::interpret_movement(line.spread? - line.spread_open?)))
            .collect();
        if signals.is_empty() {
            return 0.0;
        }
        signals.iter().sum::<f64>() / signals.len() as f64
    }

    fn is_big_name(team: &str) -> bool {
        let team = team.trim().to_uppercase();
        BIG_NAMES.contains(&team.as_str())
    }

    fn characteristics(home_team: &str, away_team: &str, spread: f64, week: u32) -> Vec<f64> {
        let mut signals = Vec::with_capacity(4);

        let magnitude = spread.abs();
        if magnitude > 14.0 {
            signals.push(0.3);
        } else if magnitude > 7.0 {
            signals.push(0.1);
        } else if magnitude < 3.0 {
            signals.push(-0.2);
        }

        let (home_big, away_big) = (Self::is_big_name(home_team), Self::is_big_name(away_team));
        if home_big && !away_big && spread < -7.0 {
            signals.push(0.4);
        } else if away_big && !home_big && spread > 7.0 {
            signals.push(0.4);
        } else if home_big && away_big {
            signals.push(-0.1);
        }

        match week {
            1 => signals.push(-0.3),
            w if w <= 3 => signals.push(0.1),
            w if w >= 10 => signals.push(0.2),
            _ => {}
        }

        if (spread % 1.0).abs() == 0.5 {
            signals.push(-0.1);
        } else {
            signals.push(0.1);
        }
        signals
    }

    /// Combined sentiment in `[-1, 1]`.
    fn sentiment(home_team: &str, away_team: &str, spread: f64, context: &GameContext) -> f64 {
        let line = Self::line_movement(&context.betting_lines);
        let week = context.week.unwrap_or(1);
        let chars = Self::characteristics(home_team, away_team, spread, week);
        let chars_mean = if chars.is_empty() {
            0.0
        } else {
            chars.iter().sum::<f64>() / chars.len() as f64
        };

        let combined = if line != 0.0 {
            if line.abs() > 0.3 {
                info!(home_team, away_team, signal = line, "significant line movement");
            }
            line * LINE_MOVEMENT_SHARE + chars_mean * (1.0 - LINE_MOVEMENT_SHARE)
        } else {
            chars_mean
        };
        combined.clamp(-1.0, 1.0)
    }
}

impl Factor for MarketSentiment {
    fn name(&self) -> &str {
        "MarketSentiment"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Detects sharp money moving against public sentiment")
            .category(SITUATIONAL_CONTEXT)
            .weight(1.0)
            .factor_type(FactorType::Modifier)
            .activation_threshold(0.1)
            .max_impact(2.5)
            .multiplicative(true)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(0.5)
    }

    fn required_data(&self) -> RequiredData {
        RequiredData::none().with(DataKind::BettingData)
    }

    fn calculate(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        let Some((context, spread)) = context.and_then(|c| Some((c, c.current_spread()?))) else {
            return Ok(NEUTRAL);
        };
        let deviation = Self::sentiment(home_team, away_team, spread, context) * SENTIMENT_SCALE;
        if deviation.abs() > 0.1 {
            let direction = if deviation > NEUTRAL { "amplifies" } else { "dampens" };
            debug!(home_team, away_team, deviation, direction, "market sentiment modifier");
        }
        Ok(self.validate_output(deviation))
    }

    fn calculate_with_confidence(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<ConfidenceReading, FactorError> {
        let value = self.calculate(home_team, away_team, context)?;
        if context.is_none() {
            return Ok(ConfidenceReading::new(
                value,
                FactorConfidence::None,
                vec!["No market data available".to_string()],
            ));
        }

        let (confidence, reason) = match value.abs() {
            d if d > 0.4 => (FactorConfidence::VeryHigh, "Strong market sentiment divergence detected"),
            d if d > 0.25 => (FactorConfidence::High, "Clear sharp vs public split identified"),
            d if d > 0.15 => (FactorConfidence::Medium, "Moderate betting pattern divergence"),
            d if d > 0.05 => (FactorConfidence::Low, "Slight market sentiment signal"),
            _ => (FactorConfidence::None, "No significant market sentiment"),
        };
        let mut reasoning = vec![reason.to_string()];
        if value > 0.2 {
            reasoning.push("Sharp money aligned with contrarian position".to_string());
        } else if value < -0.2 {
            reasoning.push("Market sentiment suggests caution".to_string());
        }
        Ok(ConfidenceReading::new(value, confidence, reasoning))
    }

    fn explanation(
        &self,
        _home_team: &str,
        _away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.05 {
            return Some("No significant market sentiment signal".to_string());
        }
        let shift = value * 100.0;
        if value > NEUTRAL {
            let strength = match value {
                v if v > 0.3 => "strong",
                v if v > 0.15 => "moderate",
                _ => "slight",
            };
            Some(format!(
                "Market sentiment shows {strength} sharp money support ({shift:+.0}% deviation)"
            ))
        } else {
            let strength = match value {
                v if v < -0.3 => "strong",
                v if v < -0.15 => "moderate",
                _ => "slight",
            };
            Some(format!(
                "Market sentiment suggests {strength} caution ({shift:+.0}% deviation)"
            ))
        }
    }
}
