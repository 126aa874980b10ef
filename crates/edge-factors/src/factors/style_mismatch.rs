//! Style mismatch: how each side's strengths line up against the other's
//! weaknesses in advanced metrics.

use edge_core::errors::FactorError;
use edge_core::types::{
    ConfidenceReading, DataKind, FactorConfidence, FactorProfile, FactorType, GameContext,
    OutputRange, RequiredData, TeamStats,
};
use edge_core::Factor;
use tracing::debug;

use super::{favored, team_data, Side, SITUATIONAL_CONTEXT};

const SUCCESS_RATE_WEIGHT: f64 = 2.0;
const EXPLOSIVENESS_WEIGHT: f64 = 1.5;
const PACE_WEIGHT: f64 = 1.2;
const RUN_PASS_WEIGHT: f64 = 1.0;
const HAVOC_WEIGHT: f64 = 0.8;
const COMPONENT_NORMALIZER: f64 = 6.0;
const MIN_SUCCESS_DIFF: f64 = 0.05;
const SLOWER_PACE_ADVANTAGE: f64 = 0.3;

/// Team metrics with league-typical fallbacks for anything not reported.
#[derive(Debug, Clone, Copy)]
struct Metrics {
    success_off: f64,
    success_def: f64,
    standard_downs_off: f64,
    standard_downs_def: f64,
    passing_downs_off: f64,
    passing_downs_def: f64,
    explosiveness_off: f64,
    explosiveness_def: f64,
    ppa_off: f64,
    ppa_def: f64,
    rushing_off: f64,
    rushing_def: f64,
    passing_off: f64,
    passing_def: f64,
    power_off: f64,
    stuff_rate_def: f64,
    plays_per_game: f64,
    havoc_rate: f64,
}

impl From<&TeamStats> for Metrics {
    fn from(s: &TeamStats) -> Self {
        Self {
            success_off: s.success_rate_off.unwrap_or(0.40),
            success_def: s.success_rate_def.unwrap_or(0.40),
            standard_downs_off: s.standard_downs_success_off.unwrap_or(0.45),
            standard_downs_def: s.standard_downs_success_def.unwrap_or(0.45),
            passing_downs_off: s.passing_downs_success_off.unwrap_or(0.25),
            passing_downs_def: s.passing_downs_success_def.unwrap_or(0.25),
            explosiveness_off: s.explosiveness_off.unwrap_or(1.0),
            explosiveness_def: s.explosiveness_def.unwrap_or(1.0),
            ppa_off: s.ppa_off.unwrap_or(0.0),
            ppa_def: s.ppa_def.unwrap_or(0.0),
            rushing_off: s.rushing_success_off.unwrap_or(0.40),
            rushing_def: s.rushing_success_def.unwrap_or(0.40),
            passing_off: s.passing_success_off.unwrap_or(0.50),
            passing_def: s.passing_success_def.unwrap_or(0.50),
            power_off: s.power_success_off.unwrap_or(0.70),
            stuff_rate_def: s.stuff_rate_def.unwrap_or(0.15),
            plays_per_game: s.plays_per_game.unwrap_or(70.0),
            havoc_rate: s.havoc_rate.unwrap_or(0.15),
        }
    }
}

/// Net matchup edge: home offense vs away defense minus the reverse.
fn net(home_off: f64, away_def: f64, away_off: f64, home_def: f64) -> f64 {
    (home_off - away_def) - (away_off - home_def)
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StyleMismatch;

impl StyleMismatch {
    fn metrics(context: &GameContext) -> Option<(Metrics, Metrics)> {
        let home = team_data(context, Side::Home)?.stats.as_ref()?;
        let away = team_data(context, Side::Away)?.stats.as_ref()?;
        Some((Metrics::from(home), Metrics::from(away)))
    }

    fn success_rate(h: &Metrics, a: &Metrics) -> f64 {
        let mut parts = Vec::new();
        let overall = net(h.success_off, a.success_def, a.success_off, h.success_def);
        if overall.abs() > MIN_SUCCESS_DIFF {
            parts.push(overall * 8.0);
        }
        let standard = net(
            h.standard_downs_off,
            a.standard_downs_def,
            a.standard_downs_off,
            h.standard_downs_def,
        );
        if standard.abs() > 0.05 {
            parts.push(standard * 4.0);
        }
        let passing_downs = net(
            h.passing_downs_off,
            a.passing_downs_def,
            a.passing_downs_off,
            h.passing_downs_def,
        );
        if passing_downs.abs() > 0.05 {
            parts.push(passing_downs * 6.0);
        }
        mean_or_zero(&parts)
    }

    fn explosiveness(h: &Metrics, a: &Metrics) -> f64 {
        let mut parts = Vec::new();
        let gap = net(
            h.explosiveness_off,
            a.explosiveness_def,
            a.explosiveness_off,
            h.explosiveness_def,
        );
        if gap.abs() > 0.5 {
            parts.push(gap * 1.5);
        }
        let ppa = net(h.ppa_off, a.ppa_def, a.ppa_off, h.ppa_def);
        if ppa.abs() > 0.1 {
            parts.push(ppa * 3.0);
        }
        // Two explosive offenses make a high-variance game, which helps the
        // side with the smaller explosiveness edge.
        if h.explosiveness_off + a.explosiveness_off > 3.0 {
            parts.push(if gap > 0.0 { -0.3 } else { 0.3 });
        }
        mean_or_zero(&parts)
    }

    fn pace(h: &Metrics, a: &Metrics) -> f64 {
        if (h.plays_per_game - a.plays_per_game).abs() <= 10.0 {
            0.0
        } else if h.plays_per_game < a.plays_per_game {
            SLOWER_PACE_ADVANTAGE
        } else {
            -SLOWER_PACE_ADVANTAGE
        }
    }

    fn run_pass(h: &Metrics, a: &Metrics) -> f64 {
        let mut parts = Vec::new();
        let run = net(h.rushing_off, a.rushing_def, a.rushing_off, h.rushing_def);
        if run.abs() > 0.08 {
            parts.push(run * 4.0);
        }
        let pass = net(h.passing_off, a.passing_def, a.passing_off, h.passing_def);
        if pass.abs() > 0.08 {
            parts.push(pass * 4.0);
        }
        let power = (h.power_off - a.stuff_rate_def * 2.0) - (a.power_off - h.stuff_rate_def * 2.0);
        if power.abs() > 0.15 {
            parts.push(power * 2.0);
        }
        mean_or_zero(&parts)
    }

    fn havoc(h: &Metrics, a: &Metrics) -> f64 {
        let combined = (h.havoc_rate + a.havoc_rate) / 2.0;
        if combined > 0.20 {
            -0.3
        } else if h.havoc_rate > a.havoc_rate * 1.3 {
            0.5
        } else if a.havoc_rate > h.havoc_rate * 1.3 {
            -0.5
        } else {
            0.0
        }
    }
}

impl Factor for StyleMismatch {
    fn name(&self) -> &str {
        "StyleMismatch"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Identifies exploitable style mismatches between teams")
            .category(SITUATIONAL_CONTEXT)
            .weight(0.50)
            .factor_type(FactorType::Secondary)
            .activation_threshold(0.05)
            .max_impact(4.0)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(4.0)
    }

    fn required_data(&self) -> RequiredData {
        RequiredData::none().with(DataKind::TeamStats)
    }

    fn calculate(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        let Some((h, a)) = context.and_then(Self::metrics) else {
            return Ok(0.0);
        };
        let success = Self::success_rate(&h, &a);
        let explosive = Self::explosiveness(&h, &a);
        let pace = Self::pace(&h, &a);
        let style = Self::run_pass(&h, &a);
        let havoc = Self::havoc(&h, &a);

        let adjustment = (success * SUCCESS_RATE_WEIGHT
            + explosive * EXPLOSIVENESS_WEIGHT
            + pace * PACE_WEIGHT
            + style * RUN_PASS_WEIGHT
            + havoc * HAVOC_WEIGHT)
            / COMPONENT_NORMALIZER;

        debug!(
            home_team,
            away_team, success, explosive, pace, style, havoc, adjustment, "style mismatch components"
        );
        Ok(self.validate_output(adjustment))
    }

    fn calculate_with_confidence(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<ConfidenceReading, FactorError> {
        let value = self.calculate(home_team, away_team, context)?;
        let (confidence, reason) = match value.abs() {
            m if m > 3.0 => (FactorConfidence::VeryHigh, "Extreme style mismatch identified"),
            m if m > 2.0 => (FactorConfidence::High, "Significant style conflict detected"),
            m if m > 1.0 => (FactorConfidence::Medium, "Moderate style mismatch found"),
            m if m > 0.5 => (FactorConfidence::Low, "Minor style differential present"),
            _ => (FactorConfidence::None, "No exploitable style mismatch"),
        };
        let mut reasoning = vec![reason.to_string()];

        if value.abs() > 1.0 {
            if let Some((h, a)) = context.and_then(Self::metrics) {
                if (h.success_off - a.success_off).abs() > 0.05 {
                    reasoning.push("Success rate differential detected".to_string());
                }
                if (h.plays_per_game - a.plays_per_game).abs() > 10.0 {
                    reasoning.push("Pace mismatch advantage".to_string());
                }
            }
        }
        Ok(ConfidenceReading::new(value, confidence, reasoning))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.1 {
            return Some("No significant style mismatch impact".to_string());
        }
        let impact = match value.abs() {
            m if m > 3.0 => "extreme",
            m if m > 2.0 => "major",
            _ => "notable",
        };
        let kind = match context.and_then(Self::metrics) {
            Some((h, a)) if (h.success_off - a.success_off).abs() > 0.08 => "success rate",
            Some((h, a)) if (h.plays_per_game - a.plays_per_game).abs() > 15.0 => "pace",
            Some(_) => "explosiveness",
            None => "style",
        };
        Some(format!(
            "{} has {impact} {kind} advantage ({value:+.1} points)",
            favored(home_team, away_team, value)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_core::types::TeamData;

    fn with_stats(stats: TeamStats) -> TeamData {
        TeamData {
            stats: Some(stats),
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_teams_have_no_mismatch() {
        let ctx = GameContext {
            home_team_data: Some(with_stats(TeamStats::default())),
            away_team_data: Some(with_stats(TeamStats::default())),
            ..Default::default()
        };
        assert_eq!(StyleMismatch.calculate("A", "B", Some(&ctx)).unwrap(), 0.0);
    }

    #[test]
    fn test_success_rate_edge_favors_efficient_home_team() {
        let home = TeamStats {
            success_rate_off: Some(0.50),
            success_rate_def: Some(0.35),
            ..Default::default()
        };
        let ctx = GameContext {
            home_team_data: Some(with_stats(home)),
            away_team_data: Some(with_stats(TeamStats::default())),
            ..Default::default()
        };
        // overall net = (0.50 - 0.40) - (0.40 - 0.35) = 0.05, not above threshold
        assert_eq!(StyleMismatch.calculate("A", "B", Some(&ctx)).unwrap(), 0.0);

        let home = TeamStats {
            success_rate_off: Some(0.65),
            ..Default::default()
        };
        let ctx = GameContext {
            home_team_data: Some(with_stats(home)),
            away_team_data: Some(with_stats(TeamStats::default())),
            ..Default::default()
        };
        // overall net (0.65 - 0.40) - 0 -> 2.0 success component -> 4.0 / 6
        let v = StyleMismatch.calculate("A", "B", Some(&ctx)).unwrap();
        assert!((v - 4.0 / 6.0).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn test_slower_team_gets_pace_edge() {
        let home = TeamStats {
            plays_per_game: Some(60.0),
            ..Default::default()
        };
        let away = TeamStats {
            plays_per_game: Some(80.0),
            ..Default::default()
        };
        let (h, a) = (Metrics::from(&home), Metrics::from(&away));
        assert_eq!(StyleMismatch::pace(&h, &a), SLOWER_PACE_ADVANTAGE);
        assert_eq!(StyleMismatch::pace(&a, &h), -SLOWER_PACE_ADVANTAGE);
    }

    #[test]
    fn test_high_havoc_game_favors_visitor() {
        let chaos = TeamStats {
            havoc_rate: Some(0.25),
            ..Default::default()
        };
        let (h, a) = (Metrics::from(&chaos), Metrics::from(&chaos));
        assert_eq!(StyleMismatch::havoc(&h, &a), -0.3);
    }
}
