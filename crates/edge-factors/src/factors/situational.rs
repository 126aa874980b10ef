//! Situational context factors: stakes, narratives, and schedule position.

use edge_core::errors::FactorError;
use edge_core::types::{DataKind, FactorProfile, GameContext, OutputRange, RequiredData};
use edge_core::Factor;

use super::{favored, team_data, Side, SITUATIONAL_CONTEXT};

/// Bowl, playoff, and late-season stakes for each side.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesperationIndex;

impl DesperationIndex {
    const BOWL_ELIGIBLE_WINS: u32 = 6;
    const PLAYOFF_MAX_LOSSES: u32 = 1;
    const REGULAR_SEASON_GAMES: u32 = 12;
    const DEFAULT_WEEK: u32 = 8;

    fn team_desperation(context: &GameContext, side: Side, week: u32) -> f64 {
        let record = team_data(context, side)
            .and_then(|t| t.derived_metrics.as_ref())
            .and_then(|m| m.current_record.as_ref());
        let Some(record) = record else {
            return Self::week_baseline(week);
        };

        let (wins, losses) = (record.wins, record.losses);
        let remaining = Self::REGULAR_SEASON_GAMES.saturating_sub(wins + losses);

        let score = 0.5
            + Self::bowl_desperation(wins, remaining) * 0.4
            + Self::playoff_desperation(losses, week) * 0.3
            + Self::late_season_pressure(week) * 0.3;
        score.clamp(0.0, 1.0)
    }

    /// Score for a team with no record on file.
    fn week_baseline(week: u32) -> f64 {
        let mut base: f64 = 0.5;
        if week >= 10 {
            base += 0.2;
        } else if week >= 8 {
            base += 0.1;
        } else if week <= 3 {
            base -= 0.1;
        }
        base.clamp(0.0, 1.0)
    }

    fn bowl_desperation(wins: u32, remaining: u32) -> f64 {
        if wins >= Self::BOWL_ELIGIBLE_WINS {
            return 0.0;
        }
        let needed = Self::BOWL_ELIGIBLE_WINS - wins;
        if needed > remaining {
            -0.3
        } else if needed == remaining {
            0.6
        } else if needed == 1 {
            0.4
        } else {
            0.2
        }
    }

    fn playoff_desperation(losses: u32, week: u32) -> f64 {
        if losses > Self::PLAYOFF_MAX_LOSSES {
            0.0
        } else if week >= 10 && losses == 0 {
            0.5
        } else if week >= 10 {
            0.3
        } else {
            0.1
        }
    }

    fn late_season_pressure(week: u32) -> f64 {
        match week {
            w if w >= 13 => 0.4,
            w if w >= 11 => 0.3,
            w if w >= 9 => 0.2,
            _ => 0.0,
        }
    }
}

impl Factor for DesperationIndex {
    fn name(&self) -> &str {
        "DesperationIndex"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Desperation index for bowl/playoff eligibility")
            .category(SITUATIONAL_CONTEXT)
            .weight(0.10)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(2.0)
    }

    fn calculate(
        &self,
        _home_team: &str,
        _away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        let Some(context) = context else {
            return Ok(0.0);
        };
        let week = context.week.unwrap_or(Self::DEFAULT_WEEK);
        let home = Self::team_desperation(context, Side::Home, week);
        let away = Self::team_desperation(context, Side::Away, week);
        Ok(self.validate_output((home - away) * 4.0))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.2 {
            return Some("Similar desperation levels for both teams".to_string());
        }
        let more = favored(home_team, away_team, value);
        let less = if value > 0.0 { away_team } else { home_team };
        let intensity = if value.abs() < 1.0 { "slightly" } else { "significantly" };
        Some(format!("{more} is {intensity} more desperate than {less}"))
    }
}

/// Known revenge spots, keyed by (team, opponent) in upper case.
const REVENGE_SPOTS: &[(&str, &str, f64)] = &[
    ("GEORGIA", "ALABAMA", 0.3),
    ("ALABAMA", "GEORGIA", 0.2),
    ("MICHIGAN", "OHIO STATE", 0.4),
    ("OHIO STATE", "MICHIGAN", 0.3),
    ("TEXAS", "OKLAHOMA", 0.3),
    ("OKLAHOMA", "TEXAS", 0.3),
];

/// Revenge narrative from recent series history.
#[derive(Debug, Default, Clone, Copy)]
pub struct RevengeGame;

impl RevengeGame {
    const RECENT_LOSS_WEIGHT: f64 = 0.5;

    fn revenge_score(team: &str, opponent: &str) -> f64 {
        let team = team.trim().to_uppercase();
        let opponent = opponent.trim().to_uppercase();
        REVENGE_SPOTS
            .iter()
            .find(|(t, o, _)| *t == team && *o == opponent)
            .map_or(0.0, |(_, _, score)| score * Self::RECENT_LOSS_WEIGHT)
    }
}

impl Factor for RevengeGame {
    fn name(&self) -> &str {
        "RevengeGame"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Revenge game and narrative factor analysis")
            .category(SITUATIONAL_CONTEXT)
            .weight(0.10)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(1.5)
    }

    fn calculate(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        if context.is_none() {
            return Ok(0.0);
        }
        let home = Self::revenge_score(home_team, away_team);
        let away = Self::revenge_score(away_team, home_team);
        Ok(self.validate_output(home - away))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.1 {
            return Some("No significant revenge storylines identified".to_string());
        }
        Some(format!(
            "Revenge narrative favors {}",
            favored(home_team, away_team, value)
        ))
    }
}

/// Distraction from a big upcoming game (lookahead) or a just-played one
/// (letdown).
#[derive(Debug, Default, Clone, Copy)]
pub struct LookaheadSandwich;

impl LookaheadSandwich {
    const LOOKAHEAD_WEEKS: u32 = 2;
    const LETDOWN_WEEKS: u32 = 1;
    const GAME_IMPORTANCE: f64 = 0.5;

    fn distraction(context: &GameContext, side: Side, week: u32) -> f64 {
        let Some(team) = team_data(context, side) else {
            return 0.0;
        };

        let lookahead = team
            .schedule
            .iter()
            .filter(|g| !g.completed)
            .filter_map(|g| g.week)
            .filter(|w| *w > week && *w - week <= Self::LOOKAHEAD_WEEKS)
            .map(|w| Self::GAME_IMPORTANCE / f64::from(w - week))
            .fold(0.0_f64, f64::max)
            .min(1.0);

        let letdown = team
            .schedule
            .iter()
            .filter(|g| g.completed)
            .filter_map(|g| g.week)
            .filter(|w| *w < week && week - *w <= Self::LETDOWN_WEEKS)
            .map(|_| Self::GAME_IMPORTANCE * 0.7)
            .fold(0.0_f64, f64::max)
            .min(1.0);

        lookahead * 0.6 + letdown * 0.4
    }
}

impl Factor for LookaheadSandwich {
    fn name(&self) -> &str {
        "LookaheadSandwich"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Lookahead and sandwich game analysis")
            .category(SITUATIONAL_CONTEXT)
            .weight(0.10)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(2.0)
    }

    fn required_data(&self) -> RequiredData {
        RequiredData::none().with(DataKind::ScheduleData)
    }

    fn calculate(
        &self,
        _home_team: &str,
        _away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        let Some((context, week)) = context.and_then(|c| Some((c, c.week?))) else {
            return Ok(0.0);
        };
        let home = Self::distraction(context, Side::Home, week);
        let away = Self::distraction(context, Side::Away, week);
        Ok(self.validate_output(away - home))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.2 {
            return Some("No significant lookahead or letdown factors".to_string());
        }
        Some(format!(
            "Schedule positioning favors {} (opponent more distracted)",
            favored(home_team, away_team, value)
        ))
    }
}
