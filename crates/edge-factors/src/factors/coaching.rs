//! Coaching edge factors.

use edge_core::errors::FactorError;
use edge_core::types::{
    CoachProfile, DataKind, FactorProfile, GameContext, OutputRange, RequiredData,
};
use edge_core::Factor;

use super::{favored, team_data, Side, COACHING_EDGE};

/// Years of head-coaching experience beyond which there is no extra credit.
const MAX_EXPERIENCE_YEARS: f64 = 15.0;
const MAX_TENURE_YEARS: f64 = 8.0;
const TENURE_WEIGHT: f64 = 0.3;
const ROOKIE_PENALTY: f64 = 0.5;
const DEFAULT_EXPERIENCE: u32 = 5;
const DEFAULT_TENURE: u32 = 3;

/// Experience and tenure gap between the two head coaches.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExperienceDifferential;

impl ExperienceDifferential {
    fn experience_score(coach: Option<&CoachProfile>) -> f64 {
        let experience = coach
            .and_then(|c| c.head_coach_experience)
            .unwrap_or(DEFAULT_EXPERIENCE);
        let tenure = coach.and_then(|c| c.tenure_years).unwrap_or(DEFAULT_TENURE);

        let exp_score = f64::from(experience).min(MAX_EXPERIENCE_YEARS) / MAX_EXPERIENCE_YEARS;
        let tenure_score = f64::from(tenure).min(MAX_TENURE_YEARS) / MAX_TENURE_YEARS;
        let composite = exp_score * (1.0 - TENURE_WEIGHT) + tenure_score * TENURE_WEIGHT;

        if experience <= 1 {
            composite * (1.0 - ROOKIE_PENALTY)
        } else {
            composite
        }
    }
}

impl Factor for ExperienceDifferential {
    fn name(&self) -> &str {
        "ExperienceDifferential"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Coaching experience differential analysis")
            .category(COACHING_EDGE)
            .weight(0.10)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(2.0)
    }

    fn required_data(&self) -> RequiredData {
        RequiredData::none().with(DataKind::CoachingData)
    }

    fn calculate(
        &self,
        _home_team: &str,
        _away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        let Some(coaching) = context.and_then(|c| c.coaching_comparison.as_ref()) else {
            return Ok(0.0);
        };
        let home = Self::experience_score(coaching.home_coaching.as_ref());
        let away = Self::experience_score(coaching.away_coaching.as_ref());
        Ok(self.validate_output((home - away) * 2.0))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.1 {
            return Some("Coaching experience levels are comparable".to_string());
        }
        let edge = match value.abs() {
            m if m < 0.5 => "slight",
            m if m < 1.0 => "moderate",
            _ => "significant",
        };
        Some(format!(
            "Coaching experience gives {} a {edge} edge ({value:+.1})",
            favored(home_team, away_team, value)
        ))
    }
}

/// Job-security and game-stakes pressure; the less pressured side benefits.
#[derive(Debug, Default, Clone, Copy)]
pub struct PressureSituation;

impl PressureSituation {
    const JOB_SECURITY_WEIGHT: f64 = 0.4;
    const EXPECTATIONS_WEIGHT: f64 = 0.6;

    fn job_pressure(context: &GameContext, side: Side) -> f64 {
        let record = team_data(context, side)
            .and_then(|t| t.derived_metrics.as_ref())
            .and_then(|m| m.current_record.as_ref());
        let Some(record) = record else {
            return 0.5;
        };
        match record.effective_win_percentage() {
            p if p < 0.3 => 0.8,
            p if p < 0.5 => 0.6,
            p if p > 0.8 => 0.2,
            _ => 0.4,
        }
    }

    fn game_pressure(context: &GameContext, side: Side) -> f64 {
        let mut pressure: f64 = 0.3;
        if let Some(week) = context.week.filter(|w| *w > 0) {
            if week >= 12 {
                pressure += 0.2;
            } else if week <= 3 {
                pressure -= 0.1;
            }
        }
        if side == Side::Home {
            pressure += 0.1;
        }
        pressure.min(1.0)
    }

    fn pressure_score(context: &GameContext, side: Side) -> f64 {
        Self::job_pressure(context, side) * Self::JOB_SECURITY_WEIGHT
            + Self::game_pressure(context, side) * Self::EXPECTATIONS_WEIGHT
    }
}

impl Factor for PressureSituation {
    fn name(&self) -> &str {
        "PressureSituation"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Coaching performance under pressure analysis")
            .category(COACHING_EDGE)
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
        let home = Self::pressure_score(context, Side::Home);
        let away = Self::pressure_score(context, Side::Away);
        Ok(self.validate_output(away - home))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.1 {
            return Some("Both teams facing similar pressure levels".to_string());
        }
        Some(format!(
            "Pressure situation favors {} (less pressure or better under pressure)",
            favored(home_team, away_team, value)
        ))
    }
}

/// Home-field strength of the host against the visitor's road form.
#[derive(Debug, Default, Clone, Copy)]
pub struct VenuePerformance;

impl VenuePerformance {
    const HOME_FIELD_BASE: f64 = 0.3;

    fn venue_win_percentage(context: &GameContext, side: Side) -> Option<f64> {
        let venue = team_data(context, side)?
            .derived_metrics
            .as_ref()?
            .venue_performance
            .as_ref()?;
        let record = match side {
            Side::Home => venue.home_record.as_ref()?,
            Side::Away => venue.away_record.as_ref()?,
        };
        Some(record.win_percentage.unwrap_or(0.5))
    }
}

impl Factor for VenuePerformance {
    fn name(&self) -> &str {
        "VenuePerformance"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Coaching venue performance differential")
            .category(COACHING_EDGE)
            .weight(0.10)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(1.5)
    }

    fn calculate(
        &self,
        _home_team: &str,
        _away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        let Some(context) = context else {
            return Ok(Self::HOME_FIELD_BASE);
        };
        let home_edge = Self::venue_win_percentage(context, Side::Home)
            .map_or(0.0, |p| (p - 0.5) * 2.0);
        let road_edge = Self::venue_win_percentage(context, Side::Away)
            .map_or(0.0, |p| (p - 0.5) * 1.5);
        Ok(self.validate_output(home_edge - road_edge + Self::HOME_FIELD_BASE))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        let text = if value > 0.5 {
            format!("Strong home field advantage favors {home_team}")
        } else if value > 0.1 {
            format!("Moderate home field advantage favors {home_team}")
        } else if value < -0.1 {
            format!("{away_team} travels well, reducing home field advantage")
        } else {
            "Neutral venue performance differential".to_string()
        };
        Some(text)
    }
}

/// Head-to-head record between the current coaches.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadToHeadRecord;

impl HeadToHeadRecord {
    const MIN_GAMES: u32 = 3;

    fn total_games(context: Option<&GameContext>) -> u32 {
        context
            .and_then(|c| c.coaching_comparison.as_ref())
            .and_then(|c| c.head_to_head_record.as_ref())
            .map_or(0, |h| h.total_games)
    }
}

impl Factor for HeadToHeadRecord {
    fn name(&self) -> &str {
        "HeadToHeadRecord"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Head-to-head coaching record analysis")
            .category(COACHING_EDGE)
            .weight(0.10)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(1.0)
    }

    fn required_data(&self) -> RequiredData {
        RequiredData::none().with(DataKind::CoachingData)
    }

    fn calculate(
        &self,
        _home_team: &str,
        _away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        let record = context
            .and_then(|c| c.coaching_comparison.as_ref())
            .and_then(|c| c.head_to_head_record.as_ref());
        let Some(record) = record else {
            return Ok(0.0);
        };
        if record.total_games < Self::MIN_GAMES {
            return Ok(0.0);
        }
        let home_share = f64::from(record.home_wins) / f64::from(record.total_games);
        Ok(self.validate_output((home_share - 0.5) * 2.0))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        context: Option<&GameContext>,
    ) -> Option<String> {
        if context.is_none() {
            return Some("Head-to-head coaching data not available".to_string());
        }
        let games = Self::total_games(context);
        if games < Self::MIN_GAMES {
            return Some("Insufficient head-to-head coaching history".to_string());
        }
        if value.abs() < 0.1 {
            return Some(format!("Even head-to-head coaching record ({games} games)"));
        }
        Some(format!(
            "Head-to-head coaching record favors {} ({games} games)",
            favored(home_team, away_team, value)
        ))
    }
}
