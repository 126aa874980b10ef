//! Scheduling fatigue: cumulative travel, short rest, and emotional
//! hangover over the last few weeks.

use chrono::NaiveDate;
use edge_core::errors::FactorError;
use edge_core::types::{
    ConfidenceReading, DataKind, FactorConfidence, FactorProfile, FactorType, GameContext,
    GameRecord, OutputRange, RequiredData,
};
use edge_core::Factor;
use tracing::info;

use super::{favored, team_data, Side, SITUATIONAL_CONTEXT};

const ROAD_GAME_WEIGHT: f64 = 0.8;
const SHORT_REST_WEIGHT: f64 = 1.5;
const EMOTIONAL_GAME_WEIGHT: f64 = 0.6;
const TRANSITION_WEIGHT: f64 = 0.4;
const LOOKBACK_WEEKS: u32 = 4;
const MIN_GAMES: usize = 2;
const NORMAL_REST_DAYS: i64 = 7;

#[derive(Debug, Default, Clone, Copy)]
pub struct SchedulingFatigue;

impl SchedulingFatigue {
    fn team_fatigue(schedule: &[GameRecord], current_week: u32) -> f64 {
        let start_week = current_week.saturating_sub(LOOKBACK_WEEKS).max(1);
        let mut recent: Vec<&GameRecord> = schedule
            .iter()
            .filter(|g| g.week.is_some_and(|w| w >= start_week && w < current_week))
            .collect();
        if recent.len() < MIN_GAMES {
            return 0.0;
        }
        recent.sort_by_key(|g| g.week);

        let road_games = recent.iter().filter(|g| is_road_game(g)).count();
        let short_rests = recent
            .windows(2)
            .filter(|pair| rest_days(pair[0], pair[1]) < NORMAL_REST_DAYS)
            .count();
        let emotional_games = recent.iter().filter(|g| is_emotional_game(g)).count();
        let transitions = recent
            .windows(2)
            .filter(|pair| is_road_game(pair[0]) != is_road_game(pair[1]))
            .count();

        road_games as f64 * ROAD_GAME_WEIGHT
            + short_rests as f64 * SHORT_REST_WEIGHT
            + emotional_games as f64 * EMOTIONAL_GAME_WEIGHT
            + transitions as f64 * TRANSITION_WEIGHT
    }
}

fn is_road_game(game: &GameRecord) -> bool {
    game.is_home_game == Some(false)
}

/// Days between consecutive games. Prefers the provider's `rest_days` on the
/// later game, then the date gap, then a normal week.
fn rest_days(previous: &GameRecord, next: &GameRecord) -> i64 {
    if let Some(days) = next.rest_days {
        return i64::from(days);
    }
    match (parse_date(previous), parse_date(next)) {
        (Some(a), Some(b)) => (b - a).num_days().abs(),
        _ => NORMAL_REST_DAYS,
    }
}

fn parse_date(game: &GameRecord) -> Option<NaiveDate> {
    let date = game.date.as_deref()?.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// One-score games and shootouts.
fn is_emotional_game(game: &GameRecord) -> bool {
    let team = game.team_score.unwrap_or(0.0);
    let opponent = game.opponent_score.unwrap_or(0.0);
    if team == 0.0 && opponent == 0.0 {
        return false;
    }
    (team - opponent).abs() <= 7.0 || (team > 40.0 && opponent > 40.0)
}

impl Factor for SchedulingFatigue {
    fn name(&self) -> &str {
        "SchedulingFatigue"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Analyzes cumulative travel fatigue and rest disadvantages")
            .category(SITUATIONAL_CONTEXT)
            .weight(0.33)
            .factor_type(FactorType::Primary)
            .activation_threshold(1.0)
            .max_impact(3.5)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(3.5)
    }

    fn required_data(&self) -> RequiredData {
        RequiredData::none().with(DataKind::ScheduleData)
    }

    fn calculate(
        &self,
        home_team: &str,
        away_team: &str,
        context: Option<&GameContext>,
    ) -> Result<f64, FactorError> {
        let Some(context) = context else {
            return Ok(0.0);
        };
        let week = context.week.unwrap_or(1).max(1);
        let fatigue =
            |side| team_data(context, side).map_or(0.0, |t| Self::team_fatigue(&t.schedule, week));
        let home_fatigue = fatigue(Side::Home);
        let away_fatigue = fatigue(Side::Away);
        let adjustment = (away_fatigue - home_fatigue) * 0.5;

        if adjustment.abs() > 1.0 {
            info!(
                home_team,
                away_team, home_fatigue, away_fatigue, adjustment, "scheduling fatigue imbalance"
            );
        }
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
            m if m > 2.5 => (FactorConfidence::VeryHigh, "Severe scheduling imbalance detected"),
            m if m > 1.5 => (FactorConfidence::High, "Significant fatigue differential found"),
            m if m > 0.8 => (FactorConfidence::Medium, "Moderate scheduling advantage identified"),
            m if m > 0.3 => (FactorConfidence::Low, "Minor fatigue factor present"),
            _ => (FactorConfidence::None, "No meaningful scheduling fatigue detected"),
        };
        Ok(ConfidenceReading::new(value, confidence, vec![reason.to_string()]))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.1 {
            return Some("No significant scheduling fatigue impact".to_string());
        }
        let favored_team = favored(home_team, away_team, value);
        let tired = if value > 0.0 { away_team } else { home_team };
        let impact = match value.abs() {
            m if m > 2.5 => "severe",
            m if m > 1.5 => "significant",
            _ => "moderate",
        };
        Some(format!(
            "{tired} facing {impact} scheduling fatigue - {favored_team} advantage ({value:+.1} points)"
        ))
    }
}
