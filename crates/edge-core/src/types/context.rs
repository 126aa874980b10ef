//! Per-game context supplied by the data layer.
//!
//! Every field is optional: data providers routinely omit sections, and a
//! factor that needs a missing section reports itself unavailable instead
//! of failing.

use serde::{Deserialize, Serialize};

use super::DataKind;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameContext {
    pub home_team_data: Option<TeamData>,
    pub away_team_data: Option<TeamData>,
    pub coaching_comparison: Option<CoachingComparison>,
    /// Published spread, home perspective.
    pub vegas_spread: Option<f64>,
    pub week: Option<u32>,
    pub year: Option<i32>,
    /// Per-sportsbook opening and current lines.
    pub betting_lines: Vec<BookLine>,
    /// Fraction of usable upstream data (0–1), as reported by the data layer.
    pub data_quality: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamData {
    pub info: Option<TeamInfo>,
    pub stats: Option<TeamStats>,
    pub schedule: Vec<GameRecord>,
    pub derived_metrics: Option<DerivedMetrics>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamInfo {
    pub name: Option<String>,
    pub conference: Option<Conference>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Conference {
    pub name: String,
}

/// Season-level advanced metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStats {
    pub success_rate_off: Option<f64>,
    pub success_rate_def: Option<f64>,
    pub standard_downs_success_off: Option<f64>,
    pub standard_downs_success_def: Option<f64>,
    pub passing_downs_success_off: Option<f64>,
    pub passing_downs_success_def: Option<f64>,
    pub explosiveness_off: Option<f64>,
    pub explosiveness_def: Option<f64>,
    /// Points per attempt.
    pub ppa_off: Option<f64>,
    pub ppa_def: Option<f64>,
    pub rushing_success_off: Option<f64>,
    pub rushing_success_def: Option<f64>,
    pub passing_success_off: Option<f64>,
    pub passing_success_def: Option<f64>,
    pub power_success_off: Option<f64>,
    pub stuff_rate_def: Option<f64>,
    pub plays_per_game: Option<f64>,
    pub havoc_rate: Option<f64>,
}

/// One game on a team's schedule, from that team's perspective.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRecord {
    pub week: Option<u32>,
    /// ISO-8601 date; lexicographic order is chronological.
    pub date: Option<String>,
    pub completed: bool,
    pub team_score: Option<f64>,
    pub opponent_score: Option<f64>,
    pub is_home_game: Option<bool>,
    /// "W" or "L".
    pub result: Option<String>,
    /// Days since the previous game, when the provider computes it.
    pub rest_days: Option<u32>,
}

impl GameRecord {
    /// Team score minus opponent score, when both are known.
    pub fn differential(&self) -> Option<f64> {
        Some(self.team_score? - self.opponent_score?)
    }

    pub fn is_win(&self) -> bool {
        self.result.as_deref() == Some("W")
    }

    pub fn is_loss(&self) -> bool {
        self.result.as_deref() == Some("L")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedMetrics {
    pub current_record: Option<CurrentRecord>,
    pub venue_performance: Option<VenuePerformance>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentRecord {
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: Option<f64>,
}

impl CurrentRecord {
    pub fn effective_win_percentage(&self) -> f64 {
        self.win_percentage.unwrap_or_else(|| {
            let games = self.wins + self.losses;
            if games == 0 {
                0.5
            } else {
                f64::from(self.wins) / f64::from(games)
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VenuePerformance {
    pub home_record: Option<VenueRecord>,
    pub away_record: Option<VenueRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueRecord {
    pub win_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachingComparison {
    pub home_coaching: Option<CoachProfile>,
    pub away_coaching: Option<CoachProfile>,
    pub head_to_head_record: Option<HeadToHead>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachProfile {
    pub head_coach_experience: Option<u32>,
    pub tenure_years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadToHead {
    pub home_wins: u32,
    pub away_wins: u32,
    pub total_games: u32,
}

/// A single sportsbook's line for the game.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookLine {
    pub provider: Option<String>,
    pub spread: Option<f64>,
    pub spread_open: Option<f64>,
}

impl GameContext {
    /// Whether the data backing `kind` is present for this game.
    pub fn has_data(&self, kind: DataKind) -> bool {
        let both = |f: fn(&TeamData) -> bool| {
            self.home_team_data.as_ref().is_some_and(f)
                && self.away_team_data.as_ref().is_some_and(f)
        };
        match kind {
            DataKind::TeamInfo => both(|t| t.info.is_some()),
            DataKind::CoachingData => self.coaching_comparison.is_some(),
            DataKind::TeamStats => both(|t| t.stats.is_some()),
            DataKind::ScheduleData => both(|t| !t.schedule.is_empty()),
            DataKind::BettingData => self.current_spread().is_some(),
            DataKind::HistoricalData => false,
        }
    }

    /// Consensus spread, falling back to the first book that quotes one.
    pub fn current_spread(&self) -> Option<f64> {
        self.vegas_spread
            .or_else(|| self.betting_lines.iter().find_map(|line| line.spread))
    }

    /// Upper-cased conference name for the home team, falling back to away.
    pub fn primary_conference(&self) -> Option<String> {
        [&self.home_team_data, &self.away_team_data]
            .into_iter()
            .flatten()
            .filter_map(|team| team.info.as_ref()?.conference.as_ref())
            .map(|conf| conf.name.trim().to_uppercase())
            .find(|name| !name.is_empty())
    }
}
