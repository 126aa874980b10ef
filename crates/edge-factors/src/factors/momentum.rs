//! Momentum factors computed from each team's completed schedule.

use edge_core::errors::FactorError;
use edge_core::types::{DataKind, FactorProfile, GameContext, GameRecord, OutputRange, RequiredData};
use edge_core::Factor;

use super::{favored, sample_std_dev, team_data, Side, MOMENTUM_FACTORS};

/// Weights for the last four games, most recent first.
const TREND_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];
const CONSISTENCY_BONUS: f64 = 0.3;

/// Recent scoring margin against the season average.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointDifferentialTrends;

impl PointDifferentialTrends {
    const MIN_GAMES: usize = 3;

    fn team_trend(schedule: &[GameRecord]) -> f64 {
        let mut completed: Vec<&GameRecord> = schedule.iter().filter(|g| g.completed).collect();
        if completed.len() < Self::MIN_GAMES {
            return 0.0;
        }
        completed.sort_by(|a, b| a.date.cmp(&b.date));

        let season: Vec<f64> = completed.iter().filter_map(|g| g.differential()).collect();
        if season.len() < Self::MIN_GAMES {
            return 0.0;
        }
        let season_avg = season.iter().sum::<f64>() / season.len() as f64;

        let window = completed.len().saturating_sub(TREND_WEIGHTS.len());
        let recent: Vec<f64> = completed[window..]
            .iter()
            .filter_map(|g| g.differential())
            .collect();
        if recent.is_empty() {
            return 0.0;
        }

        let trend = Self::weighted_recent_average(&recent) - season_avg;
        Self::scale_trend(trend) + Self::consistency_bonus(&recent)
    }

    /// `recent` is chronological; the last entry gets the largest weight.
    fn weighted_recent_average(recent: &[f64]) -> f64 {
        let weights = &TREND_WEIGHTS[..recent.len().min(TREND_WEIGHTS.len())];
        let total: f64 = weights.iter().sum();
        let sum: f64 = recent
            .iter()
            .zip(weights.iter().rev())
            .map(|(diff, w)| diff * w)
            .sum();
        if total > 0.0 {
            sum / total
        } else {
            0.0
        }
    }

    fn scale_trend(improvement: f64) -> f64 {
        if improvement >= 10.0 {
            1.5
        } else if improvement >= 5.0 {
            1.0
        } else if improvement <= -5.0 {
            -1.0
        } else {
            improvement / 10.0
        }
    }

    fn consistency_bonus(recent: &[f64]) -> f64 {
        if recent.len() < 3 {
            return 0.0;
        }
        match sample_std_dev(recent) {
            Some(sd) if sd < 7.0 => CONSISTENCY_BONUS,
            Some(sd) if sd < 14.0 => CONSISTENCY_BONUS * 0.5,
            _ => 0.0,
        }
    }
}

impl Factor for PointDifferentialTrends {
    fn name(&self) -> &str {
        "PointDifferentialTrends"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Point differential trends analysis")
            .category(MOMENTUM_FACTORS)
            .weight(0.07)
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
        let Some(context) = context else {
            return Ok(0.0);
        };
        let trend = |side| team_data(context, side).map_or(0.0, |t| Self::team_trend(&t.schedule));
        Ok(self.validate_output(trend(Side::Home) - trend(Side::Away)))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.2 {
            return Some("Similar scoring trends for both teams".to_string());
        }
        let team = favored(home_team, away_team, value);
        if value.abs() > 1.0 {
            Some(format!("{team} showing strong recent scoring improvement"))
        } else {
            Some(format!("{team} trending upward in point differential"))
        }
    }
}

/// Results in one-score games over the recent window.
#[derive(Debug, Default, Clone, Copy)]
pub struct CloseGamePerformance;

impl CloseGamePerformance {
    const CLOSE_MARGIN: f64 = 7.0;
    const WINDOW: usize = 6;
    const MIN_CLOSE_GAMES: usize = 2;

    fn clutch_score(schedule: &[GameRecord]) -> f64 {
        let completed: Vec<&GameRecord> = schedule.iter().filter(|g| g.completed).collect();
        if completed.is_empty() {
            return 0.0;
        }
        let window = completed.len().saturating_sub(Self::WINDOW);

        let (close, blowouts): (Vec<&GameRecord>, Vec<&GameRecord>) = completed[window..]
            .iter()
            .copied()
            .filter(|g| g.differential().is_some())
            .partition(|g| {
                g.differential()
                    .is_some_and(|d| d.abs() <= Self::CLOSE_MARGIN)
            });

        let mut score = 0.0;
        if close.len() >= Self::MIN_CLOSE_GAMES {
            score += Self::average_result(&close, 1.0, -0.7) * 0.8;
            score += (close.len() as f64 / 4.0).min(1.0) * 0.2;
        }
        if !blowouts.is_empty() {
            score += Self::average_result(&blowouts, 0.3, -0.3) * 0.2;
        }
        score
    }

    fn average_result(games: &[&GameRecord], win: f64, loss: f64) -> f64 {
        let total: f64 = games
            .iter()
            .map(|g| {
                if g.is_win() {
                    win
                } else if g.is_loss() {
                    loss
                } else {
                    0.0
                }
            })
            .sum();
        total / games.len() as f64
    }
}

impl Factor for CloseGamePerformance {
    fn name(&self) -> &str {
        "CloseGamePerformance"
    }

    fn profile(&self) -> FactorProfile {
        FactorProfile::new(self.name())
            .description("Close game performance and clutch factor analysis")
            .category(MOMENTUM_FACTORS)
            .weight(0.06)
    }

    fn output_range(&self) -> OutputRange {
        OutputRange::symmetric(1.5)
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
        let Some(context) = context else {
            return Ok(0.0);
        };
        let clutch =
            |side| team_data(context, side).map_or(0.0, |t| Self::clutch_score(&t.schedule));
        Ok(self.validate_output(clutch(Side::Home) - clutch(Side::Away)))
    }

    fn explanation(
        &self,
        home_team: &str,
        away_team: &str,
        value: f64,
        _context: Option<&GameContext>,
    ) -> Option<String> {
        if value.abs() < 0.1 {
            return Some("Similar clutch performance for both teams".to_string());
        }
        let team = favored(home_team, away_team, value);
        if value.abs() > 0.8 {
            Some(format!("{team} excels in close games and clutch situations"))
        } else {
            Some(format!("{team} has slight edge in close game performance"))
        }
    }
}
