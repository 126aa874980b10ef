//! Shared fixtures for edge-factors integration tests.

#![allow(dead_code)]

use edge_core::errors::FactorError;
use edge_core::types::{
    BookLine, CoachProfile, CoachingComparison, Conference, ConfidenceReading, CurrentRecord,
    DerivedMetrics, FactorConfidence, FactorProfile, FactorType, GameContext, GameRecord,
    HeadToHead, OutputRange, TeamData, TeamInfo, TeamStats,
};
use edge_core::Factor;

/// Factor returning a fixed reading, for aggregation scenarios.
pub struct Fixed {
    pub profile: FactorProfile,
    pub value: f64,
    pub confidence: FactorConfidence,
    pub bound: OutputRange,
}

impl Fixed {
    pub fn new(name: &str, factor_type: FactorType, weight: f64, threshold: f64, value: f64) -> Self {
        Self {
            profile: FactorProfile::new(name)
                .category("statistical")
                .factor_type(factor_type)
                .weight(weight)
                .activation_threshold(threshold),
            value,
            confidence: FactorConfidence::High,
            bound: OutputRange::symmetric(5.0),
        }
    }

    pub fn multiplicative(mut self, max_impact: f64) -> Self {
        self.profile = self.profile.multiplicative(true).max_impact(max_impact);
        self.bound = OutputRange::new(0.5, 1.5);
        self
    }
}

impl Factor for Fixed {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn profile(&self) -> FactorProfile {
        self.profile.clone()
    }

    fn output_range(&self) -> OutputRange {
        self.bound
    }

    fn calculate(&self, _: &str, _: &str, _: Option<&GameContext>) -> Result<f64, FactorError> {
        Ok(self.value)
    }

    fn calculate_with_confidence(
        &self,
        home: &str,
        away: &str,
        context: Option<&GameContext>,
    ) -> Result<ConfidenceReading, FactorError> {
        let value = self.calculate(home, away, context)?;
        Ok(ConfidenceReading::new(value, self.confidence, vec![]))
    }
}

fn game(week: u32, day: &str, home: bool, team: f64, opp: f64) -> GameRecord {
    GameRecord {
        week: Some(week),
        date: Some(day.to_string()),
        completed: true,
        team_score: Some(team),
        opponent_score: Some(opp),
        is_home_game: Some(home),
        result: Some(if team > opp { "W" } else { "L" }.to_string()),
        ..Default::default()
    }
}

fn team(name: &str, wins: u32, losses: u32, schedule: Vec<GameRecord>, stats: TeamStats) -> TeamData {
    TeamData {
        info: Some(TeamInfo {
            name: Some(name.to_string()),
            conference: Some(Conference {
                name: "SEC".to_string(),
            }),
        }),
        stats: Some(stats),
        schedule,
        derived_metrics: Some(DerivedMetrics {
            current_record: Some(CurrentRecord {
                wins,
                losses,
                win_percentage: None,
            }),
            venue_performance: None,
        }),
    }
}

/// A week-9 context with every data kind except historical populated.
pub fn full_context() -> GameContext {
    let home_schedule = vec![
        game(5, "2024-09-28", true, 31.0, 28.0),
        game(6, "2024-10-05", false, 21.0, 24.0),
        game(7, "2024-10-12", true, 42.0, 14.0),
        game(8, "2024-10-17", false, 27.0, 20.0),
    ];
    let away_schedule = vec![
        game(5, "2024-09-28", false, 17.0, 35.0),
        game(6, "2024-10-05", true, 24.0, 21.0),
        game(7, "2024-10-12", false, 10.0, 13.0),
        game(8, "2024-10-19", true, 38.0, 35.0),
    ];
    let home_stats = TeamStats {
        success_rate_off: Some(0.48),
        success_rate_def: Some(0.36),
        explosiveness_off: Some(1.3),
        plays_per_game: Some(64.0),
        havoc_rate: Some(0.18),
        ..Default::default()
    };
    let away_stats = TeamStats {
        success_rate_off: Some(0.41),
        success_rate_def: Some(0.42),
        plays_per_game: Some(77.0),
        havoc_rate: Some(0.12),
        ..Default::default()
    };

    GameContext {
        home_team_data: Some(team("Georgia", 6, 1, home_schedule, home_stats)),
        away_team_data: Some(team("Florida", 4, 3, away_schedule, away_stats)),
        coaching_comparison: Some(CoachingComparison {
            home_coaching: Some(CoachProfile {
                head_coach_experience: Some(10),
                tenure_years: Some(9),
            }),
            away_coaching: Some(CoachProfile {
                head_coach_experience: Some(4),
                tenure_years: Some(2),
            }),
            head_to_head_record: Some(HeadToHead {
                home_wins: 4,
                away_wins: 1,
                total_games: 5,
            }),
        }),
        vegas_spread: Some(-13.5),
        week: Some(9),
        year: Some(2024),
        betting_lines: vec![BookLine {
            provider: Some("consensus".to_string()),
            spread: Some(-13.5),
            spread_open: Some(-12.0),
        }],
        data_quality: Some(0.9),
    }
}
