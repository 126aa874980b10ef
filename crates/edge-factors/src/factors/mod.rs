//! Concrete factors.
//!
//! Every factor is a stateless unit struct. Values are in points from the
//! home team's perspective, except `MarketSentiment`, which is a multiplier
//! around 1.0.

pub mod coaching;
pub mod market_sentiment;
pub mod momentum;
pub mod scheduling_fatigue;
pub mod situational;
pub mod style_mismatch;

pub use coaching::{ExperienceDifferential, HeadToHeadRecord, PressureSituation, VenuePerformance};
pub use market_sentiment::MarketSentiment;
pub use momentum::{CloseGamePerformance, PointDifferentialTrends};
pub use scheduling_fatigue::SchedulingFatigue;
pub use situational::{DesperationIndex, LookaheadSandwich, RevengeGame};
pub use style_mismatch::StyleMismatch;

use edge_core::types::{GameContext, TeamData};
use statrs::statistics::Statistics;

pub const COACHING_EDGE: &str = "coaching_edge";
pub const SITUATIONAL_CONTEXT: &str = "situational_context";
pub const MOMENTUM_FACTORS: &str = "momentum_factors";

/// Home or away side of the matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Home,
    Away,
}

pub(crate) fn team_data(context: &GameContext, side: Side) -> Option<&TeamData> {
    match side {
        Side::Home => context.home_team_data.as_ref(),
        Side::Away => context.away_team_data.as_ref(),
    }
}

/// The team a signed value favors.
pub(crate) fn favored<'a>(home_team: &'a str, away_team: &'a str, value: f64) -> &'a str {
    if value > 0.0 {
        home_team
    } else {
        away_team
    }
}

/// Sample standard deviation; `None` below two points.
pub(crate) fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.iter().std_dev())
}
