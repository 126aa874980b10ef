//! Static registration table for the built-in factors.

use edge_core::Factor;

use crate::factors::{
    CloseGamePerformance, DesperationIndex, ExperienceDifferential, HeadToHeadRecord,
    LookaheadSandwich, MarketSentiment, PointDifferentialTrends, PressureSituation, RevengeGame,
    SchedulingFatigue, StyleMismatch, VenuePerformance,
};

/// Constructor for one registered factor.
pub type FactorCtor = fn() -> Box<dyn Factor>;

fn boxed<F: Factor + Default + 'static>() -> Box<dyn Factor> {
    Box::new(F::default())
}

/// Every built-in factor, in registration order.
pub const CATALOG: &[(&str, FactorCtor)] = &[
    ("ExperienceDifferential", boxed::<ExperienceDifferential>),
    ("PressureSituation", boxed::<PressureSituation>),
    ("VenuePerformance", boxed::<VenuePerformance>),
    ("HeadToHeadRecord", boxed::<HeadToHeadRecord>),
    ("DesperationIndex", boxed::<DesperationIndex>),
    ("RevengeGame", boxed::<RevengeGame>),
    ("LookaheadSandwich", boxed::<LookaheadSandwich>),
    ("PointDifferentialTrends", boxed::<PointDifferentialTrends>),
    ("CloseGamePerformance", boxed::<CloseGamePerformance>),
    ("SchedulingFatigue", boxed::<SchedulingFatigue>),
    ("StyleMismatch", boxed::<StyleMismatch>),
    ("MarketSentiment", boxed::<MarketSentiment>),
];

/// Instantiate every catalog entry.
pub fn builtin_factors() -> Vec<Box<dyn Factor>> {
    CATALOG.iter().map(|(_, ctor)| ctor()).collect()
}
