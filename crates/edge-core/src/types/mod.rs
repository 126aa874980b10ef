//! Shared value types for factors, games, and outcome feeds.

pub mod confidence;
pub mod context;
pub mod data_kind;
pub mod factor_type;
pub mod outcome;
pub mod output_range;
pub mod prediction_type;
pub mod profile;
pub mod result;

pub use confidence::FactorConfidence;
pub use context::{
    BookLine, CoachProfile, CoachingComparison, Conference, CurrentRecord, DerivedMetrics,
    GameContext, GameRecord, HeadToHead, TeamData, TeamInfo, TeamStats, VenuePerformance,
    VenueRecord,
};
pub use data_kind::{Availability, DataKind, RequiredData};
pub use factor_type::FactorType;
pub use outcome::{FactorSnapshot, GameResult, PredictionRecord};
pub use output_range::OutputRange;
pub use prediction_type::PredictionType;
pub use profile::FactorProfile;
pub use result::{ConfidenceReading, FactorResult};
