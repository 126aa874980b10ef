//! Kinds of context data a factor can require, and the availability check.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    TeamInfo,
    CoachingData,
    TeamStats,
    ScheduleData,
    BettingData,
    HistoricalData,
}

impl DataKind {
    pub const ALL: [DataKind; 6] = [
        Self::TeamInfo,
        Self::CoachingData,
        Self::TeamStats,
        Self::ScheduleData,
        Self::BettingData,
        Self::HistoricalData,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TeamInfo => "team_info",
            Self::CoachingData => "coaching_data",
            Self::TeamStats => "team_stats",
            Self::ScheduleData => "schedule_data",
            Self::BettingData => "betting_data",
            Self::HistoricalData => "historical_data",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map of data kind → required flag. A kind absent from the map is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredData(BTreeMap<DataKind, bool>);

impl RequiredData {
    /// Nothing required.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: DataKind) -> Self {
        self.0.insert(kind, true);
        self
    }

    pub fn is_required(&self, kind: DataKind) -> bool {
        self.0.get(&kind).copied().unwrap_or(false)
    }

    /// Required kinds in declaration order.
    pub fn required(&self) -> impl Iterator<Item = DataKind> + '_ {
        self.0
            .iter()
            .filter_map(|(kind, required)| required.then_some(*kind))
    }

    /// Full map including every known kind, for reporting.
    pub fn as_map(&self) -> BTreeMap<DataKind, bool> {
        DataKind::ALL
            .iter()
            .map(|kind| (*kind, self.is_required(*kind)))
            .collect()
    }
}

/// Outcome of a factor's pre-flight data check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable { reason: String },
}

impl Availability {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Available => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_iterates_only_required_kinds() {
        let req = RequiredData::none()
            .with(DataKind::ScheduleData)
            .with(DataKind::CoachingData);
        let kinds: Vec<_> = req.required().collect();
        assert_eq!(kinds, vec![DataKind::CoachingData, DataKind::ScheduleData]);
        assert!(!req.is_required(DataKind::BettingData));
        assert_eq!(req.as_map().len(), DataKind::ALL.len());
    }
}
