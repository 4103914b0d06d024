use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;

/// The closed set of job variants a descriptor can be built for.
///
/// Wire names match the queue job types (`api_details`, `parse`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobKind {
    MatchDetails,
    MatchHistory,
    PlayerSummaries,
    MatchSequence,
    Heroes,
    Items,
    Leagues,
    SkillHistory,
    LiveLeagueGames,
    NotablePlayers,
    TeamInfo,
    ItemSchema,
    ItemIcon,
    Parse,
}

impl JobKind {
    pub const ALL: [JobKind; 14] = [
        JobKind::MatchDetails,
        JobKind::MatchHistory,
        JobKind::PlayerSummaries,
        JobKind::MatchSequence,
        JobKind::Heroes,
        JobKind::Items,
        JobKind::Leagues,
        JobKind::SkillHistory,
        JobKind::LiveLeagueGames,
        JobKind::NotablePlayers,
        JobKind::TeamInfo,
        JobKind::ItemSchema,
        JobKind::ItemIcon,
        JobKind::Parse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::MatchDetails => "api_details",
            JobKind::MatchHistory => "api_history",
            JobKind::PlayerSummaries => "api_summaries",
            JobKind::MatchSequence => "api_sequence",
            JobKind::Heroes => "api_heroes",
            JobKind::Items => "api_items",
            JobKind::Leagues => "api_leagues",
            JobKind::SkillHistory => "api_skill",
            JobKind::LiveLeagueGames => "api_live",
            JobKind::NotablePlayers => "api_notable",
            JobKind::TeamInfo => "api_teams",
            JobKind::ItemSchema => "api_item_schema",
            JobKind::ItemIcon => "api_item_icon",
            JobKind::Parse => "parse",
        }
    }

    /// True for every variant that targets the Steam Web API and needs a key.
    pub fn is_api(&self) -> bool {
        !matches!(self, JobKind::Parse)
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| BuildError::UnknownKind(s.to_string()))
    }
}

impl serde::Serialize for JobKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for JobKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
