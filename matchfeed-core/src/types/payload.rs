use std::fmt;

/// An unsigned id that may arrive as a JSON number or as a decimal string.
///
/// Queue producers are not consistent about this (match ids from the web layer are strings,
/// ids from the API are numbers), so both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct NumericId(pub u64);

impl NumericId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NumericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> serde::Deserialize<'de> for NumericId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(NumericId(n)),
            Raw::Text(s) => s
                .trim()
                .parse::<u64>()
                .map(NumericId)
                .map_err(|_| serde::de::Error::custom(format!("invalid numeric id: {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchPayload {
    pub match_id: NumericId,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistoryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<NumericId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches_requested: Option<NumericId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_id: Option<NumericId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leagueid: Option<NumericId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at_match_id: Option<NumericId>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerRef {
    pub account_id: NumericId,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SummariesPayload {
    pub players: Vec<PlayerRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summaries_id: Option<NumericId>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequencePayload {
    pub start_at_match_seq_num: NumericId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq_num: Option<NumericId>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LanguagePayload {
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for LanguagePayload {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "english".to_string()
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SkillPayload {
    pub skill: NumericId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at_match_id: Option<NumericId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_id: Option<NumericId>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TeamPayload {
    pub team_id: NumericId,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IconPayload {
    pub iconname: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParsePayload {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<NumericId>,
}
