mod url;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::BuildError;
use crate::steam::convert_32_to_64;
use crate::types::{
    HistoryPayload, IconPayload, JobKind, LanguagePayload, MatchPayload, NumericId, ParsePayload,
    RequestDescriptor, SequencePayload, SkillPayload, SummariesPayload, TeamPayload,
};

use self::url::{present, ApiUrl};
pub use self::url::{STEAM_API_BASE, STEAM_API_HOST};

/// Build a descriptor from a kind name as it arrives from a queue.
///
/// Fails fast with [`BuildError::UnknownKind`] for names outside the supported set.
pub fn build_descriptor_str(kind: &str, payload: JsonValue) -> Result<RequestDescriptor, BuildError> {
    build_descriptor(kind.parse()?, payload)
}

/// Build the request descriptor for one job.
///
/// API kinds get a Steam Web API URL with an empty `key=` placeholder; the fetcher attaches a
/// real key at send time. [`JobKind::Parse`] passes the caller's URL through untouched.
pub fn build_descriptor(kind: JobKind, payload: JsonValue) -> Result<RequestDescriptor, BuildError> {
    match kind {
        JobKind::MatchDetails => {
            let p: MatchPayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IDOTA2Match_570/GetMatchDetails/V001/")
                .param("match_id", p.match_id)
                .build();
            Ok(describe(kind, url, title(kind, Some(p.match_id)), Some(payload)))
        }
        JobKind::MatchHistory => {
            let p: HistoryPayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IDOTA2Match_570/GetMatchHistory/V001/")
                .opt("account_id", present(p.account_id))
                .opt("matches_requested", present(p.matches_requested))
                .opt("hero_id", present(p.hero_id))
                .opt("league_id", present(p.leagueid))
                .opt("start_at_match_id", present(p.start_at_match_id))
                .build();
            Ok(describe(kind, url, title(kind, p.account_id), Some(payload)))
        }
        JobKind::PlayerSummaries => {
            let p: SummariesPayload = decode(kind, &payload)?;
            let steam_ids = summaries_steam_ids(kind, &p)?;
            let url = ApiUrl::new("/ISteamUser/GetPlayerSummaries/v0002/")
                .param("steamids", steam_ids)
                .build();
            Ok(describe(kind, url, title(kind, p.summaries_id), Some(payload)))
        }
        JobKind::MatchSequence => {
            let p: SequencePayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IDOTA2Match_570/GetMatchHistoryBySequenceNum/V001/")
                .param("start_at_match_seq_num", p.start_at_match_seq_num)
                .build();
            Ok(describe(kind, url, title(kind, p.seq_num), None))
        }
        JobKind::Heroes => {
            let p: LanguagePayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IEconDOTA2_570/GetHeroes/v0001/")
                .text("language", &p.language)
                .build();
            Ok(describe(kind, url, title(kind, Some(&p.language)), Some(payload)))
        }
        JobKind::Items => {
            let p: LanguagePayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IEconDOTA2_570/GetGameItems/v1")
                .text("language", &p.language)
                .build();
            Ok(describe(kind, url, kind.to_string(), None))
        }
        JobKind::Leagues => {
            let p: LanguagePayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IDOTA2Match_570/GetLeagueListing/v0001/")
                .text("language", &p.language)
                .build();
            Ok(describe(kind, url, kind.to_string(), Some(payload)))
        }
        JobKind::SkillHistory => {
            let p: SkillPayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IDOTA2Match_570/GetMatchHistory/v0001/")
                .opt("start_at_match_id", present(p.start_at_match_id))
                .param("skill", p.skill)
                .opt("hero_id", present(p.hero_id))
                .param("min_players", 10)
                .build();
            Ok(describe(kind, url, title(kind, Some(p.skill)), Some(payload)))
        }
        JobKind::LiveLeagueGames => {
            let url = ApiUrl::new("/IDOTA2Match_570/GetLiveLeagueGames/v0001/").build();
            Ok(describe(kind, url, kind.to_string(), Some(payload)))
        }
        JobKind::NotablePlayers => {
            let url = ApiUrl::new("/IDOTA2Fantasy_570/GetProPlayerList/v1/").build();
            Ok(describe(kind, url, kind.to_string(), Some(payload)))
        }
        JobKind::TeamInfo => {
            let p: TeamPayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IDOTA2Teams_570/GetTeamInfo/v1/")
                .param("team_id", p.team_id)
                .build();
            Ok(describe(kind, url, kind.to_string(), Some(payload)))
        }
        JobKind::ItemSchema => {
            let url = ApiUrl::new("/IEconItems_570/GetSchemaURL/v1").build();
            Ok(describe(kind, url, kind.to_string(), None))
        }
        JobKind::ItemIcon => {
            let p: IconPayload = decode(kind, &payload)?;
            let url = ApiUrl::new("/IEconDOTA2_570/GetItemIconPath/v1")
                .text("iconname", &p.iconname)
                .build();
            Ok(describe(kind, url, kind.to_string(), None))
        }
        JobKind::Parse => {
            let p: ParsePayload = decode(kind, &payload)?;
            if p.url.trim().is_empty() {
                return Err(BuildError::invalid_payload(kind, "url must not be empty"));
            }
            let title = title(kind, p.match_id);
            Ok(describe(kind, p.url, title, Some(payload)))
        }
    }
}

fn decode<T: DeserializeOwned>(kind: JobKind, payload: &JsonValue) -> Result<T, BuildError> {
    // Kinds without required fields are routinely enqueued with no payload at all.
    let value = match payload {
        JsonValue::Null => JsonValue::Object(serde_json::Map::new()),
        other => other.clone(),
    };
    serde_json::from_value(value).map_err(|e| BuildError::invalid_payload(kind, e.to_string()))
}

fn summaries_steam_ids(kind: JobKind, p: &SummariesPayload) -> Result<String, BuildError> {
    if p.players.is_empty() {
        return Err(BuildError::invalid_payload(kind, "players must not be empty"));
    }
    let ids = p
        .players
        .iter()
        .map(|player| account_to_steam_id(kind, player.account_id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids.join(","))
}

fn account_to_steam_id(kind: JobKind, account_id: NumericId) -> Result<String, BuildError> {
    let id = u32::try_from(account_id.get()).map_err(|_| {
        BuildError::invalid_payload(kind, format!("account_id {account_id} is not a 32-bit account id"))
    })?;
    Ok(convert_32_to_64(id).to_string())
}

fn title(kind: JobKind, part: Option<impl std::fmt::Display>) -> String {
    match part {
        Some(p) => format!("{kind},{p}"),
        None => kind.to_string(),
    }
}

fn describe(kind: JobKind, url: String, title: String, payload: Option<JsonValue>) -> RequestDescriptor {
    RequestDescriptor {
        kind,
        url,
        title,
        payload,
    }
}
