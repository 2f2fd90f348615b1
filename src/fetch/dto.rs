//! Wire formats of the upstream REST API.
//!
//! Every field is optional so that one sparse record never fails the
//! whole response; conversion into domain types decides what is usable.

use serde::Deserialize;

use crate::models::{LiveGame, LobbyPlayer, MatchId, MatchSummary, Participant, Puuid, TeamId};

/// `GET /riot/account/v1/accounts/by-riot-id/{gameName}/{tagLine}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: Option<String>,
}

/// `GET /lol/match/v5/matches/{matchId}`
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    pub metadata: Option<MatchMetadataDto>,
    pub info: Option<MatchInfoDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadataDto {
    pub match_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfoDto {
    pub game_creation: Option<i64>,
    #[serde(default)]
    pub participants: Vec<MatchParticipantDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchParticipantDto {
    pub puuid: Option<String>,
    pub team_id: Option<u16>,
    pub win: Option<bool>,
    pub champion_id: Option<u32>,
}

impl MatchParticipantDto {
    fn into_participant(self) -> Option<Participant> {
        Some(Participant {
            puuid: Puuid::new(self.puuid.filter(|p| !p.is_empty())?),
            team_id: TeamId(self.team_id?),
            win: self.win?,
            champion_id: self.champion_id.unwrap_or_default(),
        })
    }
}

impl MatchDto {
    /// Convert into a summary keyed by `requested`.
    ///
    /// Returns `None` without an `info` block or creation time. Participants
    /// missing identity, team or outcome are dropped individually.
    pub fn into_summary(self, requested: &MatchId) -> Option<MatchSummary> {
        let info = self.info?;
        let timestamp = info.game_creation?;
        let match_id = self
            .metadata
            .and_then(|m| m.match_id)
            .map(MatchId::from)
            .unwrap_or_else(|| requested.clone());

        let participants = info
            .participants
            .into_iter()
            .filter_map(MatchParticipantDto::into_participant)
            .collect();

        Some(MatchSummary {
            match_id,
            timestamp,
            participants,
        })
    }
}

/// `GET /lol/spectator/v5/active-games/by-summoner/{puuid}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGameDto {
    pub game_id: Option<i64>,
    pub game_mode: Option<String>,
    pub game_start_time: Option<i64>,
    #[serde(default)]
    pub participants: Vec<ActiveParticipantDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveParticipantDto {
    pub puuid: Option<String>,
    pub riot_id: Option<String>,
    pub summoner_name: Option<String>,
    pub riot_id_tagline: Option<String>,
    pub champion_id: Option<u32>,
    pub team_id: Option<u16>,
}

impl ActiveParticipantDto {
    /// Display name and tag: from `riotId` when it has a `#`, otherwise
    /// from the legacy summoner name fields.
    pub fn name_and_tag(&self) -> (String, String) {
        if let Some((name, tag)) = self.riot_id.as_deref().and_then(|id| id.rsplit_once('#')) {
            return (name.to_string(), tag.to_string());
        }
        (
            self.summoner_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            self.riot_id_tagline
                .clone()
                .unwrap_or_else(|| "NA1".to_string()),
        )
    }

    fn into_player(self) -> LobbyPlayer {
        let (summoner_name, tag_line) = self.name_and_tag();
        LobbyPlayer {
            summoner_name,
            tag_line,
            puuid: Puuid::new(self.puuid.unwrap_or_default()),
            champion_id: self.champion_id.unwrap_or_default(),
            team_id: self.team_id.map(TeamId).unwrap_or_default(),
        }
    }
}

impl From<ActiveGameDto> for LiveGame {
    fn from(dto: ActiveGameDto) -> Self {
        LiveGame {
            game_id: dto.game_id.unwrap_or_default(),
            game_mode: dto.game_mode.unwrap_or_else(|| "CLASSIC".to_string()),
            game_start_time: dto.game_start_time.unwrap_or_default(),
            participants: dto
                .participants
                .into_iter()
                .map(ActiveParticipantDto::into_player)
                .collect(),
        }
    }
}
