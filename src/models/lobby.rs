//! Live-game lobby and the per-player sniper rows built from it.

use serde::{Deserialize, Deserializer, Serialize};

use super::{MatchEntry, OverlapRecord, Puuid, TeamId};

/// Missing and `null` both mean "use the default".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A participant of a game currently in progress.
///
/// Bots and hidden players arrive without a PUUID; they deserialize with an
/// empty one and are never analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyPlayer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summoner_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_line: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub puuid: Puuid,
    #[serde(default, deserialize_with = "null_as_default")]
    pub champion_id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_id: TeamId,
}

/// A game currently in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveGame {
    pub game_id: i64,
    pub game_mode: String,
    pub game_start_time: i64,
    pub participants: Vec<LobbyPlayer>,
}

/// A lobby member joined with their shared history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnipedPlayer {
    pub summoner_name: String,
    pub tag_line: String,
    pub puuid: Puuid,
    pub champion_id: u32,
    pub team_id: TeamId,
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub matches: Vec<MatchEntry>,
}

impl SnipedPlayer {
    pub fn new(player: &LobbyPlayer, record: OverlapRecord) -> Self {
        Self {
            summoner_name: player.summoner_name.clone(),
            tag_line: player.tag_line.clone(),
            puuid: player.puuid.clone(),
            champion_id: player.champion_id,
            team_id: player.team_id,
            total_games: record.total_games,
            wins: record.wins,
            losses: record.losses(),
            matches: record.matches,
        }
    }

    /// `name#tag` display form.
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.summoner_name, self.tag_line)
    }

    /// Newest timestamp among the shared matches.
    pub fn last_played(&self) -> Option<i64> {
        self.matches.iter().map(|m| m.timestamp).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchId, Relationship};

    #[test]
    fn test_sniped_player_derives_losses() {
        let player = LobbyPlayer {
            summoner_name: "Rekkles".to_string(),
            tag_line: "T1".to_string(),
            puuid: Puuid::from("p3"),
            champion_id: 202,
            team_id: TeamId::RED,
        };
        let record = OverlapRecord {
            total_games: 3,
            wins: 2,
            matches: vec![MatchEntry {
                match_id: MatchId::from("m1"),
                timestamp: 1,
                win: true,
                relationship: Relationship::Teammate,
                player_champion_id: 81,
                target_champion_id: 202,
            }],
        };

        let sniped = SnipedPlayer::new(&player, record);
        assert_eq!(sniped.losses, 1);
        assert_eq!(sniped.last_played(), Some(1));
        assert_eq!(sniped.riot_id(), "Rekkles#T1");

        let json = serde_json::to_value(&sniped).unwrap();
        assert_eq!(json["summonerName"], "Rekkles");
        assert_eq!(json["totalGames"], 3);
        assert_eq!(json["teamId"], 200);
    }

    #[test]
    fn test_lobby_player_defaults() {
        let p: LobbyPlayer =
            serde_json::from_str(r#"{"summonerName":"a","tagLine":"b","puuid":"x"}"#).unwrap();
        assert_eq!(p.champion_id, 0);
        assert_eq!(p.team_id, TeamId::BLUE);

        let anonymous: LobbyPlayer = serde_json::from_str(r#"{"teamId": 200}"#).unwrap();
        assert!(anonymous.puuid.as_str().is_empty());
    }

    #[test]
    fn test_lobby_player_null_fields() {
        let bot: LobbyPlayer = serde_json::from_str(
            r#"{"summonerName":null,"tagLine":null,"puuid":null,"championId":null,"teamId":null}"#,
        )
        .unwrap();
        assert!(bot.puuid.as_str().is_empty());
        assert!(bot.summoner_name.is_empty());
        assert_eq!(bot.champion_id, 0);
        assert_eq!(bot.team_id, TeamId::BLUE);
    }
}
