//! Fetch-then-analyze pipeline shared by the CLI and the HTTP API.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{analyze, OverlapReport};
use crate::fetch::{clamp_match_count, FetchError, RiotApi};
use crate::models::{LiveGame, LobbyPlayer, MatchSummary, Puuid, Region, SnipedPlayer, TargetSet};

/// Failures surfaced to the user before or instead of an analysis.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Player not found")]
    PlayerNotFound,

    #[error("Player not in a live game")]
    NotInGame,

    #[error("Upstream API error: {0}")]
    Upstream(#[from] FetchError),
}

/// Result of a full lobby check.
#[derive(Debug, Clone)]
pub struct LobbyCheck {
    pub puuid: Puuid,
    pub game: LiveGame,
    pub snipers: Vec<SnipedPlayer>,
}

/// Drives the upstream lookups and feeds the analyzer.
#[derive(Clone)]
pub struct SnipeCheck {
    api: Arc<dyn RiotApi>,
}

impl SnipeCheck {
    pub fn new(api: Arc<dyn RiotApi>) -> Self {
        Self { api }
    }

    pub async fn resolve(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> Result<Puuid, PipelineError> {
        self.api
            .resolve_riot_id(game_name, tag_line, region)
            .await?
            .ok_or(PipelineError::PlayerNotFound)
    }

    /// Resolve the player and find the game they are in right now.
    pub async fn check_game(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> Result<(Puuid, LiveGame), PipelineError> {
        let puuid = self.resolve(game_name, tag_line, region).await?;
        let game = self
            .api
            .active_game(&puuid, region)
            .await?
            .ok_or(PipelineError::NotInGame)?;

        info!(
            "{}#{} is in game {} ({}, {} players)",
            game_name,
            tag_line,
            game.game_id,
            game.game_mode,
            game.participants.len()
        );
        Ok((puuid, game))
    }

    /// Pull the querier's recent matches in history order.
    ///
    /// A failed or unusable single match is skipped; only a failure to
    /// list the history aborts.
    pub async fn recent_matches(
        &self,
        querier: &Puuid,
        region: Region,
        match_count: u32,
    ) -> Result<Vec<MatchSummary>, PipelineError> {
        let ids = self
            .api
            .match_ids(querier, region, clamp_match_count(match_count))
            .await?;
        info!("Scanning {} recent matches", ids.len());

        let mut matches = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.api.match_summary(id, region).await {
                Ok(Some(summary)) => matches.push(summary),
                Ok(None) => warn!("Match {} unavailable, skipping", id),
                Err(e) => warn!("Failed to fetch match {}: {}", id, e),
            }
        }
        Ok(matches)
    }

    /// Cross-reference `lobby` against the querier's recent history.
    ///
    /// Rows come back in lobby order.
    pub async fn analyze_lobby(
        &self,
        querier: &Puuid,
        lobby: &[LobbyPlayer],
        region: Region,
        match_count: u32,
    ) -> Result<Vec<SnipedPlayer>, PipelineError> {
        let targets = TargetSet::excluding(
            querier,
            lobby
                .iter()
                .filter(|p| !p.puuid.as_str().is_empty())
                .map(|p| p.puuid.clone()),
        );
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let matches = self.recent_matches(querier, region, match_count).await?;
        let report = analyze(querier, &targets, &matches);
        info!(
            "Found {} lobby members in {} matches",
            report.len(),
            matches.len()
        );

        Ok(join_lobby(lobby, report))
    }

    /// Resolve, find the live game and analyze its lobby in one go.
    pub async fn run(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
        match_count: u32,
    ) -> Result<LobbyCheck, PipelineError> {
        let (puuid, game) = self.check_game(game_name, tag_line, region).await?;
        let snipers = self
            .analyze_lobby(&puuid, &game.participants, region, match_count)
            .await?;
        Ok(LobbyCheck {
            puuid,
            game,
            snipers,
        })
    }
}

/// Attach lobby display info to each report entry, in lobby order.
pub fn join_lobby(lobby: &[LobbyPlayer], mut report: OverlapReport) -> Vec<SnipedPlayer> {
    lobby
        .iter()
        .filter_map(|player| {
            report
                .remove(&player.puuid)
                .map(|record| SnipedPlayer::new(player, record))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockRiotApi;
    use crate::models::{MatchId, Participant, Relationship, TeamId};
    use pretty_assertions::assert_eq;

    fn lobby_player(name: &str, puuid: &str, team: u16) -> LobbyPlayer {
        LobbyPlayer {
            summoner_name: name.to_string(),
            tag_line: "NA1".to_string(),
            puuid: Puuid::from(puuid),
            champion_id: 1,
            team_id: TeamId(team),
        }
    }

    fn participant(puuid: &str, team: u16, win: bool) -> Participant {
        Participant {
            puuid: Puuid::from(puuid),
            team_id: TeamId(team),
            win,
            champion_id: 7,
        }
    }

    fn summary(id: &str, participants: Vec<Participant>) -> MatchSummary {
        MatchSummary {
            match_id: MatchId::from(id),
            timestamp: 1_700_000_000_000,
            participants,
        }
    }

    fn game() -> LiveGame {
        LiveGame {
            game_id: 42,
            game_mode: "CLASSIC".to_string(),
            game_start_time: 0,
            participants: vec![
                lobby_player("Me", "q", 100),
                lobby_player("Ally", "a", 100),
                lobby_player("Foe", "f", 200),
                lobby_player("Stranger", "s", 200),
            ],
        }
    }

    fn api() -> MockRiotApi {
        MockRiotApi::new()
            .with_account("Me", "NA1", "q")
            .with_game("q", game())
            .with_matches(
                "q",
                vec![
                    summary(
                        "m1",
                        vec![participant("q", 100, true), participant("f", 100, true)],
                    ),
                    summary(
                        "m2",
                        vec![participant("q", 200, false), participant("f", 100, true)],
                    ),
                    summary(
                        "m3",
                        vec![participant("q", 100, true), participant("a", 200, false)],
                    ),
                ],
            )
    }

    #[tokio::test]
    async fn test_run_full_pipeline() {
        let check = SnipeCheck::new(Arc::new(api()));
        let result = check.run("Me", "NA1", Region::Na1, 20).await.unwrap();

        assert_eq!(result.puuid, Puuid::from("q"));
        assert_eq!(result.game.game_id, 42);

        let names: Vec<_> = result
            .snipers
            .iter()
            .map(|s| s.summoner_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ally", "Foe"]);

        let foe = &result.snipers[1];
        assert_eq!(foe.total_games, 2);
        assert_eq!(foe.wins, 1);
        assert_eq!(foe.losses, 1);
        assert_eq!(foe.matches[0].relationship, Relationship::Teammate);
        assert_eq!(foe.matches[1].relationship, Relationship::Opponent);
    }

    #[tokio::test]
    async fn test_unknown_player() {
        let check = SnipeCheck::new(Arc::new(api()));
        let err = check.run("Nobody", "NA1", Region::Na1, 20).await.unwrap_err();
        assert!(matches!(err, PipelineError::PlayerNotFound));
    }

    #[tokio::test]
    async fn test_not_in_game() {
        let api = MockRiotApi::new().with_account("Idle", "NA1", "idle");
        let check = SnipeCheck::new(Arc::new(api));
        let err = check.run("Idle", "NA1", Region::Na1, 20).await.unwrap_err();
        assert!(matches!(err, PipelineError::NotInGame));
    }

    #[tokio::test]
    async fn test_broken_match_is_skipped() {
        let api = api().with_broken_match("q", "m4");
        let check = SnipeCheck::new(Arc::new(api));
        let matches = check
            .recent_matches(&Puuid::from("q"), Region::Na1, 20)
            .await
            .unwrap();
        assert_eq!(matches.len(), 3);
    }

    #[tokio::test]
    async fn test_history_failure_propagates() {
        let check = SnipeCheck::new(Arc::new(api().with_history_unavailable()));
        let lobby = game().participants;
        let err = check
            .analyze_lobby(&Puuid::from("q"), &lobby, Region::Na1, 20)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_match_count_limits_history() {
        let check = SnipeCheck::new(Arc::new(api()));
        let lobby = game().participants;
        let snipers = check
            .analyze_lobby(&Puuid::from("q"), &lobby, Region::Na1, 1)
            .await
            .unwrap();

        assert_eq!(snipers.len(), 1);
        assert_eq!(snipers[0].summoner_name, "Foe");
        assert_eq!(snipers[0].total_games, 1);
    }

    #[tokio::test]
    async fn test_zero_match_count_still_scans_latest() {
        let check = SnipeCheck::new(Arc::new(api()));
        let matches = check
            .recent_matches(&Puuid::from("q"), Region::Na1, 0)
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_id, MatchId::from("m1"));
    }

    #[tokio::test]
    async fn test_lobby_with_anonymous_player() {
        let check = SnipeCheck::new(Arc::new(api()));
        let mut lobby = game().participants;
        lobby.insert(1, lobby_player("Bot", "", 200));
        let snipers = check
            .analyze_lobby(&Puuid::from("q"), &lobby, Region::Na1, 20)
            .await
            .unwrap();

        let names: Vec<_> = snipers.iter().map(|s| s.summoner_name.as_str()).collect();
        assert_eq!(names, vec!["Ally", "Foe"]);
    }

    #[tokio::test]
    async fn test_lobby_of_only_self_skips_fetch() {
        let check = SnipeCheck::new(Arc::new(MockRiotApi::new().with_history_unavailable()));
        let lobby = vec![lobby_player("Me", "q", 100)];
        let snipers = check
            .analyze_lobby(&Puuid::from("q"), &lobby, Region::Na1, 20)
            .await
            .unwrap();
        assert!(snipers.is_empty());
    }
}
