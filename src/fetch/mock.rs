//! In-memory upstream for tests and offline demos.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use super::{FetchError, RiotApi};
use crate::models::{LiveGame, MatchId, MatchSummary, Puuid, Region};

/// Canned responses keyed by identity. Region is ignored.
#[derive(Debug, Default, Clone)]
pub struct MockRiotApi {
    accounts: HashMap<(String, String), Puuid>,
    games: HashMap<Puuid, LiveGame>,
    histories: HashMap<Puuid, Vec<MatchId>>,
    matches: HashMap<MatchId, MatchSummary>,
    broken_matches: HashSet<MatchId>,
    history_unavailable: bool,
}

impl MockRiotApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, game_name: &str, tag_line: &str, puuid: &str) -> Self {
        self.accounts.insert(
            (game_name.to_string(), tag_line.to_string()),
            Puuid::from(puuid),
        );
        self
    }

    pub fn with_game(mut self, puuid: &str, game: LiveGame) -> Self {
        self.games.insert(Puuid::from(puuid), game);
        self
    }

    /// Register matches and append their ids to `puuid`'s history in order.
    pub fn with_matches(mut self, puuid: &str, matches: Vec<MatchSummary>) -> Self {
        let history = self.histories.entry(Puuid::from(puuid)).or_default();
        for summary in matches {
            history.push(summary.match_id.clone());
            self.matches.insert(summary.match_id.clone(), summary);
        }
        self
    }

    /// Listed in `puuid`'s history but failing with a server error on fetch.
    pub fn with_broken_match(mut self, puuid: &str, match_id: &str) -> Self {
        let id = MatchId::from(match_id);
        self.histories
            .entry(Puuid::from(puuid))
            .or_default()
            .push(id.clone());
        self.broken_matches.insert(id);
        self
    }

    /// Make every match-history lookup fail.
    pub fn with_history_unavailable(mut self) -> Self {
        self.history_unavailable = true;
        self
    }
}

fn server_error() -> FetchError {
    FetchError::HttpStatus {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

#[async_trait]
impl RiotApi for MockRiotApi {
    async fn resolve_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        _region: Region,
    ) -> Result<Option<Puuid>, FetchError> {
        Ok(self
            .accounts
            .get(&(game_name.to_string(), tag_line.to_string()))
            .cloned())
    }

    async fn active_game(
        &self,
        puuid: &Puuid,
        _region: Region,
    ) -> Result<Option<LiveGame>, FetchError> {
        Ok(self.games.get(puuid).cloned())
    }

    async fn match_ids(
        &self,
        puuid: &Puuid,
        _region: Region,
        count: u32,
    ) -> Result<Vec<MatchId>, FetchError> {
        if self.history_unavailable {
            return Err(server_error());
        }
        Ok(self
            .histories
            .get(puuid)
            .map(|ids| ids.iter().take(count as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn match_summary(
        &self,
        match_id: &MatchId,
        _region: Region,
    ) -> Result<Option<MatchSummary>, FetchError> {
        if self.broken_matches.contains(match_id) {
            return Err(server_error());
        }
        Ok(self.matches.get(match_id).cloned())
    }
}
