//! Results of cross-referencing a lobby against match history.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{MatchId, Puuid};

/// Whether a target stood on the querying player's side in a given match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    #[serde(rename = "with")]
    Teammate,
    #[serde(rename = "against")]
    Opponent,
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relationship::Teammate => write!(f, "teammate"),
            Relationship::Opponent => write!(f, "opponent"),
        }
    }
}

/// One shared match between the querier and a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEntry {
    pub match_id: MatchId,
    pub timestamp: i64,

    /// The querying player's outcome
    pub win: bool,

    #[serde(rename = "team")]
    pub relationship: Relationship,

    #[serde(rename = "playerChampId")]
    pub player_champion_id: u32,

    #[serde(rename = "targetChampId")]
    pub target_champion_id: u32,
}

/// Aggregated shared history with a single target.
///
/// Losses are always derived from `total_games - wins`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapRecord {
    pub total_games: u32,
    pub wins: u32,
    pub matches: Vec<MatchEntry>,
}

impl OverlapRecord {
    pub fn losses(&self) -> u32 {
        self.total_games - self.wins
    }

    pub(crate) fn push(&mut self, entry: MatchEntry) {
        self.total_games += 1;
        if entry.win {
            self.wins += 1;
        }
        self.matches.push(entry);
    }
}

/// Deduplicated set of identities to look for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet(HashSet<Puuid>);

impl TargetSet {
    /// Build a target set, dropping the querier's own identity.
    pub fn excluding<I>(querier: &Puuid, targets: I) -> Self
    where
        I: IntoIterator<Item = Puuid>,
    {
        Self(targets.into_iter().filter(|t| t != querier).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Puuid> {
        self.0.iter()
    }
}

impl FromIterator<Puuid> for TargetSet {
    fn from_iter<I: IntoIterator<Item = Puuid>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(win: bool) -> MatchEntry {
        MatchEntry {
            match_id: MatchId::from("m"),
            timestamp: 0,
            win,
            relationship: Relationship::Teammate,
            player_champion_id: 1,
            target_champion_id: 2,
        }
    }

    #[test]
    fn test_record_push_counts() {
        let mut record = OverlapRecord::default();
        record.push(entry(true));
        record.push(entry(false));
        record.push(entry(false));

        assert_eq!(record.total_games, 3);
        assert_eq!(record.wins, 1);
        assert_eq!(record.losses(), 2);
    }

    #[test]
    fn test_target_set_excludes_querier() {
        let me = Puuid::from("me");
        let set = TargetSet::excluding(
            &me,
            vec![Puuid::from("me"), Puuid::from("a"), Puuid::from("a")],
        );
        let members: Vec<_> = set.iter().collect();
        assert_eq!(members, vec![&Puuid::from("a")]);
    }

    #[test]
    fn test_match_entry_wire_format() {
        let mut e = entry(false);
        e.relationship = Relationship::Opponent;
        let json = serde_json::to_value(&e).unwrap();

        assert_eq!(json["matchId"], "m");
        assert_eq!(json["team"], "against");
        assert_eq!(json["playerChampId"], 1);
        assert_eq!(json["targetChampId"], 2);
        assert_eq!(json["win"], false);
    }
}
