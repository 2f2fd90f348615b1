//! Completed match records as consumed by the overlap analyzer.

use serde::{Deserialize, Serialize};

use super::{MatchId, Puuid, TeamId};

/// One participant's line in a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub puuid: Puuid,
    pub team_id: TeamId,
    pub win: bool,
    pub champion_id: u32,
}

/// A single played match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: MatchId,

    /// Match creation instant, milliseconds since the Unix epoch
    pub timestamp: i64,

    pub participants: Vec<Participant>,
}

impl MatchSummary {
    /// The participation record for `puuid`, if they played in this match.
    pub fn participant(&self, puuid: &Puuid) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.puuid == puuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchSummary {
        MatchSummary {
            match_id: MatchId::from("NA1_1"),
            timestamp: 1_700_000_000_000,
            participants: vec![
                Participant {
                    puuid: Puuid::from("a"),
                    team_id: TeamId::BLUE,
                    win: true,
                    champion_id: 81,
                },
                Participant {
                    puuid: Puuid::from("b"),
                    team_id: TeamId::RED,
                    win: false,
                    champion_id: 202,
                },
            ],
        }
    }

    #[test]
    fn test_participant_lookup() {
        let m = sample();
        assert_eq!(m.participant(&Puuid::from("b")).unwrap().champion_id, 202);
        assert!(m.participant(&Puuid::from("z")).is_none());
    }
}
