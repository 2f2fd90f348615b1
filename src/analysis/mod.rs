//! Match-history overlap analysis.
//!
//! Cross-references a player's recent matches against a set of target
//! identities and aggregates, per target, how often they shared a game
//! and on which side:
//! - Seed one accumulator per target (the querier excluded)
//! - Fold every match the querier played in
//! - Drop targets with no shared match

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{MatchEntry, MatchSummary, OverlapRecord, Puuid, Relationship, TargetSet};

/// Per-target overlap statistics, sparse: only targets with shared matches.
pub type OverlapReport = HashMap<Puuid, OverlapRecord>;

/// Accumulates overlap records one match at a time.
///
/// Matches folded in separately must be observed in their original order
/// for the per-target entry sequences to follow input order.
#[derive(Debug, Clone)]
pub struct OverlapAccumulator<'a> {
    querier: &'a Puuid,
    records: HashMap<Puuid, OverlapRecord>,
}

impl<'a> OverlapAccumulator<'a> {
    pub fn new(querier: &'a Puuid, targets: &TargetSet) -> Self {
        let records = targets
            .iter()
            .filter(|t| *t != querier)
            .map(|t| (t.clone(), OverlapRecord::default()))
            .collect();
        Self { querier, records }
    }

    /// Fold one match into the accumulator.
    ///
    /// Returns false if the querier did not take part and the match was skipped.
    pub fn observe(&mut self, summary: &MatchSummary) -> bool {
        let Some(me) = summary.participant(self.querier) else {
            debug!(match_id = %summary.match_id, "querier absent, skipping match");
            return false;
        };

        for other in &summary.participants {
            if &other.puuid == self.querier {
                continue;
            }
            let Some(record) = self.records.get_mut(&other.puuid) else {
                continue;
            };

            let relationship = if other.team_id == me.team_id {
                Relationship::Teammate
            } else {
                Relationship::Opponent
            };

            record.push(MatchEntry {
                match_id: summary.match_id.clone(),
                timestamp: summary.timestamp,
                win: me.win,
                relationship,
                player_champion_id: me.champion_id,
                target_champion_id: other.champion_id,
            });
        }

        true
    }

    /// Drop targets with no shared history and return the report.
    pub fn finish(self) -> OverlapReport {
        self.records
            .into_iter()
            .filter(|(_, record)| record.total_games > 0)
            .collect()
    }
}

/// Find which targets co-occurred with `querier` in `matches`.
///
/// Pure and infallible: matches the querier is absent from contribute
/// nothing, and the querier is never reported as its own target.
pub fn analyze<'m, I>(querier: &Puuid, targets: &TargetSet, matches: I) -> OverlapReport
where
    I: IntoIterator<Item = &'m MatchSummary>,
{
    let mut acc = OverlapAccumulator::new(querier, targets);
    for summary in matches {
        acc.observe(summary);
    }
    acc.finish()
}

/// Integer win rate, truncated toward zero.
pub fn win_rate_percent(wins: u32, total_games: u32) -> u32 {
    if total_games == 0 {
        0
    } else {
        (u64::from(wins) * 100 / u64::from(total_games)) as u32
    }
}

/// Relative "last played" label for a millisecond timestamp.
pub fn format_recency(timestamp_ms: Option<i64>, now: DateTime<Utc>) -> String {
    let Some(ts) = timestamp_ms else {
        return "N/A".to_string();
    };
    let Some(then) = DateTime::<Utc>::from_timestamp_millis(ts) else {
        return "N/A".to_string();
    };

    let age = now.signed_duration_since(then);
    if age.num_minutes() < 1 {
        "just now".to_string()
    } else if age.num_hours() < 1 {
        format!("{}m ago", age.num_minutes())
    } else if age.num_days() < 1 {
        format!("{}h ago", age.num_hours())
    } else {
        format!("{}d ago", age.num_days())
    }
}
