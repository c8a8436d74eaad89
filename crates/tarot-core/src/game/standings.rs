//! Running totals, ranks and rank movement derived from a round sequence.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::model::player::PlayerCount;
use crate::model::round::Round;

/// Movement of a player in the standings since the previous round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankChange {
    /// Moved towards rank 1.
    Up,
    /// Fell away from rank 1.
    Down,
    #[default]
    Same,
}

impl RankChange {
    /// Smaller rank numbers are better.
    pub fn between(previous: usize, current: usize) -> Self {
        if previous > current {
            RankChange::Up
        } else if previous < current {
            RankChange::Down
        } else {
            RankChange::Same
        }
    }
}

/// One player's standing after a given round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CumulativeEntry {
    pub score: i32,
    /// 1-based; tied players share a rank.
    pub rank: usize,
    pub rank_change: RankChange,
}

impl CumulativeEntry {
    pub const BASELINE: CumulativeEntry = CumulativeEntry {
        score: 0,
        rank: 1,
        rank_change: RankChange::Same,
    };
}

impl Default for CumulativeEntry {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Standings before any round has been played.
pub fn baseline(player_count: PlayerCount) -> Vec<CumulativeEntry> {
    vec![CumulativeEntry::BASELINE; player_count.get()]
}

/// Ranks for a set of totals.
///
/// Each player's rank is `len - i`, where `i` is the last index of their
/// total in the ascending-sorted totals. Tied players therefore share the
/// best rank of their group and the next distinct total skips the tied
/// positions: `[10, 10, -20]` ranks as `[1, 1, 3]`.
pub fn rank_totals(totals: &[i32]) -> Vec<usize> {
    let mut sorted = totals.to_vec();
    sorted.sort_unstable();
    totals
        .iter()
        .map(|total| {
            let last = sorted
                .iter()
                .rposition(|candidate| candidate == total)
                .unwrap_or(0);
            totals.len() - last
        })
        .collect()
}

/// Folds `rounds` into one standings row per round.
///
/// Every round must be scored for `player_count` players; a mismatch is
/// reported before anything is folded.
pub fn derive_standings(
    player_count: PlayerCount,
    rounds: &[Round],
) -> Result<Vec<Vec<CumulativeEntry>>, RuleError> {
    if let Some(round) = rounds
        .iter()
        .find(|round| round.player_count() != player_count)
    {
        return Err(RuleError::PlayerCountMismatch {
            expected: player_count.get(),
            found: round.player_count().get(),
        });
    }
    Ok(fold_standings(player_count, rounds))
}

/// Same as [`derive_standings`] for rounds already known to share
/// `player_count`.
pub(crate) fn fold_standings(
    player_count: PlayerCount,
    rounds: &[Round],
) -> Vec<Vec<CumulativeEntry>> {
    let mut previous = baseline(player_count);
    let mut rows = Vec::with_capacity(rounds.len());

    for (index, round) in rounds.iter().enumerate() {
        let totals: Vec<i32> = previous
            .iter()
            .zip(round.scores())
            .map(|(entry, score)| entry.score + score)
            .collect();
        let ranks = rank_totals(&totals);

        let row: Vec<CumulativeEntry> = totals
            .iter()
            .zip(&ranks)
            .zip(&previous)
            .map(|((&score, &rank), before)| CumulativeEntry {
                score,
                rank,
                rank_change: if index == 0 {
                    RankChange::Same
                } else {
                    RankChange::between(before.rank, rank)
                },
            })
            .collect();

        rows.push(row.clone());
        previous = row;
    }

    rows
}
