//! Worst takes: the most downvoted takes platform-wide.
//!
//! Independent of verification. Only raw tallies are used, and takes are
//! ordered by downvotes, not by net score.

use crate::error::Result;
use crate::models::Take;
use crate::verification::check_votes;
use serde::{Deserialize, Serialize};

/// Maximum number of takes in the report.
pub const WORST_TAKES_LIMIT: usize = 50;

/// A take with its tallies attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorstTake {
    #[serde(flatten)]
    pub take: Take,
    pub score: i64,
    pub upvotes: u64,
    pub downvotes: u64,
}

impl WorstTake {
    fn tally(take: &Take) -> Self {
        Self {
            take: take.clone(),
            score: take.score(),
            upvotes: take.upvote_count(),
            downvotes: take.downvote_count(),
        }
    }
}

/// The [`WORST_TAKES_LIMIT`] most downvoted takes.
pub fn worst_takes(takes: &[Take]) -> Result<Vec<WorstTake>> {
    worst_takes_with_limit(takes, WORST_TAKES_LIMIT)
}

/// The `limit` most downvoted takes with at least one downvote.
///
/// Ties on downvotes are broken by take id so the report is reproducible.
/// Fails on the same malformed votes the leaderboard rejects.
pub fn worst_takes_with_limit(takes: &[Take], limit: usize) -> Result<Vec<WorstTake>> {
    for take in takes {
        check_votes(take)?;
    }

    let mut worst: Vec<_> = takes
        .iter()
        .filter(|take| take.downvote_count() > 0)
        .map(WorstTake::tally)
        .collect();

    worst.sort_by(|a, b| {
        b.downvotes
            .cmp(&a.downvotes)
            .then_with(|| a.take.id.cmp(&b.take.id))
    });
    worst.truncate(limit);

    tracing::debug!(takes = takes.len(), reported = worst.len(), "built worst takes");
    Ok(worst)
}
