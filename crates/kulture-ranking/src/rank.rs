//! Rank lookup: a user's 1-based position on the full leaderboard.
//!
//! Recomputed from the whole batch on every call. There is no incremental
//! index; callers that need cheap repeated lookups should build one
//! [`Leaderboard`] and query it with [`Leaderboard::rank_of`].

use crate::error::Result;
use crate::leaderboard::{build_leaderboard, Leaderboard};
use crate::models::Take;
use serde::{Deserialize, Serialize};

/// Response body for a rank request: `{"rank": n}` or `{"rank": null}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankResponse {
    pub rank: Option<usize>,
}

impl Leaderboard {
    /// 1-based rank of `user_id`, or `None` without a verified take.
    pub fn rank_of(&self, user_id: &str) -> Option<usize> {
        self.iter()
            .position(|entry| entry.id == user_id)
            .map(|idx| idx + 1)
    }
}

/// Build the leaderboard for `takes` and look up `user_id`.
pub fn rank_of(user_id: &str, takes: &[Take]) -> Result<Option<usize>> {
    let rank = build_leaderboard(takes)?.rank_of(user_id);
    tracing::debug!(user = user_id, ?rank, "rank lookup");
    Ok(rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Community};

    fn verified_take(id: &str, author: &str, upvotes: usize) -> Take {
        // Two members: one upvote verifies
        Take::new(id, Author::new(author), Community::new(format!("{}-c", id), 2))
            .with_upvotes(upvotes)
    }

    #[test]
    fn rank_is_one_based() {
        let takes = [
            verified_take("t1", "alice", 1),
            verified_take("t2", "bob", 1),
            verified_take("t3", "bob", 1),
        ];
        assert_eq!(rank_of("bob", &takes).unwrap(), Some(1));
        assert_eq!(rank_of("alice", &takes).unwrap(), Some(2));
    }

    #[test]
    fn unranked_user_is_none() {
        let takes = [verified_take("t1", "alice", 1), verified_take("t2", "carol", 0)];
        assert_eq!(rank_of("carol", &takes).unwrap(), None);
        assert_eq!(rank_of("nobody", &takes).unwrap(), None);
    }

    #[test]
    fn empty_batch() {
        assert_eq!(rank_of("alice", &[]).unwrap(), None);
    }

    #[test]
    fn response_shape() {
        let ranked = serde_json::to_string(&RankResponse { rank: Some(3) }).unwrap();
        assert_eq!(ranked, r#"{"rank":3}"#);
        let unranked = serde_json::to_string(&RankResponse { rank: None }).unwrap();
        assert_eq!(unranked, r#"{"rank":null}"#);
    }
}
