//! Per-viewer take views with verification badges.
//!
//! Kulture pages and swipe cards show the same thing: tallies, the viewer's
//! own vote, and a badge per kulture in the chain. They all go through
//! [`TakeView::new`] so the badges never drift from the leaderboard math.
//! The viewer is an explicit argument; nothing here reads session state.

use crate::error::Result;
use crate::models::{Take, VoteType};
use crate::threshold::votes_needed;
use crate::verification::{verify_take, VerificationResult};
use serde::{Deserialize, Serialize};

/// Badge for one kulture in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelBadge {
    pub community_id: String,
    pub verified: bool,
    /// Upvotes still missing; `None` if the level can't verify at all
    pub votes_needed: Option<u64>,
}

/// A take as one viewer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeView {
    pub take_id: String,
    pub score: i64,
    pub upvotes: u64,
    pub downvotes: u64,
    /// The viewer's vote; always `None` for anonymous viewers
    pub current_user_vote: Option<VoteType>,
    pub badges: Vec<LevelBadge>,
    pub verification: VerificationResult,
}

impl TakeView {
    /// Build the view of `take` for `current_user_id`.
    pub fn new(take: &Take, current_user_id: Option<&str>) -> Result<Self> {
        let verification = verify_take(take)?;
        let badges = verification
            .levels
            .iter()
            .map(|level| LevelBadge {
                community_id: level.community_id.clone(),
                verified: level.verified,
                votes_needed: level
                    .member_count
                    .and_then(|members| votes_needed(verification.upvote_count, members)),
            })
            .collect();

        Ok(Self {
            take_id: take.id.clone(),
            score: take.score(),
            upvotes: verification.upvote_count,
            downvotes: take.downvote_count(),
            current_user_vote: current_user_id.and_then(|user| take.vote_of(user)),
            badges,
            verification,
        })
    }

    pub fn verified_count(&self) -> u32 {
        self.verification.verified_count
    }
}

/// Views for a whole feed.
pub fn view_takes(takes: &[Take], current_user_id: Option<&str>) -> Result<Vec<TakeView>> {
    takes
        .iter()
        .map(|take| TakeView::new(take, current_user_id))
        .collect()
}
