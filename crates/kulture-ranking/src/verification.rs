//! Take verification across the kulture hierarchy.
//!
//! A take is *verified* at a level when its upvotes reach half of that
//! kulture's membership, rounded up. Each level of the ancestor chain is
//! judged on its own:
//!
//! ```text
//! verified_count = |{ level ∈ chain : members(level) > 0 ∧ upvotes ≥ ⌈members(level) / 2⌉ }|
//! ```
//!
//! Only upvotes count. Downvotes feed the net score shown elsewhere but
//! never move a take toward or away from verification. Nothing is sticky:
//! the result is recomputed from the current vote set on every call.

use crate::chain::{AncestorChain, ChainLevel};
use crate::error::{Error, Result};
use crate::models::Take;
use crate::threshold::{is_level_verified, required_votes};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome for one level of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelVerification {
    pub community_id: String,
    pub member_count: Option<u64>,
    /// `None` when the member count is unknown
    pub required_votes: Option<u64>,
    pub verified: bool,
}

impl LevelVerification {
    fn evaluate(level: &ChainLevel, upvotes: u64) -> Self {
        Self {
            community_id: level.community_id.clone(),
            member_count: level.member_count,
            required_votes: level.member_count.map(required_votes),
            verified: level
                .member_count
                .is_some_and(|members| is_level_verified(upvotes, members)),
        }
    }
}

/// Verification of a single take at every level of its chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub take_id: String,
    pub upvote_count: u64,
    /// Nearest kulture first
    pub levels: Vec<LevelVerification>,
    pub verified_count: u32,
}

impl VerificationResult {
    /// Verified in at least one kulture.
    pub fn is_verified(&self) -> bool {
        self.verified_count > 0
    }

    /// Verified in more than one kulture.
    pub fn is_multi_verified(&self) -> bool {
        self.verified_count > 1
    }
}

/// Verify a take against its full ancestor chain.
///
/// Fails fast on malformed input: a user voting twice, a vote that belongs
/// to another take, a negative member count or a cyclic chain.
pub fn verify_take(take: &Take) -> Result<VerificationResult> {
    check_votes(take)?;
    let chain = AncestorChain::from_community(&take.community)?;
    Ok(evaluate(take, &chain))
}

/// Verify a take against an already validated chain.
///
/// Useful when many takes share one kulture and the caller resolved the
/// chain once through a [`crate::CommunityDirectory`]. The take's own
/// `community` field is ignored; its votes are still checked.
pub fn verify_with_chain(take: &Take, chain: &AncestorChain) -> Result<VerificationResult> {
    check_votes(take)?;
    Ok(evaluate(take, chain))
}

fn evaluate(take: &Take, chain: &AncestorChain) -> VerificationResult {
    let upvote_count = take.upvote_count();

    let levels: Vec<_> = chain
        .iter()
        .map(|level| LevelVerification::evaluate(level, upvote_count))
        .collect();
    let verified_count = levels.iter().filter(|l| l.verified).count() as u32;

    tracing::trace!(
        take = %take.id,
        upvotes = upvote_count,
        depth = levels.len(),
        verified_count,
        "verified take"
    );

    VerificationResult {
        take_id: take.id.clone(),
        upvote_count,
        levels,
        verified_count,
    }
}

/// At most one vote per user, and every vote belongs to this take.
pub(crate) fn check_votes(take: &Take) -> Result<()> {
    let mut voters = HashSet::with_capacity(take.votes.len());
    for vote in &take.votes {
        if let Some(vote_take) = &vote.take_id {
            if vote_take != &take.id {
                return Err(Error::ForeignVote {
                    take: take.id.clone(),
                    vote_take: vote_take.clone(),
                    user: vote.user_id.clone(),
                });
            }
        }
        if !voters.insert(vote.user_id.as_str()) {
            return Err(Error::DuplicateVote {
                take: take.id.clone(),
                user: vote.user_id.clone(),
            });
        }
    }
    Ok(())
}
