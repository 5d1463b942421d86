//! Take model - a post placed in one kulture.

use super::author::Author;
use super::community::Community;
use super::vote::{Vote, VoteChange, VoteType};
use serde::{Deserialize, Serialize};

/// A take together with everything the ranking core needs to evaluate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Take {
    /// Unique identifier
    pub id: String,

    /// Author's user id
    pub author_id: String,

    /// Author snapshot (passthrough)
    #[serde(default)]
    pub author: Author,

    /// Kulture the take was posted in, with its ancestor chain
    pub community: Community,

    /// Creation timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Current votes, at most one per user
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl Take {
    /// Create a take with no votes.
    pub fn new(id: impl Into<String>, author: Author, community: Community) -> Self {
        Self {
            id: id.into(),
            author_id: author.id.clone(),
            author,
            community,
            created_at: None,
            votes: Vec::new(),
        }
    }

    /// Builder: Add a vote.
    pub fn with_vote(mut self, vote: Vote) -> Self {
        self.votes.push(vote);
        self
    }

    /// Builder: Add `count` upvotes from distinct synthetic users.
    pub fn with_upvotes(mut self, count: usize) -> Self {
        let start = self.votes.len();
        self.votes
            .extend((start..start + count).map(|i| Vote::up(format!("{}-up-{}", self.id, i))));
        self
    }

    /// Builder: Add `count` downvotes from distinct synthetic users.
    pub fn with_downvotes(mut self, count: usize) -> Self {
        let start = self.votes.len();
        self.votes
            .extend((start..start + count).map(|i| Vote::down(format!("{}-down-{}", self.id, i))));
        self
    }

    /// Builder: Set creation timestamp.
    pub fn with_created_at(mut self, timestamp: impl Into<String>) -> Self {
        self.created_at = Some(timestamp.into());
        self
    }

    pub fn upvote_count(&self) -> u64 {
        self.votes.iter().filter(|v| v.is_up()).count() as u64
    }

    pub fn downvote_count(&self) -> u64 {
        self.votes.iter().filter(|v| v.is_down()).count() as u64
    }

    /// Net score: upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.upvote_count() as i64 - self.downvote_count() as i64
    }

    /// The vote `user_id` currently has on this take, if any.
    pub fn vote_of(&self, user_id: &str) -> Option<VoteType> {
        self.votes
            .iter()
            .find(|v| v.user_id == user_id)
            .map(|v| v.vote_type)
    }

    /// Apply a vote with toggle semantics.
    ///
    /// Voting the same direction twice withdraws the vote; voting the other
    /// direction replaces it. A user never ends up with more than one vote.
    pub fn toggle_vote(&mut self, user_id: &str, vote_type: VoteType) -> VoteChange {
        match self.votes.iter().position(|v| v.user_id == user_id) {
            Some(idx) if self.votes[idx].vote_type == vote_type => {
                self.votes.remove(idx);
                VoteChange::Removed
            }
            Some(idx) => {
                let from = self.votes[idx].vote_type;
                self.votes[idx].vote_type = vote_type;
                VoteChange::Switched { from }
            }
            None => {
                self.votes
                    .push(Vote::new(vote_type, user_id).for_take(self.id.clone()));
                VoteChange::Cast
            }
        }
    }
}
