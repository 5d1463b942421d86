//! Votes on takes.

use serde::{Deserialize, Serialize};

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteType {
    Up,
    Down,
}

/// A single user's vote on a take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Up or down
    #[serde(rename = "type")]
    pub vote_type: VoteType,

    /// Voter
    pub user_id: String,

    /// Take the vote belongs to, when the loader includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_id: Option<String>,
}

impl Vote {
    /// Create a vote without a take reference.
    pub fn new(vote_type: VoteType, user_id: impl Into<String>) -> Self {
        Self {
            vote_type,
            user_id: user_id.into(),
            take_id: None,
        }
    }

    /// Shorthand for an upvote.
    pub fn up(user_id: impl Into<String>) -> Self {
        Self::new(VoteType::Up, user_id)
    }

    /// Shorthand for a downvote.
    pub fn down(user_id: impl Into<String>) -> Self {
        Self::new(VoteType::Down, user_id)
    }

    /// Builder: Attach the take id.
    pub fn for_take(mut self, take_id: impl Into<String>) -> Self {
        self.take_id = Some(take_id.into());
        self
    }

    pub fn is_up(&self) -> bool {
        self.vote_type == VoteType::Up
    }

    pub fn is_down(&self) -> bool {
        self.vote_type == VoteType::Down
    }
}

/// What happened when a user toggled a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// No previous vote; the new one was recorded
    Cast,
    /// Previous vote had the other direction and was replaced
    Switched { from: VoteType },
    /// Same direction voted again; the vote was withdrawn
    Removed,
}
