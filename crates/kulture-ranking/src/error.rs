//! Error types for kulture-ranking.
//!
//! Every variant is a precondition violation in the input batch. The ranking
//! core refuses to compute rather than produce a silently wrong result.

use thiserror::Error;

/// Result type for ranking operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed input detected while verifying or aggregating takes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A community reappeared while walking parent references.
    #[error("ancestor cycle detected starting at community {community}")]
    AncestorCycle { community: String },

    /// A community reported fewer than zero members.
    #[error("community {community} has negative member count {count}")]
    NegativeMemberCount { community: String, count: i64 },

    /// A parent reference points at a community the directory doesn't know.
    #[error("unknown community: {0}")]
    UnknownCommunity(String),

    /// The same user voted twice on one take.
    #[error("user {user} voted more than once on take {take}")]
    DuplicateVote { take: String, user: String },

    /// A vote attached to one take names a different take.
    #[error("vote by {user} on take {take} references take {vote_take}")]
    ForeignVote {
        take: String,
        vote_take: String,
        user: String,
    },

    /// A verification result was folded together with a different take.
    #[error("verification for take {result_take} paired with take {take}")]
    MismatchedVerification { take: String, result_take: String },
}
