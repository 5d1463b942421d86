//! Kulture Ranking
//!
//! Verification, leaderboards and rank lookup for takes posted in nested
//! kultures.
//!
//! # Hierarchical Verification
//!
//! A take lives in one kulture, which may sit inside a parent kulture, which
//! may sit inside another, and so on. At every level the take is verified
//! when its upvotes reach half of that level's membership, rounded up:
//!
//! - 0 members → never verified
//! - n members → ceil(n / 2) upvotes required
//!
//! Levels are independent. A take can verify in a small subkulture and not
//! in its large parent. The number of verified levels is the take's
//! `verified_count`.
//!
//! # Reports
//!
//! - **Leaderboard**: authors ranked by the sum of their takes' verified counts
//! - **Rank**: one author's position on that leaderboard
//! - **Worst takes**: most downvoted takes, independent of verification
//! - **Take views**: per-viewer tallies and per-level badges
//!
//! Every report is a pure function of the batch it is given. Loading takes,
//! votes and member counts happens before any of this runs.
//!
//! # Example
//!
//! ```
//! use kulture_ranking::{build_leaderboard, Author, Community, Take};
//!
//! let kulture = Community::new("rust-async", 4).with_parent(Community::new("rust", 100));
//! let take = Take::new("t1", Author::new("alice"), kulture).with_upvotes(2);
//!
//! let board = build_leaderboard(&[take]).unwrap();
//! assert_eq!(board.rank_of("alice"), Some(1));
//! assert_eq!(board.entries()[0].points, 1);
//! ```

mod chain;
mod error;
mod leaderboard;
mod models;
mod rank;
mod threshold;
mod verification;
mod view;
mod worst_takes;

pub use chain::{AncestorChain, ChainLevel, CommunityDirectory, CommunityRecord};
pub use error::{Error, Result};
pub use leaderboard::{
    build_leaderboard, compare_entries, Leaderboard, LeaderboardBuilder, LeaderboardEntry,
};
pub use models::{Author, Community, Take, Vote, VoteChange, VoteType};
pub use rank::{rank_of, RankResponse};
pub use threshold::{is_level_verified, required_votes, votes_needed, VERIFY_DIVISOR};
pub use verification::{verify_take, verify_with_chain, LevelVerification, VerificationResult};
pub use view::{view_takes, LevelBadge, TakeView};
pub use worst_takes::{worst_takes, worst_takes_with_limit, WorstTake, WORST_TAKES_LIMIT};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_scales_correctly() {
        assert_eq!(required_votes(0), 0); // Empty, never verifies
        assert_eq!(required_votes(1), 1);
        assert_eq!(required_votes(3), 2);
        assert_eq!(required_votes(4), 2);
        assert_eq!(required_votes(10), 5);
        assert_eq!(required_votes(100), 50);
    }
}
