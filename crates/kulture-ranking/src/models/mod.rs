//! Input models supplied by the surrounding application.
//!
//! # Core Types
//!
//! - [`Take`] - A post with its author, community chain and votes
//! - [`Community`] - A node in the kulture tree, carrying its parent chain
//! - [`Vote`] - One user's up or down vote on a take
//!
//! # Supporting Types
//!
//! - [`Author`] - Opaque author snapshot passed through to reports
//! - [`VoteType`] - `UP` / `DOWN` discriminator
//! - [`VoteChange`] - Outcome of toggling a vote

mod author;
mod community;
mod take;
mod vote;

pub use author::Author;
pub use community::Community;
pub use take::Take;
pub use vote::{Vote, VoteChange, VoteType};
