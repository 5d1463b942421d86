//! Per-author aggregation of verified takes.
//!
//! Each take with `verified_count > 0` adds to its author's entry:
//!
//! ```text
//! points                        += verified_count
//! verified_takes_count          += 1
//! multi_verified_takes_count    += 1            if verified_count > 1
//! total_verifications           += verified_count
//! max_verifications_on_single_take = max(.., verified_count)
//! ```
//!
//! Takes that verify nowhere are skipped entirely, so an author with no
//! verified take has no entry at all.
//!
//! # Ordering
//!
//! Entries sort by `points` descending, then `verified_takes_count`
//! descending, then author id ascending. The last key makes the order total,
//! so the same batch always produces the same leaderboard.

use crate::error::{Error, Result};
use crate::models::{Author, Take};
use crate::verification::{verify_take, VerificationResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One author's standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Author's user id
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub image: Option<String>,

    /// Sum of verified counts over all takes
    pub points: u64,

    /// Takes verified in at least one kulture
    pub verified_takes_count: u64,

    /// Takes verified in two or more kultures
    pub multi_verified_takes_count: u64,

    /// Same value as `points`; both names appear in reports
    pub total_verifications: u64,

    pub max_verifications_on_single_take: u32,
}

impl LeaderboardEntry {
    /// Empty entry carrying the author snapshot from the first take seen.
    fn for_author(author_id: &str, author: &Author) -> Self {
        Self {
            id: author_id.to_string(),
            name: author.name.clone(),
            username: author.username.clone(),
            image: author.image.clone(),
            points: 0,
            verified_takes_count: 0,
            multi_verified_takes_count: 0,
            total_verifications: 0,
            max_verifications_on_single_take: 0,
        }
    }

    fn record(&mut self, verified_count: u32) {
        let count = u64::from(verified_count);
        self.points += count;
        self.verified_takes_count += 1;
        if verified_count > 1 {
            self.multi_verified_takes_count += 1;
        }
        self.total_verifications += count;
        self.max_verifications_on_single_take =
            self.max_verifications_on_single_take.max(verified_count);
    }
}

/// Leaderboard ordering: points, then verified takes, then id.
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.verified_takes_count.cmp(&a.verified_takes_count))
        .then_with(|| a.id.cmp(&b.id))
}

/// Folds verified takes into per-author entries.
#[derive(Debug, Default)]
pub struct LeaderboardBuilder {
    entries: HashMap<String, LeaderboardEntry>,
    takes_seen: usize,
}

impl LeaderboardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one take and its verification into the board.
    ///
    /// Rejects a result computed for another take; the board is unchanged.
    pub fn add(&mut self, take: &Take, result: &VerificationResult) -> Result<()> {
        if take.id != result.take_id {
            return Err(Error::MismatchedVerification {
                take: take.id.clone(),
                result_take: result.take_id.clone(),
            });
        }
        self.takes_seen += 1;

        if !result.is_verified() {
            return Ok(());
        }

        // First take seen for an author fixes the display fields
        self.entries
            .entry(take.author_id.clone())
            .or_insert_with(|| LeaderboardEntry::for_author(&take.author_id, &take.author))
            .record(result.verified_count);
        Ok(())
    }

    /// Number of takes folded so far, verified or not.
    pub fn takes_seen(&self) -> usize {
        self.takes_seen
    }

    /// Sort and return the finished leaderboard.
    pub fn finish(self) -> Leaderboard {
        let mut entries: Vec<_> = self.entries.into_values().collect();
        entries.sort_by(compare_entries);

        tracing::debug!(
            takes = self.takes_seen,
            entries = entries.len(),
            "built leaderboard"
        );

        Leaderboard { entries }
    }
}

/// Authors ranked by points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeaderboardEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `user_id`, if the user has any verified take.
    pub fn get(&self, user_id: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.id == user_id)
    }

    /// Top `n` entries.
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn into_entries(self) -> Vec<LeaderboardEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a LeaderboardEntry;
    type IntoIter = std::slice::Iter<'a, LeaderboardEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Verify every take and build the leaderboard.
///
/// Stops at the first malformed take.
pub fn build_leaderboard(takes: &[Take]) -> Result<Leaderboard> {
    let mut builder = LeaderboardBuilder::new();
    for take in takes {
        let result = verify_take(take)?;
        builder.add(take, &result)?;
    }
    Ok(builder.finish())
}
