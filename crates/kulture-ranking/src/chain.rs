//! Ancestor chains: the ordered list of kultures a take is evaluated against.
//!
//! A take is checked at its own kulture, then the parent, then the
//! grandparent, and so on until a kulture has no parent. There is no depth
//! limit here; loaders that cap the fetch depth do so before the chain
//! reaches this module (see [`Community::truncated`]).
//!
//! Two input shapes are supported:
//! - the nested [`Community`] value that arrives attached to each take
//! - a flat [`CommunityDirectory`] keyed by id with parent references, the
//!   shape a relational store hands back

use crate::error::{Error, Result};
use crate::models::Community;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One kulture in a validated chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLevel {
    pub community_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Validated non-negative member count
    pub member_count: Option<u64>,
}

/// A validated chain, nearest kulture first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorChain {
    levels: Vec<ChainLevel>,
}

impl AncestorChain {
    /// Validate a nested community chain.
    ///
    /// Fails on negative member counts and on a community id that appears
    /// twice. Communities without an id can't be checked for repetition.
    pub fn from_community(community: &Community) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut levels = Vec::new();

        for level in community.levels() {
            if !level.id.is_empty() && !seen.insert(level.id.as_str()) {
                return Err(Error::AncestorCycle {
                    community: level.id.clone(),
                });
            }

            let member_count = match level.member_count {
                Some(count) if count < 0 => {
                    return Err(Error::NegativeMemberCount {
                        community: level.id.clone(),
                        count,
                    })
                }
                Some(count) => Some(count as u64),
                None => None,
            };

            levels.push(ChainLevel {
                community_id: level.id.clone(),
                name: level.name.clone(),
                member_count,
            });
        }

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[ChainLevel] {
        &self.levels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChainLevel> {
        self.levels.iter()
    }

    /// Number of levels. Always at least one.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<'a> IntoIterator for &'a AncestorChain {
    type Item = &'a ChainLevel;
    type IntoIter = std::slice::Iter<'a, ChainLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A community row as stored: parent by reference, not by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub member_count: Option<i64>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl CommunityRecord {
    pub fn new(id: impl Into<String>, member_count: i64) -> Self {
        Self {
            id: id.into(),
            name: None,
            member_count: Some(member_count),
            parent_id: None,
        }
    }

    /// Builder: Set parent id.
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Builder: Set display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Flat table of communities, used to build the nested chains takes carry.
#[derive(Debug, Clone, Default)]
pub struct CommunityDirectory {
    records: HashMap<String, CommunityRecord>,
}

impl CommunityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a community. Returns the previous record with that id.
    pub fn insert(&mut self, record: CommunityRecord) -> Option<CommunityRecord> {
        self.records.insert(record.id.clone(), record)
    }

    pub fn get(&self, id: &str) -> Option<&CommunityRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Walk parent references from `id` to the root.
    fn walk(&self, id: &str) -> Result<Vec<&CommunityRecord>> {
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        let mut current = Some(id);

        while let Some(cur) = current {
            let record = self
                .records
                .get(cur)
                .ok_or_else(|| Error::UnknownCommunity(cur.to_string()))?;
            if !visited.insert(record.id.as_str()) {
                return Err(Error::AncestorCycle {
                    community: record.id.clone(),
                });
            }
            path.push(record);
            current = record.parent_id.as_deref();
        }

        Ok(path)
    }

    /// Build the nested community value for `id`, parents attached.
    pub fn nest(&self, id: &str) -> Result<Community> {
        let path = self.walk(id)?;
        path.into_iter()
            .rev()
            .fold(None, |parent: Option<Community>, record| {
                Some(Community {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    member_count: record.member_count,
                    parent: parent.map(Box::new),
                })
            })
            .ok_or_else(|| Error::UnknownCommunity(id.to_string()))
    }

    /// Resolve and validate the full chain for `id`.
    pub fn resolve_chain(&self, id: &str) -> Result<AncestorChain> {
        AncestorChain::from_community(&self.nest(id)?)
    }
}

impl FromIterator<CommunityRecord> for CommunityDirectory {
    fn from_iter<I: IntoIterator<Item = CommunityRecord>>(iter: I) -> Self {
        let mut directory = Self::new();
        for record in iter {
            directory.insert(record);
        }
        directory
    }
}
