//! Community (kulture) model with its resolved parent chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A kulture as attached to a take: the community itself plus, recursively,
/// its parent, grandparent and so on.
///
/// `member_count` is a snapshot of the membership size at load time. It is
/// signed so that a corrupt negative count reaches the verification engine
/// and is reported, instead of being rejected anonymously by the decoder.
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` walk the chain in a loop, so
/// chains of any depth are safe to copy, compare and free. Serde
/// (de)serialization still recurses once per level.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Unique identifier
    #[serde(default)]
    pub id: String,

    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Membership size; `None` when the loader didn't count members
    #[serde(default)]
    pub member_count: Option<i64>,

    /// Parent kulture (for subkultures)
    #[serde(default)]
    pub parent: Option<Box<Community>>,
}

impl Community {
    /// Create a root community with a known member count.
    pub fn new(id: impl Into<String>, member_count: i64) -> Self {
        Self {
            id: id.into(),
            name: None,
            member_count: Some(member_count),
            parent: None,
        }
    }

    /// Builder: Set display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: Attach a parent.
    pub fn with_parent(mut self, parent: Community) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Iterate over this community followed by each ancestor, nearest first.
    pub fn levels(&self) -> impl Iterator<Item = &Community> {
        std::iter::successors(Some(self), |c| c.parent.as_deref())
    }

    /// Number of levels in the chain, including this one.
    pub fn depth(&self) -> usize {
        self.levels().count()
    }

    /// Copy of this chain cut to at most `max_depth` levels.
    ///
    /// Loaders that only fetch a fixed number of ancestors produce exactly
    /// this shape. The verification engine itself never truncates.
    pub fn truncated(&self, max_depth: usize) -> Community {
        let mut root = self.detached();
        let mut tail = &mut root.parent;
        for level in self.levels().skip(1).take(max_depth.saturating_sub(1)) {
            let node = tail.insert(Box::new(level.detached()));
            tail = &mut node.parent;
        }
        root
    }

    /// This level alone, without its parent.
    fn detached(&self) -> Community {
        Community {
            id: self.id.clone(),
            name: self.name.clone(),
            member_count: self.member_count,
            parent: None,
        }
    }

    fn same_level(&self, other: &Community) -> bool {
        self.id == other.id && self.name == other.name && self.member_count == other.member_count
    }
}

impl Clone for Community {
    fn clone(&self) -> Self {
        self.truncated(usize::MAX)
    }
}

impl PartialEq for Community {
    fn eq(&self, other: &Self) -> bool {
        let mut ours = self.levels();
        let mut theirs = other.levels();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.same_level(b) => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Community {}

impl fmt::Debug for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.levels().map(|c| (&c.id, &c.name, c.member_count)))
            .finish()
    }
}

impl Drop for Community {
    fn drop(&mut self) {
        // Unlink parents one at a time so dropping never recurses
        let mut next = self.parent.take();
        while let Some(mut parent) = next {
            next = parent.parent.take();
        }
    }
}
