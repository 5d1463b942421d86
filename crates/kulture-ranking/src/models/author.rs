//! Author snapshot attached to each take.

use serde::{Deserialize, Serialize};

/// Display fields for a take's author.
///
/// The ranking core never interprets these beyond the id; they are copied
/// into leaderboard entries as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// User identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Handle
    #[serde(default)]
    pub username: Option<String>,

    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
}

impl Author {
    /// Create an author with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            username: None,
            image: None,
        }
    }

    /// Builder: Set display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: Set username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Builder: Set avatar image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
