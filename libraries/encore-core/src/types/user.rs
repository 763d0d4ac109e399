/// User domain type
use serde::{Deserialize, Serialize};

/// The account a track was uploaded by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub username: String,

    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Create a user without an avatar
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            avatar_url: None,
        }
    }

    /// Set the avatar URL
    #[must_use]
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}
