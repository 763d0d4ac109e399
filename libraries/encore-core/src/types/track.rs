/// Track domain type
use crate::types::{TrackId, User};
use serde::{Deserialize, Serialize};

/// A playable track as described by the streaming provider
///
/// Tracks are immutable once fetched. Identity is the `id`: two tracks with
/// the same id are the same track even if their metadata differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Provider track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Cover artwork URL
    #[serde(default)]
    pub artwork_url: Option<String>,

    /// Uploader of the track
    pub user: User,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, user: User) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artwork_url: None,
            user,
            description: None,
        }
    }

    /// Set the artwork URL
    #[must_use]
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether `other` refers to the same track (id equality)
    pub fn same_track(&self, other: &Track) -> bool {
        self.id == other.id
    }
}
