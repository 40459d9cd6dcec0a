use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of media an item refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Show,
}

/// A denormalized reference to an externally-sourced movie or show,
/// embedded in a list.
///
/// The `id` is the external metadata identifier (e.g. "tt0108778") and is
/// only unique within a single list's items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Item payload as supplied by the caller; the store stamps `added_at`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewMediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl NewMediaItem {
    /// Materializes the item with its insertion timestamp
    pub fn into_item(self, added_at: DateTime<Utc>) -> MediaItem {
        MediaItem {
            id: self.id,
            media_type: self.media_type,
            title: self.title,
            poster_path: self.poster_path,
            added_at,
        }
    }
}

/// A named, owned collection of media items with a privacy flag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct List {
    pub id: Uuid,
    pub name: String,
    pub owner_id: String,
    pub is_private: bool,
    /// Insertion-ordered; at most one item per external id
    pub items: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl List {
    /// Creates an empty list owned by `owner_id`
    pub fn new(owner_id: String, name: String, is_private: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            owner_id,
            is_private,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Count of embedded movie items, derived from `items`
    pub fn movie_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.media_type == MediaType::Movie)
            .count()
    }

    /// Count of embedded show items, derived from `items`
    pub fn show_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.media_type == MediaType::Show)
            .count()
    }

    /// Membership check on the external id only
    pub fn contains_item(&self, media_id: &str) -> bool {
        self.items.iter().any(|i| i.id == media_id)
    }
}
