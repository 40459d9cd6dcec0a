use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{List, MediaType, NewMediaItem};

pub mod memory;
pub mod postgres;

pub use memory::MemoryListStore;
pub use postgres::PgListStore;

/// Defensive cap on the unbounded "all public lists" query
pub const PUBLIC_LISTS_PAGE_SIZE: usize = 50;

/// Durable storage and query access for lists, with membership management
/// for their embedded media items.
///
/// Implementations own the membership invariant: a list's items hold at
/// most one entry per external id, and item mutations are atomic, so two
/// concurrent additions to the same list cannot lose an update. Counts
/// are never persisted; callers derive them from `items`.
///
/// Ownership is not verified here. Callers pass identity explicitly where
/// an operation records it; gating mutations on an authenticated caller is
/// the route layer's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Creates an empty list and returns it with its store-assigned id
    async fn create_list(&self, owner_id: &str, name: &str, is_private: bool) -> AppResult<List>;

    /// All lists owned by `owner_id`, most recently created first
    async fn get_user_lists(&self, owner_id: &str) -> AppResult<Vec<List>>;

    /// All non-private lists regardless of owner, most recently created
    /// first, capped at [`PUBLIC_LISTS_PAGE_SIZE`]
    async fn get_public_lists(&self) -> AppResult<Vec<List>>;

    /// Point lookup; `None` when the id does not exist (not an error)
    async fn get_list(&self, list_id: Uuid) -> AppResult<Option<List>>;

    /// Appends the item with `added_at = now` and refreshes `updated_at`.
    ///
    /// A duplicate external id is a silent no-op leaving the list
    /// untouched. Fails with `NotFound` when the list does not exist.
    async fn add_item_to_list(&self, list_id: Uuid, item: NewMediaItem) -> AppResult<()>;

    /// Removes the item with the given external id, refreshing
    /// `updated_at`. Idempotent: an absent item is a no-op, not an error.
    async fn remove_item_from_list(
        &self,
        list_id: Uuid,
        item_id: &str,
        media_type: MediaType,
    ) -> AppResult<()>;

    /// Deletes the list; embedded items go with it
    async fn delete_list(&self, list_id: Uuid) -> AppResult<()>;

    /// Sets the privacy flag and refreshes `updated_at`
    async fn update_list_privacy(&self, list_id: Uuid, is_private: bool) -> AppResult<()>;

    /// Every list, any owner, containing an item with this external id.
    /// Matches on the id only, never on other item fields.
    async fn get_lists_containing_item(&self, media_id: &str) -> AppResult<Vec<List>>;
}
