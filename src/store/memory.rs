use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{List, MediaType, NewMediaItem};

use super::{ListStore, PUBLIC_LISTS_PAGE_SIZE};

/// In-memory list store
///
/// Backs unit and integration tests; the write lock stands in for the
/// document store's per-document atomicity.
#[derive(Clone, Default)]
pub struct MemoryListStore {
    lists: Arc<RwLock<HashMap<Uuid, List>>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut lists: Vec<List>) -> Vec<List> {
    lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    lists
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn create_list(&self, owner_id: &str, name: &str, is_private: bool) -> AppResult<List> {
        let list = List::new(owner_id.to_string(), name.to_string(), is_private);
        let mut lists = self.lists.write().await;
        lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn get_user_lists(&self, owner_id: &str) -> AppResult<Vec<List>> {
        let lists = self.lists.read().await;
        let owned = lists
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn get_public_lists(&self) -> AppResult<Vec<List>> {
        let lists = self.lists.read().await;
        let public = lists.values().filter(|l| !l.is_private).cloned().collect();
        let mut public = newest_first(public);
        public.truncate(PUBLIC_LISTS_PAGE_SIZE);
        Ok(public)
    }

    async fn get_list(&self, list_id: Uuid) -> AppResult<Option<List>> {
        let lists = self.lists.read().await;
        Ok(lists.get(&list_id).cloned())
    }

    async fn add_item_to_list(&self, list_id: Uuid, item: NewMediaItem) -> AppResult<()> {
        let mut lists = self.lists.write().await;
        let list = lists
            .get_mut(&list_id)
            .ok_or_else(|| AppError::NotFound(format!("List {} does not exist", list_id)))?;

        if list.contains_item(&item.id) {
            tracing::debug!(list_id = %list_id, media_id = %item.id, "Item already in list, skipping");
            return Ok(());
        }

        let now = Utc::now();
        list.items.push(item.into_item(now));
        list.updated_at = now;
        Ok(())
    }

    async fn remove_item_from_list(
        &self,
        list_id: Uuid,
        item_id: &str,
        _media_type: MediaType,
    ) -> AppResult<()> {
        let mut lists = self.lists.write().await;
        let list = lists
            .get_mut(&list_id)
            .ok_or_else(|| AppError::NotFound(format!("List {} does not exist", list_id)))?;

        if let Some(position) = list.items.iter().position(|i| i.id == item_id) {
            list.items.remove(position);
            list.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_list(&self, list_id: Uuid) -> AppResult<()> {
        let mut lists = self.lists.write().await;
        lists
            .remove(&list_id)
            .ok_or_else(|| AppError::NotFound(format!("List {} does not exist", list_id)))?;
        Ok(())
    }

    async fn update_list_privacy(&self, list_id: Uuid, is_private: bool) -> AppResult<()> {
        let mut lists = self.lists.write().await;
        let list = lists
            .get_mut(&list_id)
            .ok_or_else(|| AppError::NotFound(format!("List {} does not exist", list_id)))?;

        list.is_private = is_private;
        list.updated_at = Utc::now();
        Ok(())
    }

    async fn get_lists_containing_item(&self, media_id: &str) -> AppResult<Vec<List>> {
        let lists = self.lists.read().await;
        let containing = lists
            .values()
            .filter(|l| l.contains_item(media_id))
            .cloned()
            .collect();
        Ok(newest_first(containing))
    }
}
