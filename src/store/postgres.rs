use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{List, MediaItem, MediaType, NewMediaItem};

use super::{ListStore, PUBLIC_LISTS_PAGE_SIZE};

const LIST_COLUMNS: &str = "id, owner_id, name, is_private, items, created_at, updated_at";

/// PostgreSQL-backed list store
///
/// Each list is one row with its items embedded as a JSONB array, so
/// deleting the row deletes the membership with it. Item mutations lock
/// the row, re-check membership, and write the array back in one
/// transaction; that read-check-write is what keeps the one-item-per-id
/// invariant under concurrent writers.
#[derive(Clone)]
pub struct PgListStore {
    pool: PgPool,
}

impl PgListStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_items(value: serde_json::Value) -> AppResult<Vec<MediaItem>> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Internal(format!("Corrupt items payload: {}", e)))
}

fn encode_items(items: &[MediaItem]) -> AppResult<serde_json::Value> {
    serde_json::to_value(items)
        .map_err(|e| AppError::Internal(format!("Item serialization error: {}", e)))
}

fn row_to_list(row: &PgRow) -> AppResult<List> {
    Ok(List {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        is_private: row.try_get("is_private")?,
        items: decode_items(row.try_get("items")?)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ListStore for PgListStore {
    async fn create_list(&self, owner_id: &str, name: &str, is_private: bool) -> AppResult<List> {
        let list = List::new(owner_id.to_string(), name.to_string(), is_private);

        sqlx::query(
            "INSERT INTO lists (id, owner_id, name, is_private, items, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(list.id)
        .bind(&list.owner_id)
        .bind(&list.name)
        .bind(list.is_private)
        .bind(encode_items(&list.items)?)
        .bind(list.created_at)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(list_id = %list.id, owner_id = %owner_id, "List created");

        Ok(list)
    }

    async fn get_user_lists(&self, owner_id: &str) -> AppResult<Vec<List>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM lists WHERE owner_id = $1 ORDER BY created_at DESC",
            LIST_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_list).collect()
    }

    async fn get_public_lists(&self) -> AppResult<Vec<List>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM lists WHERE is_private = FALSE ORDER BY created_at DESC LIMIT $1",
            LIST_COLUMNS
        ))
        .bind(PUBLIC_LISTS_PAGE_SIZE as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_list).collect()
    }

    async fn get_list(&self, list_id: Uuid) -> AppResult<Option<List>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM lists WHERE id = $1",
            LIST_COLUMNS
        ))
        .bind(list_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_list).transpose()
    }

    async fn add_item_to_list(&self, list_id: Uuid, item: NewMediaItem) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT items FROM lists WHERE id = $1 FOR UPDATE")
            .bind(list_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("List {} does not exist", list_id)))?;

        let mut items = decode_items(row.try_get("items")?)?;

        if items.iter().any(|i| i.id == item.id) {
            tracing::debug!(list_id = %list_id, media_id = %item.id, "Item already in list, skipping");
            tx.rollback().await?;
            return Ok(());
        }

        let now = Utc::now();
        let media_id = item.id.clone();
        items.push(item.into_item(now));

        sqlx::query("UPDATE lists SET items = $2, updated_at = $3 WHERE id = $1")
            .bind(list_id)
            .bind(encode_items(&items)?)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(list_id = %list_id, media_id = %media_id, "Item added to list");

        Ok(())
    }

    async fn remove_item_from_list(
        &self,
        list_id: Uuid,
        item_id: &str,
        _media_type: MediaType,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT items FROM lists WHERE id = $1 FOR UPDATE")
            .bind(list_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("List {} does not exist", list_id)))?;

        let mut items = decode_items(row.try_get("items")?)?;

        let Some(position) = items.iter().position(|i| i.id == item_id) else {
            tx.rollback().await?;
            return Ok(());
        };
        items.remove(position);

        sqlx::query("UPDATE lists SET items = $2, updated_at = $3 WHERE id = $1")
            .bind(list_id)
            .bind(encode_items(&items)?)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(list_id = %list_id, media_id = %item_id, "Item removed from list");

        Ok(())
    }

    async fn delete_list(&self, list_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(list_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("List {} does not exist", list_id)));
        }

        tracing::info!(list_id = %list_id, "List deleted");

        Ok(())
    }

    async fn update_list_privacy(&self, list_id: Uuid, is_private: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE lists SET is_private = $2, updated_at = $3 WHERE id = $1")
            .bind(list_id)
            .bind(is_private)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("List {} does not exist", list_id)));
        }

        Ok(())
    }

    async fn get_lists_containing_item(&self, media_id: &str) -> AppResult<Vec<List>> {
        // JSONB containment on the id field only: matches any array entry
        // whose object includes {"id": media_id}, whatever else it carries
        let rows = sqlx::query(&format!(
            "SELECT {} FROM lists \
             WHERE items @> jsonb_build_array(jsonb_build_object('id', $1::text)) \
             ORDER BY created_at DESC",
            LIST_COLUMNS
        ))
        .bind(media_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_list).collect()
    }
}
