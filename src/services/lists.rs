use crate::{
    error::{AppError, AppResult},
    models::{List, NewMediaItem},
    store::ListStore,
};

/// Service functions for list management
///
/// Input validation lives here, before any store call, so the store
/// implementations can assume well-formed arguments and handlers stay
/// thin.

/// Creates a list after validating its name
pub async fn create_list(
    store: &dyn ListStore,
    owner_id: &str,
    name: &str,
    is_private: bool,
) -> AppResult<List> {
    if owner_id.trim().is_empty() {
        return Err(AppError::Unauthenticated);
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "List name cannot be empty".to_string(),
        ));
    }

    store.create_list(owner_id, name, is_private).await
}

/// Adds an item after validating its identifying fields
pub async fn add_item_to_list(
    store: &dyn ListStore,
    list_id: uuid::Uuid,
    item: NewMediaItem,
) -> AppResult<()> {
    if item.id.trim().is_empty() {
        return Err(AppError::Validation(
            "Media id cannot be empty".to_string(),
        ));
    }
    if item.title.trim().is_empty() {
        return Err(AppError::Validation(
            "Media title cannot be empty".to_string(),
        ));
    }

    store.add_item_to_list(list_id, item).await
}
