use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::Identity,
    error::{AppError, AppResult},
    models::{List, MediaItem, MediaType, NewMediaItem},
    services,
    state::AppState,
};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    #[serde(default = "default_private")]
    pub is_private: bool,
}

/// Lists are private unless the creator says otherwise
fn default_private() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdatePrivacyRequest {
    pub is_private: bool,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemQuery {
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: Uuid,
    pub name: String,
    pub owner_id: String,
    pub is_private: bool,
    pub items: Vec<MediaItem>,
    /// Derived from `items`; never stored
    pub movie_count: usize,
    pub show_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<List> for ListResponse {
    fn from(list: List) -> Self {
        let movie_count = list.movie_count();
        let show_count = list.show_count();
        Self {
            id: list.id,
            name: list.name,
            owner_id: list.owner_id,
            is_private: list.is_private,
            items: list.items,
            movie_count,
            show_count,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

fn to_responses(lists: Vec<List>) -> Vec<ListResponse> {
    lists.into_iter().map(ListResponse::from).collect()
}

// Handlers

/// Create a new list owned by the caller
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CreateListRequest>,
) -> AppResult<(StatusCode, Json<ListResponse>)> {
    let list = services::lists::create_list(
        state.lists.as_ref(),
        identity.as_str(),
        &request.name,
        request.is_private,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(list.into())))
}

/// All lists owned by the caller, most recent first
pub async fn user_lists(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<Vec<ListResponse>>> {
    let lists = state.lists.get_user_lists(identity.as_str()).await?;
    Ok(Json(to_responses(lists)))
}

/// All public lists regardless of owner, most recent first
pub async fn public_lists(State(state): State<AppState>) -> AppResult<Json<Vec<ListResponse>>> {
    let lists = state.lists.get_public_lists().await?;
    Ok(Json(to_responses(lists)))
}

/// Point lookup by list id
pub async fn show(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> AppResult<Json<ListResponse>> {
    let list = state
        .lists
        .get_list(list_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("List {} does not exist", list_id)))?;

    Ok(Json(list.into()))
}

/// Delete a list (and, with it, its embedded items)
pub async fn destroy(
    State(state): State<AppState>,
    _identity: Identity,
    Path(list_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.lists.delete_list(list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a list's privacy flag
pub async fn update_privacy(
    State(state): State<AppState>,
    _identity: Identity,
    Path(list_id): Path<Uuid>,
    Json(request): Json<UpdatePrivacyRequest>,
) -> AppResult<StatusCode> {
    state
        .lists
        .update_list_privacy(list_id, request.is_private)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a media item to a list; a duplicate id is accepted and ignored
pub async fn add_item(
    State(state): State<AppState>,
    _identity: Identity,
    Path(list_id): Path<Uuid>,
    Json(item): Json<NewMediaItem>,
) -> AppResult<StatusCode> {
    services::lists::add_item_to_list(state.lists.as_ref(), list_id, item).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a media item from a list; removing an absent item is a no-op
pub async fn remove_item(
    State(state): State<AppState>,
    _identity: Identity,
    Path((list_id, item_id)): Path<(Uuid, String)>,
    Query(query): Query<RemoveItemQuery>,
) -> AppResult<StatusCode> {
    state
        .lists
        .remove_item_from_list(list_id, &item_id, query.media_type)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Every list containing the given media id, used to pre-select
/// "already in this list" state in add-to-list UIs
pub async fn containing_item(
    State(state): State<AppState>,
    Path(media_id): Path<String>,
) -> AppResult<Json<Vec<ListResponse>>> {
    let lists = state.lists.get_lists_containing_item(&media_id).await?;
    Ok(Json(to_responses(lists)))
}
