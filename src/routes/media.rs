use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::MediaResult,
    state::AppState,
};

/// Handler for the media detail endpoint
///
/// Resolves an external id through the metadata provider; an upstream
/// "not found" becomes a 404 here.
pub async fn show(
    State(state): State<AppState>,
    Path(media_id): Path<String>,
) -> AppResult<Json<MediaResult>> {
    let media = state
        .metadata
        .lookup_by_id(&media_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Media {} not found", media_id)))?;

    Ok(Json(media))
}
