use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{MediaResult, Preferences},
    state::AppState,
};

/// Handler for the recommendations endpoint
///
/// An empty result set is a valid response; the caller renders its own
/// "no results" state.
pub async fn recommend(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> AppResult<Json<Vec<MediaResult>>> {
    let results = state.recommender.recommend(&preferences).await?;
    Ok(Json(results))
}
