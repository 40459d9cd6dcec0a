use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::state::AppState;

pub mod lists;
pub mod media;
pub mod recommendations;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/lists", post(lists::create).get(lists::user_lists))
        .route("/lists/public", get(lists::public_lists))
        .route("/lists/containing/:media_id", get(lists::containing_item))
        .route("/lists/:id", get(lists::show).delete(lists::destroy))
        .route("/lists/:id/privacy", put(lists::update_privacy))
        .route("/lists/:id/items", post(lists::add_item))
        .route("/lists/:id/items/:item_id", delete(lists::remove_item))
        .route("/recommendations", post(recommendations::recommend))
        .route("/media/:id", get(media::show))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
