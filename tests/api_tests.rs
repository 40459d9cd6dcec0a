use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;

use goodflicks_api::error::AppResult;
use goodflicks_api::models::{MediaResult, MediaType};
use goodflicks_api::routes::create_router;
use goodflicks_api::services::providers::{CompletionProvider, MetadataProvider};
use goodflicks_api::services::RecommendationService;
use goodflicks_api::state::AppState;
use goodflicks_api::store::MemoryListStore;

struct StubCompletions(String);

#[async_trait::async_trait]
impl CompletionProvider for StubCompletions {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Metadata stub resolving from a fixed title-keyed catalog
struct StubMetadata(HashMap<String, MediaResult>);

#[async_trait::async_trait]
impl MetadataProvider for StubMetadata {
    async fn lookup_by_title(&self, title: &str) -> AppResult<Option<MediaResult>> {
        Ok(self.0.get(title).cloned())
    }

    async fn lookup_by_id(&self, external_id: &str) -> AppResult<Option<MediaResult>> {
        Ok(self
            .0
            .values()
            .find(|m| m.external_id == external_id)
            .cloned())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn media(title: &str, external_id: &str, media_type: MediaType) -> MediaResult {
    MediaResult {
        title: title.to_string(),
        year: Some(1980),
        poster_url: Some(format!("https://posters.test/{}.jpg", external_id)),
        media_type,
        critic_score: Some(7.8),
        community_ratings: vec![],
        plot: Some("A plot.".to_string()),
        awards: None,
        external_id: external_id.to_string(),
    }
}

fn create_test_server_with(completion: &str, catalog: Vec<MediaResult>) -> TestServer {
    let catalog: HashMap<String, MediaResult> = catalog
        .into_iter()
        .map(|m| (m.title.clone(), m))
        .collect();

    let metadata: Arc<dyn MetadataProvider> = Arc::new(StubMetadata(catalog));
    let recommender = Arc::new(RecommendationService::new(
        Arc::new(StubCompletions(completion.to_string())),
        Arc::clone(&metadata),
    ));
    let state = AppState::new(Arc::new(MemoryListStore::new()), recommender, metadata);

    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with("", Vec::new())
}

fn as_user(id: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_static(id),
    )
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_create_list_requires_identity() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/lists")
        .json(&json!({ "name": "Weekend Watch" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_list_rejects_blank_name() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name, value)
        .json(&json!({ "name": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_and_fetch_own_lists() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "name": "Weekend Watch", "is_private": false }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    assert_eq!(created["name"], "Weekend Watch");
    assert_eq!(created["is_private"], false);
    assert_eq!(created["movie_count"], 0);
    assert_eq!(created["show_count"], 0);
    assert_eq!(created["items"].as_array().unwrap().len(), 0);

    let response = server
        .get("/api/v1/lists")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let lists: Vec<serde_json::Value> = response.json();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0]["name"], "Weekend Watch");

    // Another caller sees none of it
    let (name, value) = as_user("u2");
    let response = server.get("/api/v1/lists").add_header(name, value).await;
    let lists: Vec<serde_json::Value> = response.json();
    assert!(lists.is_empty());
}

#[tokio::test]
async fn test_lists_default_to_private() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name, value)
        .json(&json!({ "name": "No Flag Given" }))
        .await;

    let created: serde_json::Value = response.json();
    assert_eq!(created["is_private"], true);

    let response = server.get("/api/v1/lists/public").await;
    let lists: Vec<serde_json::Value> = response.json();
    assert!(lists.is_empty());
}

#[tokio::test]
async fn test_add_item_requires_identity() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name, value)
        .json(&json!({ "name": "Watchlist" }))
        .await;
    let list_id = response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .post(&format!("/api/v1/lists/{}/items", list_id))
        .json(&json!({
            "id": "tt0108778",
            "type": "show",
            "title": "Friends"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_add_keeps_single_entry() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "name": "Watchlist" }))
        .await;
    let list_id = response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let item = json!({
        "id": "tt0108778",
        "type": "show",
        "title": "Friends",
        "poster_path": "https://posters.test/friends.jpg"
    });

    for _ in 0..2 {
        let response = server
            .post(&format!("/api/v1/lists/{}/items", list_id))
            .add_header(name.clone(), value.clone())
            .json(&item)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
    }

    let response = server.get(&format!("/api/v1/lists/{}", list_id)).await;
    let list: serde_json::Value = response.json();
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
    assert_eq!(list["show_count"], 1);
    assert_eq!(list["movie_count"], 0);
}

#[tokio::test]
async fn test_weekend_watch_scenario() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "name": "Weekend Watch", "is_private": false }))
        .await;
    let list_id = response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .post(&format!("/api/v1/lists/{}/items", list_id))
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "id": "tt0108778",
            "type": "show",
            "title": "Friends"
        }))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/api/v1/lists/public").await;
    let lists: Vec<serde_json::Value> = response.json();
    let found = lists
        .iter()
        .find(|l| l["name"] == "Weekend Watch")
        .expect("public lists should include Weekend Watch");
    assert_eq!(found["show_count"], 1);
    assert_eq!(found["movie_count"], 0);

    let response = server
        .delete(&format!("/api/v1/lists/{}/items/tt0108778", list_id))
        .add_header(name, value)
        .add_query_param("type", "show")
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/api/v1/lists/public").await;
    let lists: Vec<serde_json::Value> = response.json();
    let found = lists
        .iter()
        .find(|l| l["name"] == "Weekend Watch")
        .expect("list should still exist after emptying it");
    assert_eq!(found["show_count"], 0);
    assert_eq!(found["movie_count"], 0);
}

#[tokio::test]
async fn test_remove_item_is_idempotent() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "name": "Watchlist" }))
        .await;
    let list_id = response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .post(&format!("/api/v1/lists/{}/items", list_id))
        .add_header(name.clone(), value.clone())
        .json(&json!({ "id": "tt0133093", "type": "movie", "title": "The Matrix" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    for _ in 0..2 {
        let response = server
            .delete(&format!("/api/v1/lists/{}/items/tt0133093", list_id))
            .add_header(name.clone(), value.clone())
            .add_query_param("type", "movie")
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
    }

    let response = server.get(&format!("/api/v1/lists/{}", list_id)).await;
    let list: serde_json::Value = response.json();
    assert!(list["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_lists_containing_item_spans_owners() {
    let server = create_test_server();

    for (user, list_name) in [("u1", "Mine"), ("u2", "Theirs")] {
        let (name, value) = as_user(user);
        let response = server
            .post("/api/v1/lists")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "name": list_name }))
            .await;
        let list_id = response.json::<serde_json::Value>()["id"]
            .as_str()
            .unwrap()
            .to_string();

        server
            .post(&format!("/api/v1/lists/{}/items", list_id))
            .add_header(name, value)
            .json(&json!({ "id": "tt0107048", "type": "movie", "title": "Groundhog Day" }))
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    let response = server.get("/api/v1/lists/containing/tt0107048").await;
    response.assert_status_ok();
    let lists: Vec<serde_json::Value> = response.json();
    assert_eq!(lists.len(), 2);

    let response = server.get("/api/v1/lists/containing/tt9999999").await;
    let lists: Vec<serde_json::Value> = response.json();
    assert!(lists.is_empty());
}

#[tokio::test]
async fn test_privacy_toggle_hides_list_from_public() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "name": "Fickle", "is_private": false }))
        .await;
    let list_id = response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    assert_eq!(
        server
            .get("/api/v1/lists/public")
            .await
            .json::<Vec<serde_json::Value>>()
            .len(),
        1
    );

    let response = server
        .put(&format!("/api/v1/lists/{}/privacy", list_id))
        .add_header(name, value)
        .json(&json!({ "is_private": true }))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    assert!(server
        .get("/api/v1/lists/public")
        .await
        .json::<Vec<serde_json::Value>>()
        .is_empty());
}

#[tokio::test]
async fn test_delete_list() {
    let server = create_test_server();
    let (name, value) = as_user("u1");

    let response = server
        .post("/api/v1/lists")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "name": "Doomed" }))
        .await;
    let list_id = response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .delete(&format!("/api/v1/lists/{}", list_id))
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/v1/lists/{}", list_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .delete(&format!("/api/v1/lists/{}", list_id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_list_is_404() {
    let server = create_test_server();

    server
        .get("/api/v1/lists/00000000-0000-0000-0000-000000000000")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations_flow() {
    let server = create_test_server_with(
        "Airplane!, Groundhog Day, ",
        vec![
            media("Airplane!", "tt0080339", MediaType::Movie),
            media("Groundhog Day", "tt0107048", MediaType::Movie),
        ],
    );

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "moods": ["comedy"],
            "watchTime": "1hour",
            "ratingPreference": "imdb",
            "releaseTime": "classics"
        }))
        .await;

    response.assert_status_ok();
    let results: Vec<serde_json::Value> = response.json();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Airplane!");
    assert_eq!(results[0]["externalId"], "tt0080339");
    assert_eq!(results[0]["mediaType"], "movie");
    assert_eq!(results[1]["title"], "Groundhog Day");
}

#[tokio::test]
async fn test_recommendations_degrade_to_empty() {
    let server = create_test_server_with("  \n ", Vec::new());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "moods": [] }))
        .await;

    response.assert_status_ok();
    let results: Vec<serde_json::Value> = response.json();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_media_detail_lookup() {
    let server = create_test_server_with(
        "",
        vec![media("Airplane!", "tt0080339", MediaType::Movie)],
    );

    let response = server.get("/api/v1/media/tt0080339").await;
    response.assert_status_ok();
    let result: serde_json::Value = response.json();
    assert_eq!(result["title"], "Airplane!");
    assert_eq!(result["externalId"], "tt0080339");

    server
        .get("/api/v1/media/tt0000000")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
