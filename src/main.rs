use std::sync::Arc;
use std::time::Duration;

use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use goodflicks_api::config::Config;
use goodflicks_api::db::{create_pool, create_redis_client, Cache};
use goodflicks_api::middleware::{make_span_with_request_id, request_id_middleware};
use goodflicks_api::routes::create_router;
use goodflicks_api::services::providers::{
    CompletionProvider, MetadataProvider, OmdbProvider, OpenAiCompletions,
};
use goodflicks_api::services::RecommendationService;
use goodflicks_api::state::AppState;
use goodflicks_api::store::{ListStore, PgListStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    let timeout = Duration::from_secs(config.http_timeout_secs);

    let metadata: Arc<dyn MetadataProvider> = Arc::new(OmdbProvider::new(
        cache,
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        timeout,
    )?);
    let completions: Arc<dyn CompletionProvider> = Arc::new(OpenAiCompletions::new(
        config.completions_api_key.clone(),
        config.completions_api_url.clone(),
        config.completions_model.clone(),
        timeout,
    )?);
    let recommender = Arc::new(RecommendationService::new(
        completions,
        Arc::clone(&metadata),
    ));
    let lists: Arc<dyn ListStore> = Arc::new(PgListStore::new(pool));

    let state = AppState::new(lists, recommender, metadata);

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
            .layer(TimeoutLayer::new(timeout))
            .layer(CorsLayer::permissive()),
    );

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Goodflicks API listening");

    axum::serve(listener, app).await?;

    cache_writer.shutdown().await;

    Ok(())
}
