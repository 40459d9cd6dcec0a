/// OMDB metadata provider
///
/// Single GET endpoint keyed by either free-text title (`t=`) or IMDB id
/// (`i=`). OMDB reports "not found" in-band (`Response: "False"`) and uses
/// the literal "N/A" for absent fields; both are normalized in the model
/// layer. Lookups are cached in Redis and retried once on transport
/// failures.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{MediaResult, OmdbTitle},
    services::providers::MetadataProvider,
};

const TITLE_CACHE_TTL: u64 = 3600; // 1 hour
const MEDIA_CACHE_TTL: u64 = 604800; // 1 week
const RETRY_BACKOFF_MS: u64 = 250;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl OmdbProvider {
    pub fn new(
        cache: Cache,
        api_key: String,
        api_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            cache,
        })
    }

    /// Fetches a raw OMDB payload, retrying once on transport failures
    async fn fetch(&self, query: &[(&str, &str)]) -> AppResult<OmdbTitle> {
        match self.try_fetch(query).await {
            Err(AppError::HttpClient(e)) => {
                tracing::warn!(error = %e, "OMDB request failed, retrying once");
                tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS)).await;
                self.try_fetch(query).await
            }
            result => result,
        }
    }

    async fn try_fetch(&self, query: &[(&str, &str)]) -> AppResult<OmdbTitle> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "OMDB returned status {}: {}",
                status, body
            )));
        }

        let payload: OmdbTitle = response.json().await?;
        Ok(payload)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn lookup_by_title(&self, title: &str) -> AppResult<Option<MediaResult>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }

        cached!(
            self.cache,
            CacheKey::TitleLookup(title.to_string()),
            TITLE_CACHE_TTL,
            async move {
                let payload = self.fetch(&[("t", title)]).await?;
                let found = payload.is_found();
                let result = payload.into_media_result();

                tracing::info!(
                    title = %title,
                    found = found,
                    provider = "omdb",
                    "Title lookup completed"
                );

                Ok::<_, AppError>(result)
            }
        )
    }

    async fn lookup_by_id(&self, external_id: &str) -> AppResult<Option<MediaResult>> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(AppError::Validation("Media id cannot be empty".to_string()));
        }

        cached!(
            self.cache,
            CacheKey::MediaLookup(external_id.to_string()),
            MEDIA_CACHE_TTL,
            async move {
                let payload = self.fetch(&[("i", external_id)]).await?;
                let found = payload.is_found();
                let result = payload.into_media_result();

                tracing::info!(
                    media_id = %external_id,
                    found = found,
                    provider = "omdb",
                    "Media lookup completed"
                );

                Ok::<_, AppError>(result)
            }
        )
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
