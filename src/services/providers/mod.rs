/// External provider abstractions for the recommendation gateway
///
/// The gateway talks to two upstreams: a generative text service that turns
/// a preference prompt into title suggestions, and a metadata service that
/// resolves a title or external id to an enriched media record. Each sits
/// behind a trait so tests (and future providers) can swap them out.
use crate::{error::AppResult, models::MediaResult};

pub mod omdb;
pub mod openai;

pub use omdb::OmdbProvider;
pub use openai::OpenAiCompletions;

/// Trait for generative text providers
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Requests a free-text completion for the given prompt
    ///
    /// The response carries no schema guarantee; callers must parse it
    /// defensively. A failed call or empty payload is an `Upstream` error.
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for media metadata providers
///
/// "Not found" is an in-band `Ok(None)`, distinct from transport or
/// upstream failures.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Resolves a free-text title to an enriched media record
    async fn lookup_by_title(&self, title: &str) -> AppResult<Option<MediaResult>>;

    /// Resolves an external id (e.g. "tt0108778") to an enriched media record
    async fn lookup_by_id(&self, external_id: &str) -> AppResult<Option<MediaResult>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
