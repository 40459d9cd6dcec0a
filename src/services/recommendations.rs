use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{MediaResult, Preferences},
    services::providers::{CompletionProvider, MetadataProvider},
};

/// Number of title suggestions requested from the completion service
const SUGGESTION_COUNT: usize = 5;

/// Turns structured viewing preferences into enriched media records
///
/// One-shot and stateless: ask the completion service for a handful of
/// titles, resolve each against the metadata service in parallel, drop
/// whatever fails to resolve, and hand back the survivors.
pub struct RecommendationService {
    completions: Arc<dyn CompletionProvider>,
    metadata: Arc<dyn MetadataProvider>,
}

impl RecommendationService {
    pub fn new(completions: Arc<dyn CompletionProvider>, metadata: Arc<dyn MetadataProvider>) -> Self {
        Self {
            completions,
            metadata,
        }
    }

    /// Produces up to [`SUGGESTION_COUNT`] enriched recommendations
    ///
    /// A completion-service failure fails the whole operation; a failed or
    /// not-found metadata lookup only drops that one title. An empty or
    /// unparseable completion yields an empty result, never an error.
    pub async fn recommend(&self, preferences: &Preferences) -> AppResult<Vec<MediaResult>> {
        let prompt = build_prompt(preferences);
        tracing::debug!(prompt = %prompt, "Requesting title suggestions");

        let raw = self.completions.complete(&prompt).await?;
        let titles = parse_titles(&raw);

        if titles.is_empty() {
            tracing::warn!(
                provider = self.completions.name(),
                response = %raw,
                "No titles parsed from completion response"
            );
            return Ok(Vec::new());
        }

        tracing::info!(candidates = titles.len(), "Resolving suggested titles");

        let mut tasks = Vec::new();
        for (index, title) in titles.into_iter().enumerate() {
            let metadata = Arc::clone(&self.metadata);
            tasks.push(tokio::spawn(async move {
                let result = metadata.lookup_by_title(&title).await;
                (index, title, result)
            }));
        }

        let mut resolved = Vec::new();
        for task in tasks {
            match task.await {
                Ok((index, _, Ok(Some(media)))) => resolved.push((index, media)),
                Ok((_, title, Ok(None))) => {
                    tracing::debug!(title = %title, "Suggested title not found, dropping");
                }
                Ok((_, title, Err(e))) => {
                    tracing::warn!(error = %e, title = %title, "Metadata lookup failed, dropping title");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                }
            }
        }

        // Parallel resolution returns out of order; restore suggestion order
        resolved.sort_by_key(|(index, _)| *index);

        let mut seen = HashSet::new();
        let results: Vec<MediaResult> = resolved
            .into_iter()
            .map(|(_, media)| media)
            .filter(|media| seen.insert(media.external_id.clone()))
            .collect();

        tracing::info!(results = results.len(), "Recommendation batch complete");

        Ok(results)
    }
}

/// Builds the natural-language prompt sent to the completion service
///
/// The closing instruction pins the response format the parser expects:
/// comma-separated titles, no numbering, no newlines.
pub fn build_prompt(preferences: &Preferences) -> String {
    format!(
        "Suggest {count} movies or TV shows based on these preferences:\n\
         - Genres/Moods: {moods}\n\
         - Watch time preference: {watch_time}\n\
         - Rating preference: {rating}\n\
         - Release time preference: {release}\n\n\
         Please provide exactly {count} titles, separated by commas only, \
         with no numbers or new lines.",
        count = SUGGESTION_COUNT,
        moods = preferences.moods.join(", "),
        watch_time = preferences.watch_time,
        rating = preferences.rating_preference,
        release = preferences.release_time,
    )
}

/// Splits a completion response into candidate titles
///
/// The upstream format is best-effort only, so this never fails: strip
/// newlines, drop leading ordinal numbering ("1. "), trim, and discard
/// empties. Garbage in, empty vec out.
pub fn parse_titles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|segment| {
            let segment = segment.replace('\n', "");
            strip_ordinal(segment.trim()).trim().to_string()
        })
        .filter(|title| !title.is_empty())
        .collect()
}

/// Removes a leading "<digits>." prefix, if present
fn strip_ordinal(segment: &str) -> &str {
    let digits = segment.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = segment[digits..].strip_prefix('.') {
            return rest;
        }
    }
    segment
}
