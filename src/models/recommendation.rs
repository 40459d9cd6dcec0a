use serde::{Deserialize, Serialize};

use super::MediaType;

/// Structured viewing preferences submitted to the recommendation endpoint
///
/// Every field is empty-tolerant: an empty `moods` set or blank strings are
/// valid input, in which case the completion service falls back to its own
/// defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub watch_time: String,
    #[serde(default)]
    pub rating_preference: String,
    #[serde(default)]
    pub release_time: String,
}

/// One third-party rating attached to a media result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRating {
    pub source: String,
    pub value: String,
}

/// An enriched media record returned by the recommendation gateway and the
/// media detail lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaResult {
    pub title: String,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    pub media_type: MediaType,
    pub critic_score: Option<f32>,
    pub community_ratings: Vec<CommunityRating>,
    pub plot: Option<String>,
    pub awards: Option<String>,
    pub external_id: String,
}

// ============================================================================
// OMDB API Types
// ============================================================================

/// One entry of the OMDB `Ratings` array
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Raw OMDB title payload
///
/// OMDB signals "not found" in-band via `Response: "False"` plus an `Error`
/// string, and uses the literal `"N/A"` for absent fields, so everything
/// beyond `Response` is optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbTitle {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Awards", default)]
    pub awards: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<OmdbRating>,
}

/// Maps OMDB's `"N/A"` placeholder (and empty strings) to a real absence
fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty() && v != "N/A")
}

/// Parses the leading year out of OMDB year strings ("2010", "1994–2004")
fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

impl OmdbTitle {
    /// Whether the payload describes a found title
    pub fn is_found(&self) -> bool {
        self.response != "False"
    }

    /// Converts the raw payload into a `MediaResult`
    ///
    /// Returns `None` for not-found payloads and for degenerate responses
    /// missing the title or the external id.
    pub fn into_media_result(self) -> Option<MediaResult> {
        if !self.is_found() {
            return None;
        }

        let title = present(self.title)?;
        let external_id = present(self.imdb_id)?;

        let media_type = match self.media_type.as_deref() {
            Some("series") => MediaType::Show,
            _ => MediaType::Movie,
        };

        Some(MediaResult {
            title,
            year: present(self.year).and_then(|y| parse_year(&y)),
            poster_url: present(self.poster),
            media_type,
            critic_score: present(self.imdb_rating).and_then(|r| r.parse().ok()),
            community_ratings: self
                .ratings
                .into_iter()
                .map(|r| CommunityRating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
            plot: present(self.plot),
            awards: present(self.awards),
            external_id,
        })
    }
}
