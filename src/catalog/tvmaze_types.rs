/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Anything upstream may send as null or leave out is optional here and is
/// resolved to a concrete value during normalization.
use serde::Deserialize;

/// One entry of the `/search/shows` response array.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchMatch {
    /// The matched show
    pub show: TvMazeShow,
}

/// A show as returned by `/search/shows` (nested) and `/shows/{id}`.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: u32,
    /// The name of the TV show
    pub name: String,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub rating: Option<TvMazeRating>,
    /// Premiere date formatted as YYYY-MM-DD
    #[serde(default)]
    pub premiered: Option<String>,
    /// Show summary in HTML format (may be null)
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TvMazeRating {
    #[serde(default)]
    pub average: Option<f64>,
}

/// Image URLs in the sizes TVMaze serves.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// A single episode from the `/shows/{id}/episodes` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    pub id: u32,
    /// Episode title (may be null for episodes without a title)
    #[serde(default)]
    pub name: Option<String>,
    /// Season number
    pub season: u32,
    /// Episode number within the season (null for specials)
    #[serde(default)]
    pub number: Option<u32>,
    /// Episode summary in HTML format (may be null)
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
}
