//! TMDB API response types.

use serde::Deserialize;

// --- Movie lists ---

/// Response from the `movie/*` list endpoints and `search/movie`.
///
/// Only `results` matters to the browser; the pagination metadata is kept
/// for command-line output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Result records, in display order.
    #[serde(default)]
    pub results: Vec<Movie>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Total number of results.
    #[serde(default)]
    pub total_results: Option<u32>,
}

/// A single movie record as returned by TMDB.
///
/// Every field except `id` is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Poster image path fragment (e.g. `/abc.jpg`).
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path fragment.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs (list endpoints).
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Genres with names (detail payloads only).
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}
