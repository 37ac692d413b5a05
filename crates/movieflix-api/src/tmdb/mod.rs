//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie list and search
//! endpoints. Every call degrades to an empty list on failure.

mod api;
mod client;
mod images;
mod request;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use images::{BACKDROP_BASE_URL, POSTER_BASE_URL, TMDB_MOVIE_PAGE_URL};
pub use request::{MovieCategory, MovieRequest};
pub use types::{Genre, Movie, MovieListResponse};
