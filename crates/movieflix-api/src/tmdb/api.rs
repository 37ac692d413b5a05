//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::request::MovieRequest;
use super::types::Movie;

/// TMDB fetch gateway trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implement `TmdbApi` to get both variants.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the `results` list for the given request.
    ///
    /// Never fails: transport, status, and decode errors are logged and
    /// reported as an empty list, so callers cannot tell "no results" from
    /// "request failed".
    async fn fetch_movies(&self, request: &MovieRequest) -> Vec<Movie>;
}
