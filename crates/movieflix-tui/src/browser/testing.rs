//! In-memory `TmdbApi` for browser tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use movieflix_api::tmdb::{Movie, MovieCategory, MovieRequest, TmdbApi};

/// Canned responses keyed by endpoint and page (or search query).
#[derive(Debug, Default)]
pub struct MockApi {
    responses: HashMap<String, Vec<Movie>>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    calls: Mutex<Vec<MovieRequest>>,
}

fn key_for(request: &MovieRequest) -> String {
    if request.path == "/search/movie" {
        format!("search:{}", request.get("query").unwrap_or_default())
    } else {
        format!("{}:{}", request.path, request.get("page").unwrap_or("1"))
    }
}

impl MockApi {
    pub fn with_category(mut self, category: MovieCategory, page: u32, movies: Vec<Movie>) -> Self {
        self.responses
            .insert(format!("{}:{page}", category.path()), movies);
        self
    }

    pub fn with_search(mut self, query: &str, movies: Vec<Movie>) -> Self {
        self.responses.insert(format!("search:{query}"), movies);
        self
    }

    pub fn with_search_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(format!("search:{query}"), delay);
        self
    }

    /// Delay applied to every request without its own delay.
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<MovieRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Queries of every search request, in dispatch order.
    pub fn search_calls(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|r| r.path == "/search/movie")
            .filter_map(|r| r.get("query").map(String::from))
            .collect()
    }
}

impl TmdbApi for MockApi {
    async fn fetch_movies(&self, request: &MovieRequest) -> Vec<Movie> {
        let key = key_for(request);
        self.calls.lock().unwrap().push(request.clone());

        let delay = self.delays.get(&key).copied().unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.responses.get(&key).cloned().unwrap_or_default()
    }
}

/// Minimal records with the given ids.
pub fn movies(ids: &[u64]) -> Vec<Movie> {
    ids.iter()
        .map(|&id| Movie {
            id,
            title: format!("Movie {id}"),
            ..Movie::default()
        })
        .collect()
}

/// Ids of the given records, in order.
pub fn ids(movies: &[Movie]) -> Vec<u64> {
    movies.iter().map(|m| m.id).collect()
}
