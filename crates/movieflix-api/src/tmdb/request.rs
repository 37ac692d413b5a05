//! Endpoint paths and request parameters.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

/// Predefined catalog categories fetched without a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieCategory {
    /// `movie/popular`.
    Popular,
    /// `movie/top_rated`.
    TopRated,
    /// `movie/now_playing`.
    NowPlaying,
    /// `movie/upcoming`.
    Upcoming,
}

impl MovieCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [
        Self::Popular,
        Self::TopRated,
        Self::NowPlaying,
        Self::Upcoming,
    ];

    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Popular => "/movie/popular",
            Self::TopRated => "/movie/top_rated",
            Self::NowPlaying => "/movie/now_playing",
            Self::Upcoming => "/movie/upcoming",
        }
    }

    /// Human readable section title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::NowPlaying => "Now Playing",
            Self::Upcoming => "Upcoming",
        }
    }

    /// Whether "load more" extends this category.
    #[must_use]
    pub const fn is_paginated(self) -> bool {
        matches!(self, Self::Popular | Self::TopRated)
    }
}

impl fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Popular => "popular",
            Self::TopRated => "top-rated",
            Self::NowPlaying => "now-playing",
            Self::Upcoming => "upcoming",
        };
        f.write_str(name)
    }
}

impl FromStr for MovieCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "popular" => Ok(Self::Popular),
            "top-rated" => Ok(Self::TopRated),
            "now-playing" => Ok(Self::NowPlaying),
            "upcoming" => Ok(Self::Upcoming),
            other => bail!(
                "unknown category '{other}' (expected popular, top-rated, now-playing, upcoming)"
            ),
        }
    }
}

/// A GET request against the TMDB API: an endpoint path plus query parameters.
///
/// The path may already carry a query string (`/movie/popular?page=2`);
/// extra parameters are appended after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRequest {
    /// Endpoint path, optionally with an embedded query string.
    pub path: String,
    /// Extra query parameters, in order.
    pub query: Vec<(String, String)>,
}

impl MovieRequest {
    /// Creates a request for the given path with no extra parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// First page of a catalog category.
    #[must_use]
    pub fn category(category: MovieCategory) -> Self {
        Self::new(category.path())
    }

    /// A specific page of a catalog category.
    #[must_use]
    pub fn category_page(category: MovieCategory, page: u32) -> Self {
        Self::category(category).param("page", page)
    }

    /// Movie title search. The query is URL-encoded when the request is built.
    pub fn search(query: impl Into<String>) -> Self {
        Self::new("/search/movie").param("query", query.into())
    }

    /// Returns the value of the given extra parameter, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_category_paths() {
        // Arrange & Act
        let paths: Vec<&str> = MovieCategory::ALL.iter().map(|c| c.path()).collect();

        // Assert
        assert_eq!(
            paths,
            vec![
                "/movie/popular",
                "/movie/top_rated",
                "/movie/now_playing",
                "/movie/upcoming"
            ]
        );
    }

    #[test]
    fn test_only_popular_and_top_rated_paginate() {
        // Arrange & Act
        let paginated: Vec<MovieCategory> = MovieCategory::ALL
            .into_iter()
            .filter(|c| c.is_paginated())
            .collect();

        // Assert
        assert_eq!(
            paginated,
            vec![MovieCategory::Popular, MovieCategory::TopRated]
        );
    }

    #[test]
    fn test_parse_category_accepts_dashes_and_underscores() {
        // Arrange & Act & Assert
        assert_eq!(
            "top-rated".parse::<MovieCategory>().unwrap(),
            MovieCategory::TopRated
        );
        assert_eq!(
            "now_playing".parse::<MovieCategory>().unwrap(),
            MovieCategory::NowPlaying
        );
        assert_eq!(
            "Upcoming".parse::<MovieCategory>().unwrap(),
            MovieCategory::Upcoming
        );
    }

    #[test]
    fn test_parse_unknown_category() {
        // Arrange & Act
        let result = "trending".parse::<MovieCategory>();

        // Assert
        assert!(result.unwrap_err().to_string().contains("unknown category"));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for category in MovieCategory::ALL {
            // Arrange & Act
            let parsed: MovieCategory = category.to_string().parse().unwrap();

            // Assert
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_page_sets_page_param() {
        // Arrange & Act
        let request = MovieRequest::category_page(MovieCategory::Popular, 2);

        // Assert
        assert_eq!(request.path, "/movie/popular");
        assert_eq!(request.get("page"), Some("2"));
    }

    #[test]
    fn test_search_keeps_raw_query_value() {
        // Arrange & Act
        let request = MovieRequest::search("star wars & co");

        // Assert
        assert_eq!(request.path, "/search/movie");
        assert_eq!(request.get("query"), Some("star wars & co"));
    }
}
