//! API client library for movieflix.
//!
//! Provides the fetch gateway for the TMDB API v3.

/// TMDB API client.
pub mod tmdb;
