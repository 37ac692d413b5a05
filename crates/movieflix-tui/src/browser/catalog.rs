//! Catalog loading and "load more" pagination fetches.

use movieflix_api::tmdb::{Movie, MovieCategory, MovieRequest, TmdbApi};
use tracing::instrument;

/// First page of every catalog category.
#[derive(Debug, Clone, Default)]
pub struct CatalogLists {
    /// `movie/popular`.
    pub popular: Vec<Movie>,
    /// `movie/top_rated`.
    pub top_rated: Vec<Movie>,
    /// `movie/now_playing`.
    pub now_playing: Vec<Movie>,
    /// `movie/upcoming`.
    pub upcoming: Vec<Movie>,
}

/// One additional page of the paginated categories.
#[derive(Debug, Clone, Default)]
pub struct PageLists {
    /// Page number these records came from.
    pub page: u32,
    /// Next page of `movie/popular`.
    pub popular: Vec<Movie>,
    /// Next page of `movie/top_rated`.
    pub top_rated: Vec<Movie>,
}

/// Fetches the four catalog categories concurrently and waits for all of them.
///
/// A failed category comes back empty; the others are unaffected.
#[instrument(skip_all)]
pub async fn load_catalog<A>(api: &A) -> CatalogLists
where
    A: TmdbApi + Sync,
{
    let popular = MovieRequest::category(MovieCategory::Popular);
    let top_rated = MovieRequest::category(MovieCategory::TopRated);
    let now_playing = MovieRequest::category(MovieCategory::NowPlaying);
    let upcoming = MovieRequest::category(MovieCategory::Upcoming);

    let (popular, top_rated, now_playing, upcoming) = tokio::join!(
        api.fetch_movies(&popular),
        api.fetch_movies(&top_rated),
        api.fetch_movies(&now_playing),
        api.fetch_movies(&upcoming),
    );

    tracing::info!(
        popular = popular.len(),
        top_rated = top_rated.len(),
        now_playing = now_playing.len(),
        upcoming = upcoming.len(),
        "Catalog loaded"
    );

    CatalogLists {
        popular,
        top_rated,
        now_playing,
        upcoming,
    }
}

/// Fetches `page` of the paginated categories concurrently.
#[instrument(skip(api))]
pub async fn load_page<A>(api: &A, page: u32) -> PageLists
where
    A: TmdbApi + Sync,
{
    let popular = MovieRequest::category_page(MovieCategory::Popular, page);
    let top_rated = MovieRequest::category_page(MovieCategory::TopRated, page);

    let (popular, top_rated) =
        tokio::join!(api.fetch_movies(&popular), api.fetch_movies(&top_rated));

    tracing::info!(
        page,
        popular = popular.len(),
        top_rated = top_rated.len(),
        "Page loaded"
    );

    PageLists {
        page,
        popular,
        top_rated,
    }
}
