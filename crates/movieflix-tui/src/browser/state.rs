//! Browser state: category lists, search results, selection, and flags.

use movieflix_api::tmdb::{Movie, MovieCategory};

use super::catalog::{CatalogLists, PageLists};

/// All state the browser view renders from.
///
/// Owned by [`super::Browser`]; mutated only through its operations.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    popular: Vec<Movie>,
    top_rated: Vec<Movie>,
    now_playing: Vec<Movie>,
    upcoming: Vec<Movie>,
    search_results: Vec<Movie>,
    query: String,
    selected: Option<Movie>,
    loading: bool,
    search_loading: bool,
    loading_more: bool,
    /// Last page loaded for the paginated categories.
    page: u32,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    /// Creates an empty state positioned at page 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            popular: Vec::new(),
            top_rated: Vec::new(),
            now_playing: Vec::new(),
            upcoming: Vec::new(),
            search_results: Vec::new(),
            query: String::new(),
            selected: None,
            loading: false,
            search_loading: false,
            loading_more: false,
            page: 1,
        }
    }

    /// Records of a catalog category, in display order.
    #[must_use]
    pub fn list(&self, category: MovieCategory) -> &[Movie] {
        match category {
            MovieCategory::Popular => &self.popular,
            MovieCategory::TopRated => &self.top_rated,
            MovieCategory::NowPlaying => &self.now_playing,
            MovieCategory::Upcoming => &self.upcoming,
        }
    }

    /// Current search results.
    #[must_use]
    pub fn search_results(&self) -> &[Movie] {
        &self.search_results
    }

    /// Current query text, as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the query holds anything besides whitespace.
    #[must_use]
    pub fn query_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Record whose detail view is open.
    #[must_use]
    pub const fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    /// Whether the initial catalog load is running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a search fetch is in flight.
    #[must_use]
    pub const fn is_search_loading(&self) -> bool {
        self.search_loading
    }

    /// Whether a pagination fetch is in flight.
    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Last loaded page of the paginated categories.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    pub(super) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub(super) const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub(super) const fn set_search_loading(&mut self, loading: bool) {
        self.search_loading = loading;
    }

    pub(super) const fn set_loading_more(&mut self, loading: bool) {
        self.loading_more = loading;
    }

    pub(super) fn select(&mut self, movie: Movie) {
        self.selected = Some(movie);
    }

    pub(super) fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Replaces all four category lists.
    pub(super) fn replace_catalog(&mut self, lists: CatalogLists) {
        self.popular = lists.popular;
        self.top_rated = lists.top_rated;
        self.now_playing = lists.now_playing;
        self.upcoming = lists.upcoming;
    }

    /// Replaces the search results and clears the search loading flag.
    pub(super) fn replace_search_results(&mut self, results: Vec<Movie>) {
        self.search_results = results;
        self.search_loading = false;
    }

    /// Empties the search results without a fetch.
    pub(super) fn clear_search(&mut self) {
        self.search_results.clear();
        self.search_loading = false;
    }

    /// Appends a page after the existing entries and advances the cursor.
    pub(super) fn append_page(&mut self, page: PageLists) {
        self.popular.extend(page.popular);
        self.top_rated.extend(page.top_rated);
        self.page = self.page.max(page.page);
        self.loading_more = false;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            ..Movie::default()
        }
    }

    #[test]
    fn test_new_state_starts_at_page_one() {
        // Arrange & Act
        let state = BrowserState::new();

        // Assert
        assert_eq!(state.page(), 1);
        assert!(!state.is_loading());
        assert!(state.selected().is_none());
        for category in MovieCategory::ALL {
            assert!(state.list(category).is_empty());
        }
    }

    #[test]
    fn test_whitespace_query_is_not_active() {
        // Arrange
        let mut state = BrowserState::new();

        // Act
        state.set_query(String::from("   "));

        // Assert
        assert!(!state.query_active());
        assert_eq!(state.query(), "   ");
    }

    #[test]
    fn test_append_page_preserves_order() {
        // Arrange
        let mut state = BrowserState::new();
        state.replace_catalog(CatalogLists {
            popular: vec![movie(1), movie(2)],
            top_rated: vec![movie(10)],
            now_playing: vec![movie(20)],
            upcoming: vec![movie(30)],
        });
        state.set_loading_more(true);

        // Act
        state.append_page(PageLists {
            page: 2,
            popular: vec![movie(3), movie(4)],
            top_rated: vec![movie(11)],
        });

        // Assert
        let popular: Vec<u64> = state.list(MovieCategory::Popular).iter().map(|m| m.id).collect();
        let top_rated: Vec<u64> = state
            .list(MovieCategory::TopRated)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(popular, vec![1, 2, 3, 4]);
        assert_eq!(top_rated, vec![10, 11]);
        assert_eq!(state.list(MovieCategory::NowPlaying).len(), 1);
        assert_eq!(state.page(), 2);
        assert!(!state.is_loading_more());
    }

    #[test]
    fn test_page_cursor_never_moves_backwards() {
        // Arrange
        let mut state = BrowserState::new();
        state.append_page(PageLists {
            page: 3,
            ..PageLists::default()
        });

        // Act
        state.append_page(PageLists {
            page: 2,
            ..PageLists::default()
        });

        // Assert
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn test_select_and_close_detail() {
        // Arrange
        let mut state = BrowserState::new();

        // Act
        state.select(movie(5));
        let opened = state.selected().map(|m| m.id);
        state.close_detail();

        // Assert
        assert_eq!(opened, Some(5));
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_clear_search_empties_results() {
        // Arrange
        let mut state = BrowserState::new();
        state.replace_search_results(vec![movie(1)]);
        state.set_search_loading(true);

        // Act
        state.clear_search();

        // Assert
        assert!(state.search_results().is_empty());
        assert!(!state.is_search_loading());
    }
}
