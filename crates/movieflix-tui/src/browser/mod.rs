//! Browser coordinator.
//!
//! [`Browser`] owns the [`BrowserState`] and starts every fetch. Fetches run
//! as spawned tasks and report back as [`BrowserEvent`]s; the event loop
//! feeds them to [`Browser::apply`], so state changes happen one at a time.

mod catalog;
mod debounce;
mod search;
/// Browser state types.
pub mod state;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use movieflix_api::tmdb::{Movie, MovieRequest, TmdbApi};
use tokio::sync::mpsc;

pub use self::catalog::{CatalogLists, PageLists, load_catalog, load_page};
pub use self::debounce::Debouncer;
pub use self::search::{SearchPhase, SearchTracker};
pub use self::state::BrowserState;

/// Default quiet period before a search is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tunables for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserSettings {
    /// Quiet period before a search is dispatched.
    pub debounce: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Completion notices from spawned tasks.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub enum BrowserEvent {
    /// All four catalog fetches settled.
    CatalogLoaded(CatalogLists),
    /// The debounce timer for query edit `seq` elapsed.
    SearchDue {
        /// Query edit sequence number.
        seq: u64,
    },
    /// The search fetch dispatched for `seq` resolved.
    SearchSettled {
        /// Query edit sequence number.
        seq: u64,
        /// Query the fetch was issued for.
        query: String,
        /// Search results.
        results: Vec<Movie>,
    },
    /// A "load more" page resolved.
    PageLoaded(PageLists),
}

/// Receiving end of the browser's event channel.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserEvents {
    rx: mpsc::UnboundedReceiver<BrowserEvent>,
}

impl BrowserEvents {
    /// Waits for the next event.
    pub async fn recv(&mut self) -> Option<BrowserEvent> {
        self.rx.recv().await
    }

    /// Returns an event if one is already queued.
    pub fn try_recv(&mut self) -> Option<BrowserEvent> {
        self.rx.try_recv().ok()
    }
}

/// Sends an event, ignoring a closed channel (the view is shutting down).
fn send(tx: &mpsc::UnboundedSender<BrowserEvent>, event: BrowserEvent) {
    if tx.send(event).is_err() {
        tracing::debug!("browser event channel closed");
    }
}

/// Single owner of the browser state.
#[derive(Debug)]
pub struct Browser<A> {
    api: Arc<A>,
    state: BrowserState,
    search: SearchTracker,
    tx: mpsc::UnboundedSender<BrowserEvent>,
}

impl<A> Browser<A>
where
    A: TmdbApi + Send + Sync + 'static,
{
    /// Creates a browser and the event receiver its tasks report to.
    #[must_use]
    pub fn new(api: Arc<A>, settings: BrowserSettings) -> (Self, BrowserEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        let browser = Self {
            api,
            state: BrowserState::new(),
            search: SearchTracker::new(settings.debounce),
            tx,
        };
        (browser, BrowserEvents { rx })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Phase of the search for the current query.
    #[must_use]
    pub fn search_phase(&self) -> SearchPhase {
        if !self.state.query_active() {
            SearchPhase::Idle
        } else if self.search.is_pending() {
            SearchPhase::Pending
        } else if self.state.is_search_loading() {
            SearchPhase::Loading
        } else {
            SearchPhase::Settled
        }
    }

    /// Starts the initial load of all four catalog categories.
    ///
    /// `loading` stays set until [`BrowserEvent::CatalogLoaded`] is applied.
    pub fn start_catalog_load(&mut self) {
        self.state.set_loading(true);
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let lists = load_catalog(api.as_ref()).await;
            send(&tx, BrowserEvent::CatalogLoaded(lists));
        });
    }

    /// Replaces the query text.
    ///
    /// A blank query empties the results immediately without a fetch. Any
    /// other query restarts the debounce timer.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query.into());

        if !self.state.query_active() {
            self.search.cancel();
            self.state.clear_search();
            tracing::debug!("search cleared");
            return;
        }

        let seq = self.search.next_input();
        let tx = self.tx.clone();
        self.search.debouncer().schedule(async move {
            send(&tx, BrowserEvent::SearchDue { seq });
        });
    }

    /// Clears the query.
    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    /// Fetches the next page of the paginated categories.
    ///
    /// Returns `false` without fetching while a query is active, while a
    /// previous page is still loading, or before the catalog has loaded.
    pub fn load_more(&mut self) -> bool {
        if self.state.query_active() {
            tracing::debug!("load more skipped: search active");
            return false;
        }
        if self.state.is_loading_more() || self.state.is_loading() {
            tracing::debug!("load more skipped: fetch outstanding");
            return false;
        }

        let next_page = self.state.page().saturating_add(1);
        self.state.set_loading_more(true);
        tracing::info!(page = next_page, "Loading more movies");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let page = load_page(api.as_ref(), next_page).await;
            send(&tx, BrowserEvent::PageLoaded(page));
        });
        true
    }

    /// Opens the detail view for a record.
    pub fn select(&mut self, movie: Movie) {
        self.state.select(movie);
    }

    /// Closes the detail view.
    pub fn close_detail(&mut self) {
        self.state.close_detail();
    }

    /// Applies a task completion to the state.
    pub fn apply(&mut self, event: BrowserEvent) {
        match event {
            BrowserEvent::CatalogLoaded(lists) => {
                self.state.replace_catalog(lists);
                self.state.set_loading(false);
            }
            BrowserEvent::SearchDue { seq } => {
                if self.search.is_due(seq) && self.state.query_active() {
                    self.dispatch_search(seq);
                } else {
                    tracing::debug!(seq, "search timer superseded");
                }
            }
            BrowserEvent::SearchSettled {
                seq,
                query,
                results,
            } => {
                if self.search.accepts(seq) && self.state.query_active() {
                    tracing::info!(seq, query = %query, count = results.len(), "Search settled");
                    self.search.settle();
                    self.state.replace_search_results(results);
                } else {
                    tracing::debug!(seq, query = %query, "discarding stale search response");
                }
            }
            BrowserEvent::PageLoaded(page) => {
                self.state.append_page(page);
            }
        }
    }

    /// Dispatches the search fetch for the current query.
    fn dispatch_search(&mut self, seq: u64) {
        self.search.mark_dispatched(seq);
        self.state.set_search_loading(true);

        let query = String::from(self.state.query());
        tracing::debug!(seq, query = %query, "dispatching search");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let request = MovieRequest::search(query.as_str());
            let results = api.fetch_movies(&request).await;
            send(
                &tx,
                BrowserEvent::SearchSettled {
                    seq,
                    query,
                    results,
                },
            );
        });
    }
}
