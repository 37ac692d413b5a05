//! Movie browser TUI main loop.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use movieflix_api::tmdb::{Movie, TmdbApi};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::browser::{Browser, BrowserSettings};
use crate::ui;
use crate::view::{InputMode, ViewState};

/// Runs the movie browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A>(api: A, settings: BrowserSettings) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, Arc::new(api), settings).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: Arc<A>,
    settings: BrowserSettings,
) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    let (mut browser, mut events) = Browser::new(api, settings);
    let mut view = ViewState::new();
    let mut input = EventStream::new();

    browser.start_catalog_load();

    loop {
        let phase = browser.search_phase();
        terminal
            .draw(|frame| ui::draw(frame, browser.state(), phase, &mut view))
            .context("failed to draw TUI")?;

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_key(&mut browser, &mut view, key) {
                        return Ok(());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err).context("failed to read event"),
                None => return Ok(()),
            },
            Some(event) = events.recv() => {
                browser.apply(event);
                while let Some(event) = events.try_recv() {
                    browser.apply(event);
                }
            }
        }

        let state = browser.state();
        view.clamp(
            |category| state.list(category).len(),
            state.search_results().len(),
        );
    }
}

/// Routes a key press. Returns `true` to exit.
fn handle_key<A>(browser: &mut Browser<A>, view: &mut ViewState, key: KeyEvent) -> bool
where
    A: TmdbApi + Send + Sync + 'static,
{
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if browser.state().selected().is_some() {
        handle_detail_input(browser, key.code);
        return false;
    }

    match view.input_mode {
        InputMode::Search => {
            handle_search_input(browser, view, key.code);
            false
        }
        InputMode::Normal => handle_normal_input(browser, view, key.code),
    }
}

/// Handles key input while the detail modal is open.
fn handle_detail_input<A>(browser: &mut Browser<A>, key: KeyCode)
where
    A: TmdbApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Backspace => {
            browser.close_detail();
        }
        KeyCode::Char('o') => {
            if let Some(movie) = browser.state().selected() {
                open_movie_page(movie);
            }
        }
        _ => {}
    }
}

/// Handles key input in search mode.
fn handle_search_input<A>(browser: &mut Browser<A>, view: &mut ViewState, key: KeyCode)
where
    A: TmdbApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Esc => {
            browser.clear_query();
            view.reset_grid();
            view.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            view.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            let mut query = String::from(browser.state().query());
            if query.pop().is_some() {
                browser.set_query(query);
                view.reset_grid();
            }
        }
        KeyCode::Char(c) => {
            let mut query = String::from(browser.state().query());
            query.push(c);
            browser.set_query(query);
            view.reset_grid();
        }
        _ => {}
    }
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input<A>(browser: &mut Browser<A>, view: &mut ViewState, key: KeyCode) -> bool
where
    A: TmdbApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => view.input_mode = InputMode::Search,
        _ if browser.state().query_active() => handle_grid_input(browser, view, key),
        _ => handle_rail_input(browser, view, key),
    }
    false
}

/// Navigation over the search results grid.
fn handle_grid_input<A>(browser: &mut Browser<A>, view: &mut ViewState, key: KeyCode)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let len = browser.state().search_results().len();
    match key {
        KeyCode::Esc => {
            browser.clear_query();
            view.reset_grid();
        }
        KeyCode::Left | KeyCode::Char('h') => view.grid_left(),
        KeyCode::Right | KeyCode::Char('l') => view.grid_right(len),
        KeyCode::Up | KeyCode::Char('k') => view.grid_up(),
        KeyCode::Down | KeyCode::Char('j') => view.grid_down(len),
        KeyCode::Enter => {
            let selected = browser
                .state()
                .search_results()
                .get(view.grid_cursor())
                .cloned();
            if let Some(movie) = selected {
                browser.select(movie);
            }
        }
        _ => {}
    }
}

/// Navigation over the category rails.
fn handle_rail_input<A>(browser: &mut Browser<A>, view: &mut ViewState, key: KeyCode)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let len = browser.state().list(view.focused_category()).len();
    match key {
        KeyCode::Left | KeyCode::Char('h') => view.rail_left(),
        KeyCode::Right | KeyCode::Char('l') => view.rail_right(len),
        KeyCode::PageUp | KeyCode::Char('H') => view.rail_page(len, false),
        KeyCode::PageDown | KeyCode::Char('L') => view.rail_page(len, true),
        KeyCode::Up | KeyCode::Char('k') => view.rail_up(),
        KeyCode::Down | KeyCode::Char('j') => {
            if view.rail_down() {
                browser.load_more();
            }
        }
        KeyCode::Char('m') => {
            browser.load_more();
        }
        KeyCode::Enter => {
            let selected = browser
                .state()
                .list(view.focused_category())
                .get(view.rail_selection())
                .cloned();
            if let Some(movie) = selected {
                browser.select(movie);
            }
        }
        _ => {}
    }
}

/// Opens the themoviedb.org page for a record in the default browser.
fn open_movie_page(movie: &Movie) {
    let url = movie.page_url();
    if let Err(err) = open::that(&url) {
        tracing::error!(url = %url, error = %err, "failed to open browser");
    }
}
