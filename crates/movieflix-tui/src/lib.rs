//! Terminal movie browser for movieflix.
//!
//! `browser` holds the data-loading and search orchestration; the rest is
//! the `ratatui` + `crossterm` presentation layer.

mod app;
/// Browser state and fetch orchestration.
pub mod browser;
/// Display formatting for movie records.
pub mod format;
mod ui;
/// Cursor and input-mode state for the terminal view.
pub mod view;

pub use app::run_browser;
