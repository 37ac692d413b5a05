//! TUI rendering logic for the movie browser.

use movieflix_api::tmdb::{Movie, MovieCategory};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::browser::{BrowserState, SearchPhase};
use crate::format::{
    RatingTier, format_rating, format_release_date, genre_names, rating_badge, release_year,
    truncate,
};
use crate::view::{CARD_WIDTH, InputMode, ViewState};

/// Card height in rows, borders included.
const CARD_HEIGHT: u16 = 5;

/// Text shown for a missing image.
const NO_IMAGE: &str = "No Image";

const ORANGE: Color = Color::Rgb(255, 165, 0);

fn tier_color(tier: RatingTier) -> Color {
    match tier {
        RatingTier::Excellent => Color::Green,
        RatingTier::Good => Color::Yellow,
        RatingTier::Fair => ORANGE,
        RatingTier::Poor => Color::Red,
    }
}

/// Draws the browser.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState, phase: SearchPhase, view: &mut ViewState) {
    let area = frame.area();
    if state.is_loading() {
        draw_loading(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // rails or grid
            Constraint::Length(3), // footer
        ])
        .split(area);

    draw_header(frame, chunks[0], state, phase, view);

    if state.query_active() {
        draw_search_grid(frame, chunks[1], state, phase, view);
    } else {
        draw_rails(frame, chunks[1], state, view);
    }

    draw_footer(frame, chunks[2], state, view);

    if let Some(movie) = state.selected() {
        draw_detail(frame, area, movie);
    }
}

/// Draws the full-screen loading message.
fn draw_loading(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Loading Movies",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Discovering amazing content for you..."),
    ];
    let inner = centered(area, 60, 5);
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Draws the search input and the status box.
#[allow(clippy::indexing_slicing)]
fn draw_header(
    frame: &mut Frame,
    area: Rect,
    state: &BrowserState,
    phase: SearchPhase,
    view: &ViewState,
) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if view.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let search = Paragraph::new(state.query()).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search movies: / "),
    );
    frame.render_widget(search, header_chunks[0]);

    let status = match phase {
        SearchPhase::Idle => Line::from(Span::styled(
            "MOVIEFLIX",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        SearchPhase::Pending | SearchPhase::Loading => Line::from(vec![
            Span::raw(format!("{} results  ", state.search_results().len())),
            Span::styled("Searching...", Style::default().fg(Color::Yellow)),
        ]),
        SearchPhase::Settled => Line::from(format!(
            "{} results for \"{}\"",
            state.search_results().len(),
            state.query().trim()
        )),
    };
    let status = Paragraph::new(status).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, header_chunks[1]);
}

/// Draws the four category rails.
fn draw_rails(frame: &mut Frame, area: Rect, state: &BrowserState, view: &mut ViewState) {
    let constraints = MovieCategory::ALL.map(|_| Constraint::Ratio(1, 4));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    if let Some(first) = rows.first() {
        view.set_rail_width(first.width.saturating_sub(2));
    }

    for (category, row) in MovieCategory::ALL.into_iter().zip(rows.iter()) {
        draw_rail(frame, *row, state.list(category), category, view);
    }
}

/// Draws one horizontal rail of cards.
fn draw_rail(
    frame: &mut Frame,
    area: Rect,
    movies: &[Movie],
    category: MovieCategory,
    view: &ViewState,
) {
    let focused = view.focused_category() == category;
    let cursor = view.rail(category);
    let visible = view.visible_cards();

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", category.title()))
        .border_style(border_style);

    let has_left = cursor.offset > 0;
    let has_right = cursor.offset.saturating_add(visible) < movies.len();
    if has_left || has_right {
        let left = if has_left { "\u{25c0} " } else { "  " };
        let right = if has_right { " \u{25b6}" } else { "  " };
        block = block.title_bottom(
            Line::from(format!(
                "{left}{}/{}{right}",
                cursor.index.saturating_add(1),
                movies.len()
            ))
            .right_aligned(),
        );
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if movies.is_empty() {
        let empty = Paragraph::new("No movies available")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let slots = card_slots(inner, visible);
    for (slot, (idx, movie)) in slots
        .iter()
        .zip(movies.iter().enumerate().skip(cursor.offset))
    {
        draw_card(frame, *slot, movie, focused && idx == cursor.index);
    }
}

/// Draws the responsive search results grid.
fn draw_search_grid(
    frame: &mut Frame,
    area: Rect,
    state: &BrowserState,
    phase: SearchPhase,
    view: &mut ViewState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search Results ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let results = state.search_results();
    if results.is_empty() {
        let message = if phase == SearchPhase::Settled {
            "No movies found. Try a different search term."
        } else {
            "Searching..."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    view.set_grid_width(inner.width);
    let columns = view.grid_columns();
    let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
    view.scroll_grid(visible_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    let mut rows = results.chunks(columns).enumerate().skip(view.grid_row_offset());
    for row_area in row_areas.iter() {
        let Some((row_idx, row)) = rows.next() else {
            break;
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, u32::try_from(columns).unwrap_or(1)); columns])
            .split(*row_area);
        for (col_idx, (cell, movie)) in cells.iter().zip(row.iter()).enumerate() {
            let idx = row_idx.saturating_mul(columns).saturating_add(col_idx);
            draw_card(frame, *cell, movie, idx == view.grid_cursor());
        }
    }
}

/// Splits a rail into fixed-width card slots.
fn card_slots(area: Rect, count: usize) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CARD_WIDTH); count.max(1)])
        .split(area)
        .to_vec()
}

/// Draws one movie card: title, year, rating and badge.
fn draw_card(frame: &mut Frame, area: Rect, movie: &Movie, highlighted: bool) {
    let border_style = if highlighted {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let width = usize::from(area.width.saturating_sub(2));
    let mut lines = vec![
        Line::from(Span::styled(
            truncate(&movie.title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            release_year(movie),
            Style::default().fg(Color::Gray),
        )),
    ];
    if let Some(rating) = format_rating(movie) {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}% ", rating_badge(movie.vote_average)),
                Style::default()
                    .fg(Color::Black)
                    .bg(tier_color(RatingTier::of(movie.vote_average))),
            ),
            Span::raw(format!(" \u{2605} {rating}")),
        ]));
    }

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

/// Draws the detail modal over the browser.
fn draw_detail(frame: &mut Frame, area: Rect, movie: &Movie) {
    let modal = centered(area, 80, area.height.saturating_mul(4) / 5);
    frame.render_widget(Clear, modal);

    let label = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled(
        movie.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !movie.original_title.is_empty() && movie.original_title != movie.title {
        lines.push(Line::from(Span::styled(
            movie.original_title.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));

    if let Some(rating) = format_rating(movie) {
        lines.push(Line::from(vec![
            Span::styled("Rating: ", label),
            Span::styled(
                format!("{rating}/10"),
                Style::default().fg(tier_color(RatingTier::of(movie.vote_average))),
            ),
            Span::raw(format!("  ({} votes)", movie.vote_count)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Release: ", label),
        Span::raw(format_release_date(movie)),
    ]));
    let genres = genre_names(movie);
    if !genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genres: ", label),
            Span::raw(genres.join(", ")),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Overview", label)));
    lines.push(Line::from(
        movie
            .overview
            .clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| String::from("No overview available.")),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Poster: ", label),
        Span::raw(movie.poster_url().unwrap_or_else(|| String::from(NO_IMAGE))),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Backdrop: ", label),
        Span::raw(
            movie
                .backdrop_url()
                .unwrap_or_else(|| String::from(NO_IMAGE)),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("TMDB: ", label),
        Span::raw(movie.page_url()),
    ]));

    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Details ")
            .title_bottom(Line::from(" o: open in browser  Esc/q/Enter: close ").right_aligned())
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(detail, modal);
}

/// Draws the footer with key hints and the load-more indicator.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState, view: &ViewState) {
    let hints = match (view.input_mode, state.query_active()) {
        (InputMode::Search, _) => "Type to search | Enter: done | Esc: clear",
        (InputMode::Normal, false) => {
            "\u{2190}\u{2192}: move  \u{2191}\u{2193}: rail  PgUp/PgDn: scroll  Enter: details  m: more  /: search  q: quit"
        }
        (InputMode::Normal, true) => {
            "\u{2190}\u{2192}\u{2191}\u{2193}: move  Enter: details  /: search  Esc: clear  q: quit"
        }
    };

    let mut spans = vec![Span::raw(hints)];
    if state.is_loading_more() {
        spans.push(Span::styled(
            "  Loading more...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Rect of at most `percent_x`% width and `height` rows, centered in `area`.
#[allow(clippy::indexing_slicing)]
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100_u16.saturating_sub(percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100_u16.saturating_sub(percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
