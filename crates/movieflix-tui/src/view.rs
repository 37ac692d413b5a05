//! Cursor and input-mode state for the terminal view.
//!
//! Lists live in [`crate::browser::BrowserState`]; this module only tracks
//! where the user is looking, so every method takes the list length it
//! operates on.

use movieflix_api::tmdb::MovieCategory;

/// Width of one card in columns, borders included.
pub const CARD_WIDTH: u16 = 24;

/// Fewest search grid columns.
pub const MIN_GRID_COLUMNS: usize = 2;

/// Most search grid columns.
pub const MAX_GRID_COLUMNS: usize = 6;

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys move the cursor.
    Normal,
    /// Characters edit the search query.
    Search,
}

/// Cursor within one horizontal rail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RailCursor {
    /// Index of the highlighted card.
    pub index: usize,
    /// Index of the first visible card.
    pub offset: usize,
}

impl RailCursor {
    /// Moves the offset so that `index` is within the visible window.
    fn keep_visible(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.index < self.offset {
            self.offset = self.index;
        } else if self.index >= self.offset.saturating_add(visible) {
            self.offset = self.index.saturating_add(1).saturating_sub(visible);
        }
    }

    fn clamp(&mut self, len: usize, visible: usize) {
        self.index = self.index.min(len.saturating_sub(1));
        self.offset = self.offset.min(self.index);
        self.keep_visible(visible);
    }
}

/// View-side state of the browser.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct ViewState {
    /// Current input mode.
    pub input_mode: InputMode,
    focused_rail: usize,
    rails: [RailCursor; 4],
    grid_cursor: usize,
    /// First visible grid row.
    grid_row_offset: usize,
    /// Cards that fit across a rail; updated on every draw.
    visible_cards: usize,
    /// Columns in the search grid; updated on every draw.
    grid_columns: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Creates a view focused on the first rail.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input_mode: InputMode::Normal,
            focused_rail: 0,
            rails: [RailCursor {
                index: 0,
                offset: 0,
            }; 4],
            grid_cursor: 0,
            grid_row_offset: 0,
            visible_cards: 1,
            grid_columns: MIN_GRID_COLUMNS,
        }
    }

    /// Category of the focused rail.
    #[must_use]
    pub fn focused_category(&self) -> MovieCategory {
        MovieCategory::ALL
            .get(self.focused_rail)
            .copied()
            .unwrap_or(MovieCategory::Popular)
    }

    /// Whether the focus is on the bottom rail.
    #[must_use]
    pub const fn on_last_rail(&self) -> bool {
        self.focused_rail.saturating_add(1) >= MovieCategory::ALL.len()
    }

    /// Cursor of a category's rail.
    #[must_use]
    pub fn rail(&self, category: MovieCategory) -> RailCursor {
        self.rails
            .get(rail_slot(category))
            .copied()
            .unwrap_or_default()
    }

    fn focused_rail_mut(&mut self) -> Option<&mut RailCursor> {
        self.rails.get_mut(self.focused_rail)
    }

    /// Cards that fit across a rail.
    #[must_use]
    pub const fn visible_cards(&self) -> usize {
        self.visible_cards
    }

    /// Records the rail width measured by the last draw.
    pub fn set_rail_width(&mut self, width: u16) {
        self.visible_cards = usize::from(width / CARD_WIDTH).max(1);
    }

    /// Columns in the search grid.
    #[must_use]
    pub const fn grid_columns(&self) -> usize {
        self.grid_columns
    }

    /// Records the grid width measured by the last draw.
    pub fn set_grid_width(&mut self, width: u16) {
        self.grid_columns = grid_columns_for(width);
    }

    /// Highlighted search result.
    #[must_use]
    pub const fn grid_cursor(&self) -> usize {
        self.grid_cursor
    }

    /// First visible grid row.
    #[must_use]
    pub const fn grid_row_offset(&self) -> usize {
        self.grid_row_offset
    }

    /// Moves the focused rail's cursor one card left.
    pub fn rail_left(&mut self) {
        let visible = self.visible_cards;
        if let Some(rail) = self.focused_rail_mut() {
            rail.index = rail.index.saturating_sub(1);
            rail.keep_visible(visible);
        }
    }

    /// Moves the focused rail's cursor one card right.
    pub fn rail_right(&mut self, len: usize) {
        let visible = self.visible_cards;
        if let Some(rail) = self.focused_rail_mut()
            && rail.index.saturating_add(1) < len
        {
            rail.index = rail.index.saturating_add(1);
            rail.keep_visible(visible);
        }
    }

    /// Scrolls the focused rail by 80% of the visible cards.
    pub fn rail_page(&mut self, len: usize, forward: bool) {
        let visible = self.visible_cards;
        let step = (visible.saturating_mul(4) / 5).max(1);
        let last = len.saturating_sub(1);
        if let Some(rail) = self.focused_rail_mut() {
            if forward {
                let max_offset = len.saturating_sub(visible);
                rail.offset = rail.offset.saturating_add(step).min(max_offset);
                rail.index = rail.index.saturating_add(step).min(last);
            } else {
                rail.offset = rail.offset.saturating_sub(step);
                rail.index = rail.index.saturating_sub(step);
            }
            rail.keep_visible(visible);
        }
    }

    /// Focuses the rail above.
    pub const fn rail_up(&mut self) {
        self.focused_rail = self.focused_rail.saturating_sub(1);
    }

    /// Focuses the rail below. Returns `true` if already on the bottom rail.
    pub const fn rail_down(&mut self) -> bool {
        if self.on_last_rail() {
            return true;
        }
        self.focused_rail = self.focused_rail.saturating_add(1);
        false
    }

    /// Index of the highlighted card in the focused rail.
    #[must_use]
    pub fn rail_selection(&self) -> usize {
        self.rails
            .get(self.focused_rail)
            .map_or(0, |rail| rail.index)
    }

    /// Moves the grid cursor one cell left.
    pub const fn grid_left(&mut self) {
        self.grid_cursor = self.grid_cursor.saturating_sub(1);
    }

    /// Moves the grid cursor one cell right.
    pub fn grid_right(&mut self, len: usize) {
        if self.grid_cursor.saturating_add(1) < len {
            self.grid_cursor = self.grid_cursor.saturating_add(1);
        }
    }

    /// Moves the grid cursor one row up.
    pub const fn grid_up(&mut self) {
        if self.grid_cursor >= self.grid_columns {
            self.grid_cursor = self.grid_cursor.saturating_sub(self.grid_columns);
        }
    }

    /// Moves the grid cursor one row down.
    pub fn grid_down(&mut self, len: usize) {
        let next = self.grid_cursor.saturating_add(self.grid_columns);
        if next < len {
            self.grid_cursor = next;
        }
    }

    /// Returns the grid to the first result.
    pub const fn reset_grid(&mut self) {
        self.grid_cursor = 0;
        self.grid_row_offset = 0;
    }

    /// Scrolls the grid so the cursor row is within `visible_rows`.
    pub fn scroll_grid(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        let row = self.grid_cursor.checked_div(self.grid_columns).unwrap_or(0);
        if row < self.grid_row_offset {
            self.grid_row_offset = row;
        } else if row >= self.grid_row_offset.saturating_add(visible_rows) {
            self.grid_row_offset = row.saturating_add(1).saturating_sub(visible_rows);
        }
    }

    /// Pulls every cursor back inside its list after the lists change.
    pub fn clamp<F>(&mut self, len_of: F, search_len: usize)
    where
        F: Fn(MovieCategory) -> usize,
    {
        let visible = self.visible_cards;
        for category in MovieCategory::ALL {
            if let Some(rail) = self.rails.get_mut(rail_slot(category)) {
                rail.clamp(len_of(category), visible);
            }
        }
        self.grid_cursor = self.grid_cursor.min(search_len.saturating_sub(1));
    }
}

/// Position of a category in the rail array.
const fn rail_slot(category: MovieCategory) -> usize {
    match category {
        MovieCategory::Popular => 0,
        MovieCategory::TopRated => 1,
        MovieCategory::NowPlaying => 2,
        MovieCategory::Upcoming => 3,
    }
}

/// Search grid columns for a terminal width, between 2 and 6.
#[must_use]
pub fn grid_columns_for(width: u16) -> usize {
    usize::from(width / CARD_WIDTH).clamp(MIN_GRID_COLUMNS, MAX_GRID_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with_width(width: u16) -> ViewState {
        let mut view = ViewState::new();
        view.set_rail_width(width);
        view
    }

    #[test]
    fn test_grid_columns_are_bounded() {
        assert_eq!(grid_columns_for(10), 2);
        assert_eq!(grid_columns_for(CARD_WIDTH * 4), 4);
        assert_eq!(grid_columns_for(500), 6);
    }

    #[test]
    fn test_rail_right_stops_at_end() {
        // Arrange
        let mut view = view_with_width(CARD_WIDTH * 2);

        // Act
        for _ in 0..5 {
            view.rail_right(3);
        }

        // Assert
        let rail = view.rail(MovieCategory::Popular);
        assert_eq!(rail.index, 2);
        assert_eq!(rail.offset, 1);
    }

    #[test]
    fn test_rail_left_scrolls_back() {
        // Arrange
        let mut view = view_with_width(CARD_WIDTH * 2);
        for _ in 0..4 {
            view.rail_right(10);
        }

        // Act
        for _ in 0..4 {
            view.rail_left();
        }

        // Assert
        assert_eq!(view.rail(MovieCategory::Popular), RailCursor::default());
    }

    #[test]
    fn test_rail_page_moves_eighty_percent() {
        // Arrange: five cards visible, step of four
        let mut view = view_with_width(CARD_WIDTH * 5);

        // Act
        view.rail_page(20, true);

        // Assert
        let rail = view.rail(MovieCategory::Popular);
        assert_eq!(rail.offset, 4);
        assert_eq!(rail.index, 4);

        // Act: back
        view.rail_page(20, false);

        // Assert
        assert_eq!(view.rail(MovieCategory::Popular), RailCursor::default());
    }

    #[test]
    fn test_rail_page_does_not_overscroll() {
        // Arrange
        let mut view = view_with_width(CARD_WIDTH * 5);

        // Act
        view.rail_page(7, true);
        view.rail_page(7, true);

        // Assert
        let rail = view.rail(MovieCategory::Popular);
        assert_eq!(rail.offset, 2);
        assert_eq!(rail.index, 6);
    }

    #[test]
    fn test_rail_down_reports_bottom() {
        // Arrange
        let mut view = ViewState::new();

        // Act
        let moves: Vec<bool> = (0..4).map(|_| view.rail_down()).collect();

        // Assert
        assert_eq!(moves, vec![false, false, false, true]);
        assert_eq!(view.focused_category(), MovieCategory::Upcoming);

        view.rail_up();
        assert_eq!(view.focused_category(), MovieCategory::NowPlaying);
    }

    #[test]
    fn test_rails_keep_independent_cursors() {
        // Arrange
        let mut view = view_with_width(CARD_WIDTH * 3);
        view.rail_right(5);

        // Act
        view.rail_down();
        view.rail_right(5);
        view.rail_right(5);

        // Assert
        assert_eq!(view.rail(MovieCategory::Popular).index, 1);
        assert_eq!(view.rail(MovieCategory::TopRated).index, 2);
        assert_eq!(view.rail_selection(), 2);
    }

    #[test]
    fn test_grid_navigation() {
        // Arrange
        let mut view = ViewState::new();
        view.set_grid_width(CARD_WIDTH * 3);

        // Act & Assert
        view.grid_down(7);
        assert_eq!(view.grid_cursor(), 3);
        view.grid_down(7);
        assert_eq!(view.grid_cursor(), 6);
        view.grid_down(7); // no row below
        assert_eq!(view.grid_cursor(), 6);
        view.grid_right(7); // last result
        assert_eq!(view.grid_cursor(), 6);
        view.grid_up();
        view.grid_left();
        assert_eq!(view.grid_cursor(), 2);
    }

    #[test]
    fn test_scroll_grid_follows_cursor() {
        // Arrange
        let mut view = ViewState::new();
        view.set_grid_width(CARD_WIDTH * 2);
        for _ in 0..3 {
            view.grid_down(20);
        }

        // Act
        view.scroll_grid(2);

        // Assert: cursor on row 3, rows 2-3 visible
        assert_eq!(view.grid_row_offset(), 2);
    }

    #[test]
    fn test_clamp_after_lists_shrink() {
        // Arrange
        let mut view = view_with_width(CARD_WIDTH * 2);
        for _ in 0..5 {
            view.rail_right(10);
        }
        view.set_grid_width(CARD_WIDTH * 2);
        view.grid_down(10);

        // Act
        view.clamp(|_| 2, 0);

        // Assert
        let rail = view.rail(MovieCategory::Popular);
        assert_eq!(rail.index, 1);
        assert!(rail.offset <= rail.index);
        assert_eq!(view.grid_cursor(), 0);
    }
}
