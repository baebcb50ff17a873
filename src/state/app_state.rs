//! Overlay navigation state shared by events, logic and rendering.

use std::time::Duration;

use crate::logic::categorize::{CategorizedResults, categorize, flatten};
use crate::logic::dispatch::QueryDispatcher;
use crate::theme::{KeyMap, Settings};

use super::cursor::SelectionCursor;
use super::types::{PresentationMode, SearchResult};

/// Live results in both shapes: grouped for display, flattened for the cursor.
///
/// Both shapes are only ever replaced together through [`ResultSet::replace`],
/// which also resets the cursor.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    /// Grouped view of the latest accepted results.
    categorized: CategorizedResults,
    /// Cursor over `flatten(categorized)`.
    cursor: SelectionCursor<SearchResult>,
}

impl ResultSet {
    /// Replace the result list, re-categorize it and reset the cursor to 0.
    pub fn replace(&mut self, items: &[SearchResult]) {
        let categorized = categorize(items);
        self.cursor.replace(flatten(&categorized));
        self.categorized = categorized;
    }

    /// Drop all results.
    pub fn clear(&mut self) {
        self.replace(&[]);
    }

    /// Grouped results in display order.
    #[must_use]
    pub const fn categorized(&self) -> &CategorizedResults {
        &self.categorized
    }

    /// Cursor over the flattened results.
    #[must_use]
    pub const fn cursor(&self) -> &SelectionCursor<SearchResult> {
        &self.cursor
    }

    /// Mutable cursor, for navigation only.
    pub(crate) const fn cursor_mut(&mut self) -> &mut SelectionCursor<SearchResult> {
        &mut self.cursor
    }
}

/// Which list the keyboard currently walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveList {
    /// Static suggestions (no query, or the query is unresolved).
    Suggestions,
    /// Live results for the current query (possibly empty).
    Results,
}

impl ActiveList {
    /// Map a presentation mode to the list it navigates.
    #[must_use]
    pub const fn for_mode(mode: PresentationMode) -> Self {
        match mode {
            PresentationMode::Suggesting => Self::Suggestions,
            PresentationMode::Showing | PresentationMode::Empty => Self::Results,
        }
    }
}

/// Global application state for the search overlay.
#[derive(Debug)]
pub struct AppState {
    /// Whether the overlay is visible.
    pub is_open: bool,
    /// Query text, debounce timer, tokens and presentation mode.
    pub dispatcher: QueryDispatcher,
    /// Latest accepted results.
    pub results: ResultSet,
    /// Static suggestion list with its own cursor.
    pub suggestions: SelectionCursor<SearchResult>,
    /// Configured key bindings.
    pub keymap: KeyMap,
    /// Site name shown in the overlay title.
    pub site_name: String,
    /// Latest diagnostics note for the status line (never blocks input).
    pub status_note: Option<String>,
    /// Overlay area from the last frame: (x, y, width, height).
    pub overlay_rect: Option<(u16, u16, u16, u16)>,
    /// Screen rows of selectable items from the last frame: (row, flattened index).
    pub item_rows: Vec<(u16, usize)>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AppState {
    /// What: Build the initial (closed) state from user settings.
    ///
    /// Inputs:
    /// - `settings`: Parsed configuration (keymap, suggestions, dispatch tuning).
    ///
    /// Output:
    /// - Closed overlay with an empty query and the suggestion cursor at 0.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            is_open: false,
            dispatcher: QueryDispatcher::new(
                Duration::from_millis(settings.debounce_ms),
                settings.page_size,
                settings.filters(),
            ),
            results: ResultSet::default(),
            suggestions: SelectionCursor::new(settings.suggestions.clone()),
            keymap: settings.keymap.clone(),
            site_name: settings.site_name.clone(),
            status_note: None,
            overlay_rect: None,
            item_rows: Vec::new(),
        }
    }

    /// Current presentation mode.
    #[must_use]
    pub const fn mode(&self) -> PresentationMode {
        self.dispatcher.mode()
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        self.dispatcher.query()
    }

    /// Which list is active under the current mode.
    #[must_use]
    pub const fn active_list(&self) -> ActiveList {
        ActiveList::for_mode(self.mode())
    }

    /// Cursor of the active list.
    #[must_use]
    pub const fn active_cursor(&self) -> &SelectionCursor<SearchResult> {
        match self.active_list() {
            ActiveList::Suggestions => &self.suggestions,
            ActiveList::Results => self.results.cursor(),
        }
    }

    /// Mutable cursor of the active list.
    pub(crate) const fn active_cursor_mut(&mut self) -> &mut SelectionCursor<SearchResult> {
        match self.active_list() {
            ActiveList::Suggestions => &mut self.suggestions,
            ActiveList::Results => self.results.cursor_mut(),
        }
    }

    /// Currently selected item of the active list.
    #[must_use]
    pub fn selected(&self) -> Option<&SearchResult> {
        self.active_cursor().selected()
    }
}
