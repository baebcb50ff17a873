//! Overlay state transitions: open/close, query edits, selection and commit.

use tokio::sync::mpsc;

use crate::logic::dispatch::{Accepted, QueryChange};
use crate::state::{AppState, QueryInput, SearchResults};

/// What: Show the overlay.
///
/// Inputs:
/// - `app`: Mutable application state.
///
/// Output: None (mutates `app`).
///
/// Details:
/// - No-op when already open. A fresh open always starts on the suggestions.
pub fn open_overlay(app: &mut AppState) {
    if app.is_open {
        return;
    }
    app.is_open = true;
    app.suggestions.reset();
    tracing::debug!("overlay opened");
}

/// What: Hide the overlay and return to the pristine closed state.
///
/// Inputs:
/// - `app`: Mutable application state.
///
/// Output: None (mutates `app`).
///
/// Details:
/// - Clears the query, cancels the debounce timer, invalidates in-flight
///   responses, drops results and resets both cursors.
pub fn close_overlay(app: &mut AppState) {
    app.is_open = false;
    app.dispatcher.reset();
    app.results.clear();
    app.suggestions.reset();
    app.item_rows.clear();
    tracing::debug!("overlay closed");
}

/// What: Replace the query text and schedule the matching search.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `text`: New full query text.
/// - `query_tx`: Channel to the search worker.
///
/// Output: None (mutates `app`).
///
/// Details:
/// - Clearing the query, or changing it while results are shown, drops the
///   results and re-activates the suggestions at index 0 until the new answer.
pub fn set_query(app: &mut AppState, text: &str, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    let before = app.active_list();
    let change = app.dispatcher.set_query(text, query_tx);
    if change == QueryChange::Cleared || before != app.active_list() {
        app.results.clear();
        app.suggestions.reset();
    }
}

/// Append one character to the query.
pub fn push_char(app: &mut AppState, ch: char, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    let mut text = app.query().to_string();
    text.push(ch);
    set_query(app, &text, query_tx);
}

/// Remove the last character of the query; no-op on an empty query.
pub fn pop_char(app: &mut AppState, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    let mut text = app.query().to_string();
    if text.pop().is_some() {
        set_query(app, &text, query_tx);
    }
}

/// Erase the whole query.
pub fn clear_query(app: &mut AppState, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    if !app.query().is_empty() {
        set_query(app, "", query_tx);
    }
}

/// What: Move the active cursor by `delta` rows.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `delta`: Signed step count (negative moves up).
///
/// Output: None (mutates `app`).
///
/// Details:
/// - Ignored while closed. Clamped at both ends, never wraps.
pub fn move_selection(app: &mut AppState, delta: isize) {
    if !app.is_open {
        return;
    }
    app.active_cursor_mut().step(delta);
}

/// What: Select the item at flattened `index` (pointer hover).
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `index`: Flattened index carried by the hovered view item.
///
/// Output: None (mutates `app`).
pub fn hover(app: &mut AppState, index: usize) {
    if !app.is_open {
        return;
    }
    app.active_cursor_mut().set(index);
}

/// What: Navigate to the selected entry of the active list.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `nav_tx`: Navigation sink.
///
/// Output:
/// - `true` when a navigation was sent; `false` when nothing was selected.
///
/// Details:
/// - The overlay closes before the target is handed off, so the sink never
///   observes an open overlay for a committed result.
pub fn commit(app: &mut AppState, nav_tx: &mpsc::UnboundedSender<String>) -> bool {
    if !app.is_open {
        return false;
    }
    let Some(target) = app.selected().map(|r| r.target.clone()) else {
        return false;
    };
    close_overlay(app);
    tracing::info!(target = %target, "navigating to result");
    let _ = nav_tx.send(target);
    true
}

/// What: Apply a search response to the overlay.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `response`: Results (or failure) for some token.
///
/// Output:
/// - `Some(message)` when the response was current but failed; `None` otherwise.
///
/// Details:
/// - Stale responses change nothing.
/// - Accepted responses replace the result list and reset its cursor together.
pub fn apply_search_results(app: &mut AppState, response: SearchResults) -> Option<String> {
    match app.dispatcher.accept(response)? {
        Accepted::Results(items) => {
            tracing::debug!(count = items.len(), query = %app.query(), "results accepted");
            app.results.replace(&items);
            None
        }
        Accepted::Failed(msg) => {
            app.results.clear();
            Some(msg)
        }
    }
}
