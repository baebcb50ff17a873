use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic::{
    clear_query, close_overlay, commit, move_selection, open_overlay, pop_char, push_char,
};
use crate::state::{AppState, QueryInput};
use crate::theme::{KeyMap, matches_any};

/// What a key does while the overlay is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OpenAction {
    /// Hide the overlay.
    Close,
    /// Move the active cursor by this many rows.
    Move(isize),
    /// Navigate to the selected entry.
    Commit,
    /// Erase the query.
    ClearQuery,
    /// Remove the last query character.
    Backspace,
    /// Append a character to the query.
    Type(char),
}

/// What: Handle a key press against the configured key map.
///
/// Inputs:
/// - `ke`: Key event (press only)
/// - `app`: Mutable application state
/// - `query_tx`: Channel to the search worker
/// - `nav_tx`: Navigation sink
///
/// Output:
/// - `true` when the exit chord was pressed; otherwise `false`.
///
/// Details:
/// - Closed: open chords show the overlay; a bare printable key opens it and
///   starts the query with that character.
/// - Open: close/move/commit/clear chords first, then text editing.
pub(super) fn handle_key_event(
    ke: KeyEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    nav_tx: &mpsc::UnboundedSender<String>,
) -> bool {
    if matches_any(&ke, &app.keymap.exit) {
        return true;
    }

    if !app.is_open {
        if matches_any(&ke, &app.keymap.open) {
            open_overlay(app);
        } else if let Some(ch) = typed_char(&ke) {
            open_overlay(app);
            push_char(app, ch, query_tx);
        }
        return false;
    }

    match open_action(&ke, &app.keymap) {
        Some(OpenAction::Close) => close_overlay(app),
        Some(OpenAction::Move(delta)) => move_selection(app, delta),
        Some(OpenAction::Commit) => {
            commit(app, nav_tx);
        }
        Some(OpenAction::ClearQuery) => clear_query(app, query_tx),
        Some(OpenAction::Backspace) => pop_char(app, query_tx),
        Some(OpenAction::Type(ch)) => push_char(app, ch, query_tx),
        None => {}
    }
    false
}

/// Resolve `ke` against the key map; bound chords win over text editing.
fn open_action(ke: &KeyEvent, km: &KeyMap) -> Option<OpenAction> {
    if matches_any(ke, &km.close) {
        Some(OpenAction::Close)
    } else if matches_any(ke, &km.move_up) {
        Some(OpenAction::Move(-1))
    } else if matches_any(ke, &km.move_down) {
        Some(OpenAction::Move(1))
    } else if matches_any(ke, &km.commit) {
        Some(OpenAction::Commit)
    } else if matches_any(ke, &km.clear_query) {
        Some(OpenAction::ClearQuery)
    } else if ke.code == KeyCode::Backspace {
        Some(OpenAction::Backspace)
    } else {
        typed_char(ke).map(OpenAction::Type)
    }
}

/// Printable character carried by `ke`, unless Ctrl or Alt is held.
fn typed_char(ke: &KeyEvent) -> Option<char> {
    match ke.code {
        KeyCode::Char(ch)
            if !ch.is_control()
                && !ke
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}
