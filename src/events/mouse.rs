use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

use crate::logic::{close_overlay, commit, hover, move_selection};
use crate::state::AppState;

/// What: Handle a single mouse event against the last rendered layout.
///
/// Inputs:
/// - `m`: Mouse event including position and kind
/// - `app`: Mutable application state (overlay rect, item rows, cursors)
/// - `nav_tx`: Navigation sink for click-to-commit
///
/// Output:
/// - Always `false`; the mouse never requests exit.
///
/// Details:
/// - Moving over a selectable row selects it; a left click on it commits.
/// - A left click outside the overlay closes it.
/// - The scroll wheel moves the active selection like the arrow keys.
pub(super) fn handle_mouse_event(
    m: MouseEvent,
    app: &mut AppState,
    nav_tx: &mpsc::UnboundedSender<String>,
) -> bool {
    if !app.is_open {
        return false;
    }
    let mx = m.column;
    let my = m.row;
    let inside = app
        .overlay_rect
        .is_some_and(|(x, y, w, h)| mx >= x && mx < x + w && my >= y && my < y + h);
    let row_index = app
        .item_rows
        .iter()
        .find(|(row, _)| *row == my)
        .map(|(_, idx)| *idx);

    match m.kind {
        MouseEventKind::Moved if inside => {
            if let Some(idx) = row_index {
                hover(app, idx);
            }
        }
        MouseEventKind::Down(MouseButton::Left) if !inside => close_overlay(app),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(idx) = row_index {
                hover(app, idx);
                commit(app, nav_tx);
            }
        }
        MouseEventKind::ScrollUp if inside => move_selection(app, -1),
        MouseEventKind::ScrollDown if inside => move_selection(app, 1),
        _ => {}
    }
    false
}
