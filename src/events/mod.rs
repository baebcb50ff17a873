//! Event handling layer for the docsearch overlay.
//!
//! `handle_event` is the single entry point; key and mouse handling live in
//! submodules and only ever mutate state through `crate::logic`.

use crossterm::event::{Event as CEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::state::{AppState, QueryInput};

mod keys;
mod mouse;

/// What: Dispatch a single terminal event and mutate the [`AppState`].
///
/// Inputs:
/// - `ev`: Terminal event (key, mouse, resize, ...)
/// - `app`: Mutable application state
/// - `query_tx`: Channel to the search worker, handed to the debounce timer
/// - `nav_tx`: Navigation sink receiving committed targets
///
/// Output:
/// - `true` to signal the application should exit; otherwise `false`.
///
/// Details:
/// - Only key presses are handled; repeats and releases are ignored.
/// - Resize and focus events need no state change; the next frame re-lays out.
pub fn handle_event(
    ev: CEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    nav_tx: &mpsc::UnboundedSender<String>,
) -> bool {
    match ev {
        CEvent::Key(ke) if ke.kind == KeyEventKind::Press => {
            keys::handle_key_event(ke, app, query_tx, nav_tx)
        }
        CEvent::Mouse(m) => mouse::handle_mouse_event(m, app, nav_tx),
        CEvent::Paste(text) if app.is_open => {
            let mut q = app.query().to_string();
            q.push_str(text.trim_end_matches(['\r', '\n']));
            crate::logic::set_query(app, &q, query_tx);
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[tokio::test(start_paused = true)]
    /// What: Pasted text extends the query and goes through the debounce once.
    ///
    /// Inputs:
    /// - Paste while closed; then 'd', 'r' typed and "ag\n" pasted
    ///
    /// Output:
    /// - Closed paste ignored; query "drag" without the newline; one request
    async fn events_paste_appends_and_dispatches() {
        let mut app = AppState::default();
        let (qtx, mut qrx) = mpsc::unbounded_channel();
        let (ntx, _nrx) = mpsc::unbounded_channel();

        assert!(!handle_event(CEvent::Paste("spring".into()), &mut app, &qtx, &ntx));
        assert!(!app.is_open);
        assert_eq!(app.query(), "");

        for ch in ['d', 'r'] {
            let ke = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
            handle_event(CEvent::Key(ke), &mut app, &qtx, &ntx);
        }
        handle_event(CEvent::Paste("ag\n".into()), &mut app, &qtx, &ntx);
        assert_eq!(app.query(), "drag");

        tokio::time::sleep(Duration::from_secs(1)).await;
        let sent = qrx.try_recv().expect("one request");
        assert_eq!(sent.text, "drag");
        assert_eq!(sent.id, app.dispatcher.latest_token());
        assert!(qrx.try_recv().is_err());
    }
}
