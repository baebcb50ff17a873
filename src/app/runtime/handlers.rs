use tokio::sync::mpsc;

use crate::logic::apply_search_results;
use crate::state::{AppState, SearchResults};

/// What: Apply a search answer and route any failure to the diagnostics sink.
///
/// Inputs:
/// - `app`: Mutable application state
/// - `results`: Answer for some token
/// - `diag_tx`: Diagnostics sink
///
/// Output: None.
///
/// Details:
/// - Stale answers are dropped inside the dispatcher; this never blocks input.
pub fn handle_search_results(
    app: &mut AppState,
    results: SearchResults,
    diag_tx: &mpsc::UnboundedSender<String>,
) {
    if let Some(msg) = apply_search_results(app, results) {
        let _ = diag_tx.send(format!("Search failed: {msg}"));
    }
}

/// What: Record a diagnostics message.
///
/// Inputs:
/// - `app`: Mutable application state
/// - `msg`: Human-readable failure
///
/// Output: None; the message lands in the log and the status line.
pub fn handle_diagnostic(app: &mut AppState, msg: String) {
    tracing::warn!(message = %msg, "diagnostic");
    app.status_note = Some(msg);
}
