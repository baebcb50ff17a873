use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::state::{QueryInput, SearchResults};

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - The event loop owns every receiver except `query_rx` and `nav_rx`,
///   which are handed to the search and navigation workers.
pub struct Channels {
    /// Terminal events from the input thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Event loop side of `event_tx`.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Debounced queries for the search worker.
    pub query_tx: mpsc::UnboundedSender<QueryInput>,
    /// Worker side of `query_tx`; taken when the worker starts.
    pub query_rx: Option<mpsc::UnboundedReceiver<QueryInput>>,
    /// Search answers (or failures) tagged with their token.
    pub results_tx: mpsc::UnboundedSender<SearchResults>,
    /// Event loop side of `results_tx`.
    pub results_rx: mpsc::UnboundedReceiver<SearchResults>,
    /// Navigation sink: committed targets.
    pub nav_tx: mpsc::UnboundedSender<String>,
    /// Worker side of `nav_tx`; taken when the worker starts.
    pub nav_rx: Option<mpsc::UnboundedReceiver<String>>,
    /// Diagnostics sink: non-fatal error messages.
    pub diag_tx: mpsc::UnboundedSender<String>,
    /// Event loop side of `diag_tx`.
    pub diag_rx: mpsc::UnboundedReceiver<String>,
}

impl Channels {
    /// Create every channel pair.
    #[must_use]
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();
        let (diag_tx, diag_rx) = mpsc::unbounded_channel();
        Self {
            event_tx,
            event_rx,
            query_tx,
            query_rx: Some(query_rx),
            results_tx,
            results_rx,
            nav_tx,
            nav_rx: Some(nav_rx),
            diag_tx,
            diag_rx,
        }
    }
}
