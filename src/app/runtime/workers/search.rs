use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::sources::SearchService;
use crate::state::{QueryInput, SearchResults};

/// What: Spawn the background worker that answers debounced queries.
///
/// Inputs:
/// - `service`: Search backend shared by every request
/// - `query_rx`: Queries released by the dispatcher's debounce timer
/// - `search_result_tx`: Answers, tagged with the originating token
///
/// Output:
/// - Handle of the worker task; it ends when `query_rx` closes.
///
/// Details:
/// - Each query runs in its own task so a slow answer never delays a newer one.
///   Ordering is not preserved; the dispatcher's token check sorts that out.
/// - Failures are sent as `Err(message)` rather than dropped.
#[must_use]
pub fn spawn_search_worker<S: SearchService>(
    service: Arc<S>,
    mut query_rx: mpsc::UnboundedReceiver<QueryInput>,
    search_result_tx: mpsc::UnboundedSender<SearchResults>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(query) = query_rx.recv().await {
            let svc = Arc::clone(&service);
            let tx = search_result_tx.clone();
            tokio::spawn(async move {
                tracing::info!(token = query.id, query = %query.text, "search request");
                let outcome = svc.search(&query).await.map_err(|e| e.to_string());
                if let Err(msg) = &outcome {
                    tracing::warn!(token = query.id, error = %msg, "search request failed");
                }
                let _ = tx.send(SearchResults {
                    id: query.id,
                    outcome,
                });
            });
        }
        tracing::debug!("search worker stopped");
    })
}
