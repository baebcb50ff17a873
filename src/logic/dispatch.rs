//! Debounced query dispatch with latest-token-wins response filtering.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time::sleep};

use crate::state::{PresentationMode, QueryInput, SearchResult, SearchResults};

/// Default quiet period between the last keystroke and the outgoing request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
/// Default number of results requested per query.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Outcome of [`QueryDispatcher::set_query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryChange {
    /// Query became empty; results must be dropped and suggestions shown.
    Cleared,
    /// A request carrying `token` fires once the quiet period elapses.
    Scheduled {
        /// Token the eventual request and its response will carry.
        token: u64,
    },
}

/// A response that matched the latest token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Accepted {
    /// The index answered (possibly with zero hits).
    Results(Vec<SearchResult>),
    /// The lookup failed; treated as zero hits.
    Failed(String),
}

/// Owns the query text, the debounce timer and the token sequence.
#[derive(Debug)]
pub struct QueryDispatcher {
    /// Text as last set.
    query: String,
    /// Next token to hand out.
    next_token: u64,
    /// Most recently issued token; only responses carrying it are accepted.
    latest_token: u64,
    /// Token of the last accepted response.
    answered: u64,
    /// Current presentation mode.
    mode: PresentationMode,
    /// Pending debounce timer, if any.
    pending: Option<JoinHandle<()>>,
    /// Quiet period before a request fires.
    debounce: Duration,
    /// Page size sent with every request.
    limit: usize,
    /// Context filters sent with every request.
    filters: Vec<String>,
}

impl Default for QueryDispatcher {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            DEFAULT_PAGE_SIZE,
            Vec::new(),
        )
    }
}

impl Drop for QueryDispatcher {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl QueryDispatcher {
    /// Create a dispatcher with the given quiet period, page size and filters.
    #[must_use]
    pub const fn new(debounce: Duration, limit: usize, filters: Vec<String>) -> Self {
        Self {
            query: String::new(),
            next_token: 1,
            latest_token: 0,
            answered: 0,
            mode: PresentationMode::Suggesting,
            pending: None,
            debounce,
            limit,
            filters,
        }
    }

    /// What: Record new query text and (re)schedule the outgoing request.
    ///
    /// Inputs:
    /// - `text`: Full query text after the edit.
    /// - `query_tx`: Channel the search worker listens on.
    ///
    /// Output:
    /// - [`QueryChange::Cleared`] for blank text, otherwise the scheduled token.
    ///
    /// Details:
    /// - Always aborts the previous timer first, so a burst of edits yields one request.
    /// - Always issues a new token, so any response already in flight becomes stale.
    /// - Blank text switches to `Suggesting` immediately without touching the network.
    /// - Changed non-blank text also switches to `Suggesting`; the previous
    ///   answer no longer matches the query and must not stay selectable.
    /// - Must run inside a tokio runtime; the timer is a spawned task.
    pub fn set_query(
        &mut self,
        text: &str,
        query_tx: &mpsc::UnboundedSender<QueryInput>,
    ) -> QueryChange {
        let changed = self.query != text;
        self.query = text.to_string();
        self.cancel_pending();
        let token = self.issue_token();
        if text.trim().is_empty() {
            self.mode = PresentationMode::Suggesting;
            tracing::debug!(token, "query cleared");
            return QueryChange::Cleared;
        }
        if changed {
            self.mode = PresentationMode::Suggesting;
        }
        let input = QueryInput {
            id: token,
            text: text.to_string(),
            limit: self.limit,
            filters: self.filters.clone(),
        };
        let tx = query_tx.clone();
        let delay = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            tracing::debug!(token = input.id, query = %input.text, "dispatching query");
            let _ = tx.send(input);
        }));
        QueryChange::Scheduled { token }
    }

    /// What: Filter a response through the latest-token rule and update the mode.
    ///
    /// Inputs:
    /// - `response`: Results or failure for some earlier token.
    ///
    /// Output:
    /// - `None` when the token is stale (dropped silently); otherwise what to show.
    ///
    /// Details:
    /// - Zero hits and failures both yield `Empty`; anything else yields `Showing`.
    pub fn accept(&mut self, response: SearchResults) -> Option<Accepted> {
        if response.id != self.latest_token {
            tracing::debug!(
                token = response.id,
                latest = self.latest_token,
                "dropping stale search response"
            );
            return None;
        }
        self.pending = None;
        self.answered = response.id;
        match response.outcome {
            Ok(items) => {
                self.mode = if items.is_empty() {
                    PresentationMode::Empty
                } else {
                    PresentationMode::Showing
                };
                Some(Accepted::Results(items))
            }
            Err(msg) => {
                self.mode = PresentationMode::Empty;
                Some(Accepted::Failed(msg))
            }
        }
    }

    /// Forget the query, cancel the timer and invalidate anything in flight.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.issue_token();
        self.query.clear();
        self.mode = PresentationMode::Suggesting;
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current presentation mode.
    #[must_use]
    pub const fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Most recently issued token.
    #[must_use]
    pub const fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Whether the current non-blank query is still waiting for its answer,
    /// either in the debounce window or in flight.
    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        !self.query.trim().is_empty() && self.answered != self.latest_token
    }

    /// Whether a debounce timer is still waiting to fire.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the debounce timer, if any.
    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Hand out the next token and mark it as the latest.
    const fn issue_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.latest_token = token;
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ResultKind;

    fn hit(title: &str) -> SearchResult {
        SearchResult {
            id: None,
            kind: ResultKind::Function,
            group: "library".into(),
            category: "Hooks".into(),
            title: title.into(),
            subtitle: None,
            extra: None,
            description: String::new(),
            target: format!("/hooks#{title}"),
        }
    }

    #[tokio::test(start_paused = true)]
    /// What: A burst of edits inside the quiet period produces exactly one request.
    ///
    /// Inputs:
    /// - `set_query` for "d", "dr", "dra", "drag" with 50ms gaps
    ///
    /// Output:
    /// - One `QueryInput` for "drag" carrying the latest token
    async fn dispatch_debounces_to_last_query() {
        let mut d = QueryDispatcher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        for q in ["d", "dr", "dra", "drag"] {
            d.set_query(q, &tx);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        let q = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .ok()
            .flatten()
            .expect("query dispatched");
        assert_eq!(q.text, "drag");
        assert_eq!(q.id, d.latest_token());
        assert_eq!(q.limit, DEFAULT_PAGE_SIZE);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    /// What: Blank queries never reach the network and switch to suggestions.
    ///
    /// Inputs:
    /// - `set_query("   ")`
    ///
    /// Output:
    /// - `Cleared`, mode `Suggesting`, nothing on the channel after the window
    async fn dispatch_blank_query_is_synchronous() {
        let mut d = QueryDispatcher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(matches!(d.set_query("x", &tx), QueryChange::Scheduled { .. }));
        assert_eq!(d.set_query("   ", &tx), QueryChange::Cleared);
        assert_eq!(d.mode(), PresentationMode::Suggesting);
        assert!(!d.has_pending());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    /// What: An older response arriving after a newer one is discarded.
    ///
    /// Inputs:
    /// - Two scheduled queries; response for the second, then for the first
    ///
    /// Output:
    /// - Second accepted as `Showing`; first returns `None`
    async fn dispatch_drops_out_of_order_response() {
        let mut d = QueryDispatcher::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let QueryChange::Scheduled { token: a } = d.set_query("dr", &tx) else {
            panic!("expected schedule");
        };
        let QueryChange::Scheduled { token: b } = d.set_query("drag", &tx) else {
            panic!("expected schedule");
        };
        assert!(b > a);
        let newer = d.accept(SearchResults {
            id: b,
            outcome: Ok(vec![hit("useDrag")]),
        });
        assert_eq!(newer, Some(Accepted::Results(vec![hit("useDrag")])));
        assert_eq!(d.mode(), PresentationMode::Showing);
        let older = d.accept(SearchResults {
            id: a,
            outcome: Ok(Vec::new()),
        });
        assert!(older.is_none());
        assert_eq!(d.mode(), PresentationMode::Showing);
    }

    #[tokio::test]
    /// What: Zero hits and failures both degrade to `Empty`.
    ///
    /// Inputs:
    /// - Empty success, then a failure for a new token
    ///
    /// Output:
    /// - Mode `Empty` after each answer, `Suggesting` while the refinement is
    ///   unanswered; failure message passed through
    async fn dispatch_empty_and_failure_map_to_empty() {
        let mut d = QueryDispatcher::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        d.set_query("zzz", &tx);
        let id = d.latest_token();
        assert_eq!(
            d.accept(SearchResults {
                id,
                outcome: Ok(Vec::new())
            }),
            Some(Accepted::Results(Vec::new()))
        );
        assert_eq!(d.mode(), PresentationMode::Empty);
        d.set_query("zzzz", &tx);
        assert_eq!(d.mode(), PresentationMode::Suggesting);
        let id = d.latest_token();
        let got = d.accept(SearchResults {
            id,
            outcome: Err("connection refused".into()),
        });
        assert_eq!(got, Some(Accepted::Failed("connection refused".into())));
        assert_eq!(d.mode(), PresentationMode::Empty);
    }

    #[tokio::test(start_paused = true)]
    /// What: A query stays awaited from the first keystroke until its own answer.
    ///
    /// Inputs:
    /// - "drag" scheduled, timer fired, answered; then "dragz" typed; then cleared
    ///
    /// Output:
    /// - Awaiting through the window and the flight, not after the answer;
    ///   the refinement falls back to `Suggesting`; a blank query awaits nothing
    async fn dispatch_awaiting_spans_debounce_and_flight() {
        let mut d = QueryDispatcher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        d.set_query("drag", &tx);
        assert!(d.is_awaiting());
        tokio::time::sleep(Duration::from_millis(DEFAULT_DEBOUNCE_MS + 50)).await;
        let sent = rx.try_recv().expect("dispatched");
        assert!(!d.has_pending());
        assert!(d.is_awaiting());

        d.accept(SearchResults {
            id: sent.id,
            outcome: Ok(vec![hit("useDrag")]),
        });
        assert!(!d.is_awaiting());
        assert_eq!(d.mode(), PresentationMode::Showing);

        d.set_query("dragz", &tx);
        assert_eq!(d.mode(), PresentationMode::Suggesting);
        assert!(d.is_awaiting());

        d.set_query("", &tx);
        assert!(!d.is_awaiting());
    }

    #[tokio::test(start_paused = true)]
    /// What: Reset cancels the timer and invalidates in-flight tokens.
    ///
    /// Inputs:
    /// - Scheduled query, then `reset`, then a response for the old token
    ///
    /// Output:
    /// - No dispatch, empty query, response dropped
    async fn dispatch_reset_cancels_and_invalidates() {
        let mut d = QueryDispatcher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        d.set_query("spring", &tx);
        let old = d.latest_token();
        d.reset();
        assert_eq!(d.query(), "");
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert!(
            d.accept(SearchResults {
                id: old,
                outcome: Ok(vec![hit("useSpring")])
            })
            .is_none()
        );
        assert_eq!(d.mode(), PresentationMode::Suggesting);
    }
}
