//! Typing, debounce, worker round trips and token ordering through the public API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

use docsearch::app::{handle_search_results, spawn_search_worker};
use docsearch::events::handle_event;
use docsearch::logic::flatten;
use docsearch::sources::{SearchRequest, SearchService};
use docsearch::state::{AppState, PresentationMode, QueryInput, ResultKind, SearchResult, SearchResults};
use docsearch::theme::Settings;

/// In-memory index: matches titles containing the query, optionally slowly.
struct FakeIndex {
    /// Searchable entries.
    docs: Vec<SearchResult>,
    /// Query texts received, in order.
    calls: Mutex<Vec<String>>,
    /// Per-query artificial latency.
    delays: Vec<(&'static str, Duration)>,
}

impl SearchService for FakeIndex {
    async fn search(&self, req: &SearchRequest) -> docsearch::sources::Result<Vec<SearchResult>> {
        self.record(&req.text);
        if let Some((_, d)) = self.delays.iter().find(|(q, _)| *q == req.text) {
            tokio::time::sleep(*d).await;
        }
        if req.text == "boom" {
            return Err("index unavailable".into());
        }
        let needle = req.text.to_lowercase();
        Ok(self
            .docs
            .iter()
            .filter(|d| d.title.to_lowercase().contains(&needle))
            .take(req.limit)
            .cloned()
            .collect())
    }
}

impl FakeIndex {
    fn record(&self, text: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_string());
        }
    }
}

fn doc(title: &str, category: &str) -> SearchResult {
    SearchResult {
        id: Some(title.to_string()),
        kind: ResultKind::Function,
        group: "motion".to_string(),
        category: category.to_string(),
        title: title.to_string(),
        subtitle: None,
        extra: None,
        description: String::new(),
        target: format!("/docs/{}#{}", category.to_lowercase(), title),
    }
}

fn index(delays: Vec<(&'static str, Duration)>) -> Arc<FakeIndex> {
    Arc::new(FakeIndex {
        docs: vec![
            doc("drag", "Gestures"),
            doc("useDragControls", "Hooks"),
            doc("dragConstraints", "Gestures"),
            doc("spring", "Transitions"),
            doc("fast", "Misc"),
            doc("slow", "Misc"),
        ],
        calls: Mutex::new(Vec::new()),
        delays,
    })
}

fn key(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
}

/// Channels for one test: queries into the worker, answers and navigations out.
struct Harness {
    query_tx: mpsc::UnboundedSender<QueryInput>,
    results_rx: mpsc::UnboundedReceiver<SearchResults>,
    nav_tx: mpsc::UnboundedSender<String>,
    nav_rx: mpsc::UnboundedReceiver<String>,
    diag_tx: mpsc::UnboundedSender<String>,
    diag_rx: mpsc::UnboundedReceiver<String>,
}

fn harness(service: Arc<FakeIndex>) -> Harness {
    let (query_tx, query_rx) = mpsc::unbounded_channel();
    let (results_tx, results_rx) = mpsc::unbounded_channel();
    let (nav_tx, nav_rx) = mpsc::unbounded_channel();
    let (diag_tx, diag_rx) = mpsc::unbounded_channel();
    let _worker = spawn_search_worker(service, query_rx, results_tx);
    Harness {
        query_tx,
        results_rx,
        nav_tx,
        nav_rx,
        diag_tx,
        diag_rx,
    }
}

fn app() -> AppState {
    AppState::from_settings(&Settings {
        debounce_ms: 200,
        ..Settings::default()
    })
}

#[tokio::test(start_paused = true)]
/// What: A burst of keystrokes yields one request; its answer shows grouped results.
///
/// Inputs:
/// - "drag" typed faster than the debounce window
///
/// Output:
/// - Exactly one request for "drag"; `Showing` with 3 results in 2 categories, cursor 0
async fn flow_typing_debounces_to_one_request() {
    let svc = index(Vec::new());
    let mut h = harness(Arc::clone(&svc));
    let mut app = app();

    for ch in "drag".chars() {
        assert!(!handle_event(key(ch), &mut app, &h.query_tx, &h.nav_tx));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(app.mode(), PresentationMode::Suggesting);

    let answer = h.results_rx.recv().await.expect("answer");
    handle_search_results(&mut app, answer, &h.diag_tx);

    assert_eq!(*svc.calls.lock().expect("calls"), vec!["drag".to_string()]);
    assert_eq!(app.mode(), PresentationMode::Showing);
    let cat = app.results.categorized();
    assert_eq!(cat.groups.len(), 1);
    assert_eq!(cat.groups[0].categories.len(), 2);
    assert_eq!(flatten(cat).len(), 3);
    assert_eq!(app.active_cursor().index(), 0);
}

#[tokio::test(start_paused = true)]
/// What: An older answer arriving after a newer one is discarded.
///
/// Inputs:
/// - "slow" (500 ms latency) dispatched, then "fast" dispatched before it answers
///
/// Output:
/// - Displayed results are those for "fast" after both answers are applied
async fn flow_latest_token_wins() {
    let svc = index(vec![("slow", Duration::from_millis(500))]);
    let mut h = harness(Arc::clone(&svc));
    let mut app = app();
    docsearch::logic::open_overlay(&mut app);

    docsearch::logic::set_query(&mut app, "slow", &h.query_tx);
    tokio::time::sleep(Duration::from_millis(250)).await;
    docsearch::logic::set_query(&mut app, "fast", &h.query_tx);

    let first = h.results_rx.recv().await.expect("first");
    let second = h.results_rx.recv().await.expect("second");
    assert!(first.id > second.id, "fast answer should arrive first");
    handle_search_results(&mut app, first, &h.diag_tx);
    handle_search_results(&mut app, second, &h.diag_tx);

    assert_eq!(app.mode(), PresentationMode::Showing);
    let titles: Vec<String> = app
        .results
        .cursor()
        .items()
        .iter()
        .map(|r| r.title.clone())
        .collect();
    assert_eq!(titles, ["fast"]);
    assert_eq!(svc.calls.lock().expect("calls").len(), 2);
}

#[tokio::test(start_paused = true)]
/// What: Empty answers make Enter inert; failures report a diagnostic without blocking.
///
/// Inputs:
/// - "zzz" answered with nothing, Enter; then "boom" answered with an error
///
/// Output:
/// - No navigation, overlay open, one diagnostics message mentioning the error
async fn flow_empty_and_failure() {
    let svc = index(Vec::new());
    let mut h = harness(svc);
    let mut app = app();

    for ch in "zzz".chars() {
        handle_event(key(ch), &mut app, &h.query_tx, &h.nav_tx);
    }
    let answer = h.results_rx.recv().await.expect("answer");
    handle_search_results(&mut app, answer, &h.diag_tx);
    assert_eq!(app.mode(), PresentationMode::Empty);
    handle_event(
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        &mut app,
        &h.query_tx,
        &h.nav_tx,
    );
    assert!(h.nav_rx.try_recv().is_err());
    assert!(app.is_open);

    docsearch::logic::set_query(&mut app, "boom", &h.query_tx);
    let answer = h.results_rx.recv().await.expect("answer");
    handle_search_results(&mut app, answer, &h.diag_tx);
    assert_eq!(app.mode(), PresentationMode::Empty);
    let msg = h.diag_rx.try_recv().expect("diagnostic");
    assert!(msg.contains("index unavailable"));
    assert!(app.is_open);
}

#[tokio::test(start_paused = true)]
/// What: Down clamps at the end and Enter navigates exactly once, closing the overlay.
///
/// Inputs:
/// - "drag" answered with 3 results; cursor moved to 1, then Down twice, Enter
///
/// Output:
/// - Cursor 2 after both Downs; one navigation to the last flattened target; closed
async fn flow_keyboard_commit_navigates_once() {
    let svc = index(Vec::new());
    let mut h = harness(svc);
    let mut app = app();
    let down = || Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));

    for ch in "drag".chars() {
        handle_event(key(ch), &mut app, &h.query_tx, &h.nav_tx);
    }
    let answer = h.results_rx.recv().await.expect("answer");
    handle_search_results(&mut app, answer, &h.diag_tx);
    handle_event(down(), &mut app, &h.query_tx, &h.nav_tx);
    assert_eq!(app.active_cursor().index(), 1);
    handle_event(down(), &mut app, &h.query_tx, &h.nav_tx);
    assert_eq!(app.active_cursor().index(), 2);
    handle_event(down(), &mut app, &h.query_tx, &h.nav_tx);
    assert_eq!(app.active_cursor().index(), 2);

    let expected = flatten(app.results.categorized())[2].target.clone();
    handle_event(
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        &mut app,
        &h.query_tx,
        &h.nav_tx,
    );
    assert_eq!(h.nav_rx.try_recv().ok(), Some(expected));
    assert!(h.nav_rx.try_recv().is_err());
    assert!(!app.is_open);
}

#[tokio::test(start_paused = true)]
/// What: Closing the overlay mid-flight drops the pending request and its answer.
///
/// Inputs:
/// - "spring" typed, outside click before the debounce window ends
///
/// Output:
/// - Closed with an empty query and cursors at 0; no request is ever sent
async fn flow_outside_click_cancels_pending_query() {
    let svc = index(Vec::new());
    let h = harness(Arc::clone(&svc));
    let mut app = app();
    app.overlay_rect = Some((10, 2, 40, 10));

    for ch in "spring".chars() {
        handle_event(key(ch), &mut app, &h.query_tx, &h.nav_tx);
    }
    handle_event(
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }),
        &mut app,
        &h.query_tx,
        &h.nav_tx,
    );
    assert!(!app.is_open);
    assert_eq!(app.query(), "");
    assert_eq!(app.suggestions.index(), 0);
    assert_eq!(app.results.cursor().index(), 0);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(svc.calls.lock().expect("calls").is_empty());
}
