use std::sync::Arc;

use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use crate::sources::HttpSearchService;
use crate::state::AppState;
use crate::theme::{Settings, set_theme};
use crate::ui::ui;

use super::terminal::{restore_terminal, setup_terminal};

mod background;
mod channels;
mod handlers;
pub mod workers;

pub use background::EventSubscription;
use channels::Channels;
pub use handlers::{handle_diagnostic, handle_search_results};
use workers::{spawn_navigation_worker, spawn_search_worker};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run the overlay end-to-end: set up the terminal, start workers,
/// drive the event loop and restore the terminal on exit.
///
/// Inputs:
/// - `settings`: Fully resolved settings (config file plus CLI overrides)
///
/// Output:
/// - `Ok(())` when the user exits; `Err` on terminal or client setup failures.
///
/// # Errors
/// - Returns `Err` when the HTTP client cannot be built
/// - Returns `Err` when the terminal cannot be set up, created or restored
///
/// Details:
/// - `DOCSEARCH_TEST_HEADLESS=1` skips terminal setup, rendering, the input
///   thread and launching a browser; the loop then idles until cancelled.
/// - All state lives on this task; workers only talk to it through channels.
pub async fn run(settings: Settings) -> Result<()> {
    let headless = std::env::var("DOCSEARCH_TEST_HEADLESS").ok().as_deref() == Some("1");
    set_theme(settings.theme);
    let service = Arc::new(HttpSearchService::new(&settings.search_endpoint)?);

    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut app = AppState::from_settings(&settings);
    let mut channels = Channels::new();

    let search_worker = channels
        .query_rx
        .take()
        .map(|rx| spawn_search_worker(service, rx, channels.results_tx.clone()));
    let nav_worker = channels
        .nav_rx
        .take()
        .map(|rx| spawn_navigation_worker(rx, settings.site_url.clone(), !headless));

    let subscription = if headless {
        EventSubscription::detached()
    } else {
        EventSubscription::acquire(channels.event_tx.clone())
    };
    tracing::info!(
        endpoint = %settings.search_endpoint,
        filters = ?settings.filters(),
        headless,
        "docsearch started"
    );

    loop {
        if let Some(t) = terminal.as_mut() {
            let _ = t.draw(|f| ui(f, &mut app));
        }

        select! {
            Some(ev) = channels.event_rx.recv() => {
                if crate::events::handle_event(ev, &mut app, &channels.query_tx, &channels.nav_tx) {
                    break;
                }
            }
            Some(results) = channels.results_rx.recv() => {
                handle_search_results(&mut app, results, &channels.diag_tx);
            }
            Some(msg) = channels.diag_rx.recv() => {
                handle_diagnostic(&mut app, msg);
            }
            else => {}
        }
    }

    tracing::debug!("main loop exited");
    drop(subscription);
    // Cancels any pending debounce timer.
    drop(app);
    if let Some(h) = search_worker {
        h.abort();
    }
    if let Some(h) = nav_worker {
        h.abort();
    }

    if !headless {
        restore_terminal()?;
    }
    Ok(())
}
