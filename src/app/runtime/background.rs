use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

/// Poll interval of the input thread; bounds how long a release waits.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What: Ownership of the terminal input reader.
///
/// Details:
/// - Acquired once at startup; dropping it cancels the reader thread and
///   joins it, so no key listener outlives the overlay.
#[derive(Debug)]
pub struct EventSubscription {
    /// Set to stop the reader thread.
    cancelled: Arc<AtomicBool>,
    /// Reader thread, absent for headless runs.
    thread: Option<JoinHandle<()>>,
}

impl EventSubscription {
    /// What: Start forwarding terminal events to `event_tx`.
    ///
    /// Inputs:
    /// - `event_tx`: Channel to the event loop
    ///
    /// Output:
    /// - Live subscription; release it by dropping.
    #[must_use]
    pub fn acquire(event_tx: mpsc::UnboundedSender<CEvent>) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let thread = std::thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                match crossterm::event::poll(POLL_INTERVAL) {
                    Ok(true) => match crossterm::event::read() {
                        Ok(ev) => {
                            if flag.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                                break;
                            }
                        }
                        // transient read errors are retried
                        Err(_) => {}
                    },
                    Ok(false) => {}
                    Err(e) => {
                        tracing::debug!(error = %e, "terminal poll failed");
                        std::thread::sleep(POLL_INTERVAL);
                    }
                }
            }
            tracing::debug!("input thread stopped");
        });
        Self {
            cancelled,
            thread: Some(thread),
        }
    }

    /// Subscription with no reader thread (headless runs).
    #[must_use]
    pub fn detached() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Whether a reader thread is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::Relaxed)
            && self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::warn!("input thread panicked");
        }
    }
}
