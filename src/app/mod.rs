//! docsearch application module: terminal lifecycle and the runtime loop.

/// Runtime event loop and background workers.
mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

pub use runtime::run;
pub use runtime::workers::{resolve_target, spawn_navigation_worker, spawn_search_worker};
pub use runtime::{EventSubscription, handle_diagnostic, handle_search_results};
