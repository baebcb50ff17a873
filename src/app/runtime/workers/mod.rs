//! Background workers fed by the event loop's channels.

mod navigate;
mod search;

pub use navigate::{resolve_target, spawn_navigation_worker};
pub use search::spawn_search_worker;
