//! Core logic for the overlay: grouping, query dispatch and navigation.

pub mod categorize;
pub mod dispatch;
pub mod navigation;

pub use categorize::{CategorizedResults, categorize, flatten};
pub use dispatch::{Accepted, QueryChange, QueryDispatcher};
pub use navigation::{
    apply_search_results, clear_query, close_overlay, commit, hover, move_selection, open_overlay,
    pop_char, push_char, set_query,
};
