//! Overlay state: result types, the selection cursor and the application state.

pub mod app_state;
pub mod cursor;
pub mod types;

pub use app_state::{ActiveList, AppState, ResultSet};
pub use cursor::SelectionCursor;
pub use types::{PresentationMode, QueryInput, ResultKind, SearchResult, SearchResults};
