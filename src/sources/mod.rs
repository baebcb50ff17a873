//! Network retrieval for the overlay: the search index client.

mod search;

/// Crate-wide result type for fallible IO at the edges.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use search::{HttpSearchService, SearchRequest, SearchService};
