//! Core value types used by docsearch state.

use serde::{Deserialize, Serialize};

/// Kind of documentation entry a search hit points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// A whole documentation page.
    Page,
    /// A top-level heading on a page.
    Section,
    /// A nested heading on a page.
    Subsection,
    /// A documented property or prop.
    Property,
    /// A documented function or hook.
    Function,
}

impl ResultKind {
    /// Return the short badge label rendered in front of a result.
    ///
    /// Inputs: none
    ///
    /// Output: Static label string.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Section => "§",
            Self::Subsection => "§§",
            Self::Property => "prop",
            Self::Function => "fn",
        }
    }
}

/// A single match returned by the search index.
///
/// Immutable once received. Selection tracks results by position in the
/// flattened list, never by comparing content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Stable identifier when the index provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// What the hit points at.
    #[serde(alias = "type")]
    pub kind: ResultKind,
    /// Top-level partition, e.g. the library a page belongs to.
    pub group: String,
    /// Second-level partition, typically the source page name.
    pub category: String,
    /// Primary display text.
    pub title: String,
    /// Secondary heading text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Trailing annotation (signature, type, etc.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Link the overlay navigates to when this result is committed.
    #[serde(alias = "href")]
    pub target: String,
}

/// What the overlay presents and which selection cursor is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresentationMode {
    /// No query yet, or the answer for the current query is still pending.
    #[default]
    Suggesting,
    /// The current query produced at least one result.
    Showing,
    /// The current query produced no results (or the lookup failed).
    Empty,
}

/// Search query handed from the dispatcher to the background search worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryInput {
    /// Monotonic token used to correlate responses.
    pub id: u64,
    /// Query text as typed.
    pub text: String,
    /// Maximum number of results requested.
    pub limit: usize,
    /// Context filters scoping the match (page, library).
    pub filters: Vec<String>,
}

/// Results corresponding to a prior [`QueryInput`].
#[derive(Clone, Debug)]
pub struct SearchResults {
    /// Echoed token from the originating query.
    pub id: u64,
    /// Matching results in index order, or the transport error message.
    pub outcome: Result<Vec<SearchResult>, String>,
}
