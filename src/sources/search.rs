use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use super::Result;
use crate::state::{QueryInput, SearchResult};

/// A query as handed to a [`SearchService`].
pub type SearchRequest = QueryInput;

/// Number of recent responses kept by [`HttpSearchService`].
const CACHE_CAPACITY: usize = 64;

/// Anything that can answer a search query.
///
/// The worker calls `search` from spawned tasks, so implementations must be
/// shareable across threads.
pub trait SearchService: Send + Sync + 'static {
    /// What: Look up `req` in the index.
    ///
    /// Inputs:
    /// - `req`: Query text, page size and context filters
    ///
    /// Output:
    /// - Matching results in index order, or the transport/decode error.
    fn search(&self, req: &SearchRequest) -> impl Future<Output = Result<Vec<SearchResult>>> + Send;
}

/// JSON body posted to the index.
#[derive(Serialize)]
struct RequestBody<'a> {
    /// Query text.
    query: &'a str,
    /// Page size.
    limit: usize,
    /// Context filters such as `library:motion`.
    filters: &'a [String],
}

/// Accepted response shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseBody {
    /// `[ {...}, ... ]`
    Bare(Vec<SearchResult>),
    /// `{ "results": [ {...}, ... ] }`
    Wrapped {
        /// Hits.
        results: Vec<SearchResult>,
    },
}

/// What: Decode a response body in either accepted shape.
///
/// Inputs:
/// - `body`: Raw JSON text
///
/// Output:
/// - Results, or a decode error.
pub(crate) fn parse_response(body: &str) -> Result<Vec<SearchResult>> {
    match serde_json::from_str::<ResponseBody>(body)? {
        ResponseBody::Bare(results) | ResponseBody::Wrapped { results } => Ok(results),
    }
}

/// HTTP client for a JSON search endpoint, with a small response cache.
#[derive(Debug)]
pub struct HttpSearchService {
    /// Pooled HTTP client.
    client: reqwest::Client,
    /// POST target.
    endpoint: String,
    /// Recent answers keyed by query, limit and filters.
    cache: Mutex<LruCache<String, Vec<SearchResult>>>,
}

impl HttpSearchService {
    /// What: Build a service for `endpoint` with default timeouts.
    ///
    /// Inputs:
    /// - `endpoint`: URL receiving the JSON POST
    ///
    /// Output:
    /// - Service, or the error from building the HTTP client.
    ///
    /// # Errors
    /// - Returns `Err` when the TLS backend or client configuration cannot be initialized
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("docsearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(Self::with_client(endpoint, client))
    }

    /// Build a service around an existing client.
    #[must_use]
    pub fn with_client(endpoint: &str, client: reqwest::Client) -> Self {
        let cap = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            client,
            endpoint: endpoint.to_string(),
            cache: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Cached answer for `key`, if any.
    fn cached(&self, key: &str) -> Option<Vec<SearchResult>> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    /// Remember `results` under `key`.
    fn remember(&self, key: String, results: &[SearchResult]) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, results.to_vec());
        }
    }
}

/// Cache key covering everything that changes the answer.
fn cache_key(req: &SearchRequest) -> String {
    format!(
        "{}\u{1f}{}\u{1f}{}",
        req.text.trim(),
        req.limit,
        req.filters.join(",")
    )
}

impl SearchService for HttpSearchService {
    async fn search(&self, req: &SearchRequest) -> Result<Vec<SearchResult>> {
        let key = cache_key(req);
        if let Some(hit) = self.cached(&key) {
            tracing::debug!(query = %req.text, count = hit.len(), "search cache hit");
            return Ok(hit);
        }
        let body = RequestBody {
            query: req.text.trim(),
            limit: req.limit,
            filters: &req.filters,
        };
        let text = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Network error: {e}"))?
            .error_for_status()
            .map_err(|e| format!("Search endpoint error: {e}"))?
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {e}"))?;
        let results =
            parse_response(&text).map_err(|e| format!("Malformed search response: {e}"))?;
        tracing::info!(query = %req.text, count = results.len(), "search completed");
        self.remember(key, &results);
        Ok(results)
    }
}
