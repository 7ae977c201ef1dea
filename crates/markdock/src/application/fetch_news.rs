//! FetchNewsUseCase: serve the business news feed at most once per window.
//!
//! ```text
//! fetch_news()
//!   ├─ cache fresh?        ──yes──►  cached body (no network)
//!   ├─ credential empty?   ──yes──►  NewsError::CredentialMissing
//!   └─ GET endpoint?apiKey=…&language=en&category=business  (10 s timeout)
//!        ├─ transport error      ──►  NewsError::FetchFailed
//!        ├─ status != 200        ──►  NewsError::UnexpectedStatus
//!        ├─ body read error      ──►  NewsError::ReadFailed
//!        └─ ok                   ──►  store in cache, return body
//! ```
//!
//! The cache mutex is held from the freshness check until the cache is
//! updated, so concurrent callers on a cold cache produce one request and
//! the rest are served the stored body.  Errors are returned as-is; nothing
//! is retried here.
//!
//! The response body is opaque to this layer: it is decoded once (lossy
//! UTF-8) when it arrives, never parsed, and handed out as a shared
//! `Arc<str>` so a cache hit does not copy it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use url::Url;

use markdock_core::{ApiKey, Clock, NewsCache};

/// `language` query parameter sent with every request.
pub const NEWS_LANGUAGE: &str = "en";

/// `category` query parameter sent with every request.
pub const NEWS_CATEGORY: &str = "business";

// ── Transport port ────────────────────────────────────────────────────────────

/// Failure reported by an [`HttpTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Request(String),
    #[error("body read failed: {0}")]
    Body(String),
}

/// Status line and body of a completed GET.
///
/// The body is a `Result` because reading it can fail after the status has
/// already arrived; the use case decides which of the two to look at first.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Result<Vec<u8>, TransportError>,
}

impl HttpResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: Ok(body.into()),
        }
    }

    /// A response with the given status and an empty body.
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            body: Ok(Vec::new()),
        }
    }
}

/// Performs a single HTTP GET.
///
/// The production implementation uses `reqwest`; tests use
/// `infrastructure::http::mock::ScriptedTransport` or the generated
/// `MockHttpTransport`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for the fetch-news use case.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("API key is missing. Please check settings.")]
    CredentialMissing,
    #[error("failed to fetch news: {0}")]
    FetchFailed(#[source] TransportError),
    #[error("API returned status code: {0}")]
    UnexpectedStatus(u16),
    #[error("failed to read response: {0}")]
    ReadFailed(#[source] TransportError),
}

// ── Use case ──────────────────────────────────────────────────────────────────

/// Cached news fetcher holding the running instance's API key.
pub struct NewsFetcher {
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    endpoint: Url,
    timeout: Duration,
    cache: Mutex<NewsCache>,
    credential: RwLock<ApiKey>,
}

impl NewsFetcher {
    /// Creates a fetcher with an empty cache and an empty credential.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
        endpoint: Url,
        timeout: Duration,
        cache_window: Duration,
    ) -> Self {
        Self {
            transport,
            clock,
            endpoint,
            timeout,
            cache: Mutex::new(NewsCache::with_window(cache_window)),
            credential: RwLock::new(ApiKey::default()),
        }
    }

    /// Replaces the in-memory API key.  Takes effect on the next fetch.
    pub async fn set_credential(&self, key: ApiKey) {
        *self.credential.write().await = key;
    }

    pub async fn has_credential(&self) -> bool {
        !self.credential.read().await.is_empty()
    }

    /// Builds the request URL for `key`.
    pub fn request_url(&self, key: &ApiKey) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("apiKey", key.expose())
            .append_pair("language", NEWS_LANGUAGE)
            .append_pair("category", NEWS_CATEGORY);
        url
    }

    /// Returns the news feed body, from cache when it is still fresh.
    ///
    /// # Errors
    ///
    /// See [`NewsError`].  A failed fetch leaves any cached body in place.
    pub async fn fetch_news(&self) -> Result<Arc<str>, NewsError> {
        let mut cache = self.cache.lock().await;

        if let Some(body) = cache.fresh(self.clock.now()) {
            debug!(bytes = body.len(), "serving news from cache");
            return Ok(body);
        }

        let key = self.credential.read().await.clone();
        if key.is_empty() {
            return Err(NewsError::CredentialMissing);
        }

        debug!(endpoint = %self.endpoint, "news cache miss, fetching");
        let response = self
            .transport
            .get(&self.request_url(&key), self.timeout)
            .await
            .map_err(|e| {
                warn!("news request failed: {e}");
                NewsError::FetchFailed(e)
            })?;

        if response.status != 200 {
            warn!(status = response.status, "news endpoint returned non-200");
            return Err(NewsError::UnexpectedStatus(response.status));
        }

        let body = response.body.map_err(NewsError::ReadFailed)?;
        let text: Arc<str> = String::from_utf8_lossy(&body).into();
        info!(bytes = body.len(), "news feed refreshed");
        cache.store(Arc::clone(&text), self.clock.now());

        Ok(text)
    }

    /// Whole minutes since the cached body was fetched, or `-1` if none.
    pub async fn cache_age_minutes(&self) -> i64 {
        self.cache.lock().await.age_minutes(self.clock.now())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
