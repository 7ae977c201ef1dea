//! Whole-response news cache.
//!
//! The cache holds at most one entry: the decoded body of the last
//! successful fetch and the instant it was stored.  Both live in a single `Option` so
//! content can never exist without its timestamp (or the reverse).
//!
//! ```text
//!   empty ──store()──►  entry(body, t)  ──store()──►  entry(body', t')
//!                          │
//!                  fresh(now) is Some while now - t < window
//! ```
//!
//! There is no invalidation: an entry is only replaced by the next successful
//! fetch, and a failed fetch never touches it.
//!
//! The body is shared as an `Arc<str>`, so a hit costs a reference-count
//! increment whatever the body size.

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Validity period of a cached response.
pub const DEFAULT_CACHE_WINDOW: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct CachedFeed {
    content: Arc<str>,
    fetched_at: Instant,
}

/// In-memory cache for the latest news response.
#[derive(Debug, Clone)]
pub struct NewsCache {
    entry: Option<CachedFeed>,
    window: Duration,
}

impl Default for NewsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsCache {
    /// Creates an empty cache with the standard 60-minute window.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_CACHE_WINDOW)
    }

    /// Creates an empty cache with a custom validity window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            entry: None,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// `true` until the first successful store.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Returns the cached body if it is still inside the window at `now`.
    ///
    /// The comparison is strict: an entry exactly `window` old is stale.
    pub fn fresh(&self, now: Instant) -> Option<Arc<str>> {
        self.entry
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.fetched_at) < self.window)
            .map(|e| Arc::clone(&e.content))
    }

    /// Replaces any previous entry with `content` fetched at `now`.
    pub fn store(&mut self, content: impl Into<Arc<str>>, now: Instant) {
        self.entry = Some(CachedFeed {
            content: content.into(),
            fetched_at: now,
        });
    }

    /// Whole minutes elapsed since the entry was stored, or `-1` when empty.
    pub fn age_minutes(&self, now: Instant) -> i64 {
        match &self.entry {
            None => -1,
            Some(e) => {
                let secs = now.saturating_duration_since(e.fetched_at).as_secs();
                i64::try_from(secs / 60).unwrap_or(i64::MAX)
            }
        }
    }

    /// Instant the current entry was stored, if any.
    pub fn fetched_at(&self) -> Option<Instant> {
        self.entry.as_ref().map(|e| e.fetched_at)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
