//! Scripted HTTP transport for testing.
//!
//! Replies are queued up front with [`ScriptedTransport::push`]; each `get`
//! pops the next one.  Every request is recorded so tests can assert how
//! often the network would have been hit and with which URL.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::application::fetch_news::{HttpResponse, HttpTransport, TransportError};

/// A mock implementation of [`HttpTransport`] that replays queued replies.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<(Url, Duration)>>,
    latency: Duration,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each request sleeps for `latency` before replying.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Queues the reply for the next request.
    pub fn push(&self, reply: Result<HttpResponse, TransportError>) {
        self.replies.lock().expect("lock poisoned").push_back(reply);
    }

    /// Queues a `200 OK` reply with `body`.
    pub fn push_ok(&self, body: &str) {
        self.push(Ok(HttpResponse::ok(body)));
    }

    /// Number of requests issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("lock poisoned").len()
    }

    /// URLs and timeouts of all requests, oldest first.
    pub fn requests(&self) -> Vec<(Url, Duration)> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push((url.clone(), timeout));

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.replies
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted reply".to_string())))
    }
}
