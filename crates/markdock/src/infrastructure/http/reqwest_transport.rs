//! `reqwest`-backed [`HttpTransport`].
//!
//! One shared [`reqwest::Client`] per process; the per-request timeout is
//! applied with `RequestBuilder::timeout` so it covers connect, headers and
//! body.  The body is read eagerly so the use case sees the status and the
//! body-read outcome separately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::application::fetch_news::{HttpResponse, HttpTransport, TransportError};

/// Production HTTP transport.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client (custom proxy, TLS roots, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| request_error(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(timeout)
                } else {
                    TransportError::Body(strip_url(e).to_string())
                }
            });

        Ok(HttpResponse { status, body })
    }
}

fn request_error(e: reqwest::Error, timeout: Duration) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Request(strip_url(e).to_string())
    }
}

// reqwest includes the request URL in its Display output; the URL carries
// the API key.
fn strip_url(e: reqwest::Error) -> reqwest::Error {
    e.without_url()
}
