//! HTTP transport boundary.
//!
//! All network I/O performed by the library goes through [`HttpTransport`],
//! so the GitHub client can be driven by an in-memory transport in tests.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// HTTP headers represented as key/value pairs.
///
/// Header names are treated case-insensitively by helper functions.
pub type HttpHeaders = Vec<(String, String)>;

/// A GET request against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HttpHeaders,
}

/// A raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        header_get(&self.headers, name)
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("http transport error: {0}")]
    Transport(String),

    #[cfg(test)]
    #[error("no mock response registered for GET {url}")]
    NoMockResponse { url: String },
}

/// Transport boundary for all HTTP I/O.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Get the first header value matching `name` (case-insensitive).
#[must_use]
pub fn header_get<'a>(headers: &'a HttpHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// A real HTTP transport backed by a pooled reqwest client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.client.get(&request.url);
        for (k, v) in request.headers {
            builder = builder.header(&k, &v);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let headers: HttpHeaders = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        let body = resp
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// ---------- Test-only mock transport ----------

#[cfg(test)]
pub(crate) use mock::{json_response, MockTransport};

#[cfg(test)]
mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    /// In-memory mock transport.
    ///
    /// No sockets: responses are queued per URL and served in FIFO order.
    #[derive(Clone, Default)]
    pub(crate) struct MockTransport {
        inner: Arc<Mutex<MockTransportInner>>,
    }

    #[derive(Default)]
    struct MockTransportInner {
        routes: HashMap<String, VecDeque<Result<HttpResponse, String>>>,
        requests: Vec<HttpRequest>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn push_response(&self, url: impl Into<String>, response: HttpResponse) {
            self.push(url.into(), Ok(response));
        }

        /// Queue a JSON body with the given status.
        pub(crate) fn push_json(&self, url: impl Into<String>, status: u16, body: serde_json::Value) {
            self.push_response(url, json_response(status, body));
        }

        /// Queue a connection-level failure.
        pub(crate) fn push_failure(&self, url: impl Into<String>, message: &str) {
            self.push(url.into(), Err(message.to_string()));
        }

        fn push(&self, url: String, entry: Result<HttpResponse, String>) {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner.routes.entry(url).or_default().push_back(entry);
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            let inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner.requests.clone()
        }

        pub(crate) fn requested_urls(&self) -> Vec<String> {
            self.requests().into_iter().map(|r| r.url).collect()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");

            let url = request.url.clone();
            inner.requests.push(request);

            match inner.routes.get_mut(&url).and_then(|q| q.pop_front()) {
                Some(Ok(resp)) => Ok(resp),
                Some(Err(message)) => Err(HttpError::Transport(message)),
                None => Err(HttpError::NoMockResponse { url }),
            }
        }
    }

    pub(crate) fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string().into_bytes(),
        }
    }
}
