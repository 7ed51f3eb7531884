//! GitHub client error types.

use thiserror::Error;

/// Errors returned by [`GitHubClient`](super::GitHubClient) requests.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The resource does not exist (HTTP 404).
    #[error("Not found: {endpoint}")]
    NotFound { endpoint: String },

    /// Access to the resource was refused (HTTP 403).
    #[error("Access forbidden: {endpoint}")]
    Forbidden { endpoint: String },

    /// HTTP 429; the caller decides whether to wait `wait_secs` and retry.
    #[error("Rate limit exceeded. Try again in {wait_secs} seconds")]
    RateLimited { wait_secs: u64 },

    /// Any other non-2xx status after retries were exhausted.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection-level failure after retries were exhausted.
    #[error("Request failed: {0}")]
    Network(String),

    /// The response body was not the JSON shape expected for the endpoint.
    #[error("Unexpected response body from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL and endpoint do not form a valid URL.
    #[error("Invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Transport(String),
}

impl GitHubError {
    /// Returns true for [`GitHubError::RateLimited`].
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GitHubError::RateLimited { .. })
    }
}
