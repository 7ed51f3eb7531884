//! GitHub REST client.
//!
//! [`GitHubClient`] issues authenticated GET requests, retries transient
//! failures with exponential backoff, and maps HTTP failures onto
//! [`GitHubError`]. Every successful call is followed by a short courtesy
//! pause so sequential crawls stay gentle on the API.

mod convert;
mod error;
pub(crate) mod types;

pub use error::GitHubError;

use crate::config::ClientConfig;
use crate::http::{HttpHeaders, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::models::{RepositoryRecord, UserRecord};
use crate::rate_limit::{now_epoch_secs, rate_limit_wait, RateLimitStatus, RATE_LIMIT_RESET_HEADER};
use backon::{ExponentialBuilder, Retryable};
use octocrab::models::RateLimit;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use types::{ApiErrorBody, RepositoryPayload, UserProfilePayload};
use url::Url;

/// Media type pinning the REST API version.
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Client identifier sent with every request.
pub const USER_AGENT: &str = concat!("stargazer/", env!("CARGO_PKG_VERSION"));

/// Statuses retried before a response is classified.
const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Query parameters in the order they are appended to the URL.
pub type Query<'a> = [(&'a str, String)];

/// Outcome of a single attempt that should be retried.
#[derive(Debug)]
enum AttemptError {
    /// A response with one of [`RETRY_STATUSES`].
    Status(HttpResponse),
    /// The request never produced a response.
    Transport(crate::http::HttpError),
}

/// GitHub API client bound to one immutable [`ClientConfig`].
#[derive(Clone)]
pub struct GitHubClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl GitHubClient {
    /// Creates a client backed by a pooled reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(config.request_timeout())
            .map_err(|e| GitHubError::Transport(e.to_string()))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches `endpoint` and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// See [`GitHubClient::get`].
    pub async fn request(
        &self,
        endpoint: &str,
        query: &Query<'_>,
    ) -> Result<serde_json::Value, GitHubError> {
        self.get(endpoint, query).await
    }

    /// Fetches `endpoint` and decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::NotFound`], [`GitHubError::Forbidden`],
    /// [`GitHubError::RateLimited`] or [`GitHubError::Http`] for failing
    /// statuses, [`GitHubError::Network`] when no response arrived, and
    /// [`GitHubError::Decode`] when the body does not match `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query<'_>,
    ) -> Result<T, GitHubError> {
        let request = HttpRequest {
            url: self.build_url(endpoint, query)?,
            headers: self.headers(),
        };
        debug!(url = %request.url, "GET");

        let response = match self.send_with_retry(&request).await {
            Ok(response) | Err(AttemptError::Status(response)) => response,
            Err(AttemptError::Transport(e)) => return Err(GitHubError::Network(e.to_string())),
        };
        let response = classify(endpoint, response)?;

        let delay = self.config.request_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        serde_json::from_slice(&response.body).map_err(|source| GitHubError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Fetches repository metadata.
    pub async fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryRecord, GitHubError> {
        let payload: RepositoryPayload = self.get(&format!("/repos/{owner}/{repo}"), &[]).await?;
        Ok(payload.into())
    }

    /// Fetches a user's profile as a detailed record, using only the public
    /// profile email.
    pub async fn user_profile(&self, username: &str) -> Result<UserRecord, GitHubError> {
        let payload: UserProfilePayload = self.get(&format!("/users/{username}"), &[]).await?;
        Ok(payload.into())
    }

    /// Queries the remaining API budget.
    ///
    /// Goes through the same headers, retries and status mapping as every
    /// other request.
    pub async fn rate_limit_status(&self) -> Result<RateLimitStatus, GitHubError> {
        let payload: RateLimit = self.get("/rate_limit", &[]).await?;
        Ok(RateLimitStatus::from(&payload))
    }

    fn build_url(&self, endpoint: &str, query: &Query<'_>) -> Result<String, GitHubError> {
        let raw = format!(
            "{}{}",
            self.config.api_base_url().trim_end_matches('/'),
            endpoint
        );
        let mut url = Url::parse(&raw).map_err(|source| GitHubError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.to_string())
    }

    fn headers(&self) -> HttpHeaders {
        let mut headers = vec![
            ("Accept".to_string(), ACCEPT_HEADER.to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if let Some(token) = self.config.token() {
            headers.push(("Authorization".to_string(), format!("token {token}")));
        }
        headers
    }

    async fn send_with_retry(&self, request: &HttpRequest) -> Result<HttpResponse, AttemptError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.config.backoff())
            .with_factor(2.0)
            .with_max_times(self.config.max_retries());

        (|| self.attempt(request))
            .retry(backoff)
            .notify(|err: &AttemptError, dur: Duration| match err {
                AttemptError::Status(resp) => debug!(
                    url = %request.url,
                    status = resp.status,
                    retry_in = ?dur,
                    "Transient status, retrying"
                ),
                AttemptError::Transport(e) => debug!(
                    url = %request.url,
                    error = %e,
                    retry_in = ?dur,
                    "Request failed, retrying"
                ),
            })
            .await
    }

    async fn attempt(&self, request: &HttpRequest) -> Result<HttpResponse, AttemptError> {
        let response = self
            .transport
            .send(request.clone())
            .await
            .map_err(AttemptError::Transport)?;
        if RETRY_STATUSES.contains(&response.status) {
            return Err(AttemptError::Status(response));
        }
        Ok(response)
    }
}

/// Maps a final response onto success or a [`GitHubError`].
fn classify(endpoint: &str, response: HttpResponse) -> Result<HttpResponse, GitHubError> {
    if response.is_success() {
        return Ok(response);
    }

    match response.status {
        429 => Err(GitHubError::RateLimited {
            wait_secs: rate_limit_wait(response.header(RATE_LIMIT_RESET_HEADER), now_epoch_secs()),
        }),
        404 => Err(GitHubError::NotFound {
            endpoint: endpoint.to_string(),
        }),
        403 => Err(GitHubError::Forbidden {
            endpoint: endpoint.to_string(),
        }),
        status => Err(GitHubError::Http {
            status,
            message: error_message(&response),
        }),
    }
}

/// GitHub's `message` field, or the raw body when it is not JSON.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_slice::<ApiErrorBody>(&response.body)
        .map(|body| body.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(&response.body).trim().to_string())
}
