//! Extraction error types.

use crate::config::ConfigError;
use crate::github::GitHubError;
use thiserror::Error;

/// Errors that abort an extraction.
///
/// Section and enrichment failures never surface here; they degrade the
/// report instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input is neither a GitHub URL nor `owner/repo`.
    #[error("Invalid repository identifier '{0}'. Use a GitHub URL or 'owner/repo' format")]
    InvalidIdentifier(String),

    /// A URL pointing somewhere other than github.com.
    #[error("Only GitHub repositories are supported, got host '{0}'")]
    UnsupportedHost(String),

    /// Client configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Failed to set up GitHub client: {0}")]
    Client(#[source] GitHubError),

    /// The repository itself could not be fetched.
    #[error(transparent)]
    Repository(#[from] GitHubError),
}

impl ExtractError {
    /// Seconds to wait before retrying, if the failure was a rate limit.
    #[must_use]
    pub fn rate_limit_wait(&self) -> Option<u64> {
        match self {
            ExtractError::Repository(GitHubError::RateLimited { wait_secs }) => Some(*wait_secs),
            _ => None,
        }
    }
}
