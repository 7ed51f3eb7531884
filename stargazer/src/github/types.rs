//! Wire types for the GitHub REST responses this crate reads.
//!
//! Only the fields that are actually used are declared; everything else in
//! the payloads is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepositoryPayload {
    pub name: String,
    pub full_name: String,
    pub owner: OwnerPayload,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OwnerPayload {
    pub login: String,
}

/// An entry of `/stargazers`, or the `owner` of a fork.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserSummaryPayload {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// An entry of `/forks`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForkPayload {
    pub owner: UserSummaryPayload,
}

/// `GET /users/{username}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserProfilePayload {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub bio: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub avatar_url: String,
    pub html_url: String,
}

/// An entry of `/users/{username}/events` or `/events/public`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EventPayload {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub payload: Option<EventBody>,
}

impl EventPayload {
    /// Commits embedded in the event payload, if any.
    pub fn commits(&self) -> &[EventCommit] {
        self.payload
            .as_ref()
            .and_then(|p| p.commits.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EventBody {
    pub commits: Option<Vec<EventCommit>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EventCommit {
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommitAuthor {
    pub email: Option<String>,
}

/// An entry of `/users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OwnedRepoPayload {
    pub name: String,
    pub owner: Option<OwnerPayload>,
}

/// An entry of `/repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommitPayload {
    pub commit: Option<CommitDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommitDetail {
    pub author: Option<CommitAuthor>,
}

/// Body of an error response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
