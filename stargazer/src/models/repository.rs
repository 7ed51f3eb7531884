//! Repository metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata of the repository an extraction was run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRecord {
    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Login of the owning user or organization.
    pub owner: String,

    pub description: Option<String>,

    /// Canonical URL on github.com.
    pub html_url: String,

    /// Star count as reported by GitHub.
    pub stargazers_count: u64,

    /// Fork count as reported by GitHub.
    pub forks_count: u64,

    /// Primary language.
    pub language: Option<String>,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}
