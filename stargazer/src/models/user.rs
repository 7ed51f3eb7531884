//! User records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stargazer or fork owner.
///
/// List endpoints only yield the identity fields, so a freshly paginated
/// record has no [`UserDetails`]. A missing details block means the user
/// has not been enriched, not that GitHub lacks the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    /// GitHub username; unique within one extraction.
    pub login: String,

    pub avatar_url: String,

    /// Profile URL on github.com.
    pub html_url: String,

    /// Profile fields, present once the record has been enriched.
    #[serde(flatten)]
    pub details: Option<UserDetails>,
}

/// Profile fields from a per-user fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserDetails {
    pub name: Option<String>,

    /// Public profile email, or an address found by email discovery.
    pub email: Option<String>,

    pub location: Option<String>,

    pub company: Option<String>,

    pub bio: Option<String>,

    pub blog: Option<String>,

    pub twitter_username: Option<String>,

    pub public_repos: u64,

    pub followers: u64,

    pub following: u64,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Creates a record carrying only identity fields.
    pub fn minimal(
        login: impl Into<String>,
        avatar_url: impl Into<String>,
        html_url: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            avatar_url: avatar_url.into(),
            html_url: html_url.into(),
            details: None,
        }
    }

    /// Returns true once profile fields have been attached.
    #[must_use]
    pub fn is_detailed(&self) -> bool {
        self.details.is_some()
    }

    /// Returns the known email address, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.email.as_deref())
    }
}
