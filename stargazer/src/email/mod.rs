//! Best-effort email discovery.
//!
//! When a user keeps their profile email private, their public activity
//! often still carries a commit author address. [`EmailStrategy`] lists the
//! places we look, in order; the first acceptable address wins.

mod filter;

pub use filter::{is_acceptable_email, NOREPLY_SUFFIX};

use crate::github::types::{CommitPayload, EventPayload, OwnedRepoPayload};
use crate::github::{GitHubClient, GitHubError};
use crate::models::UserRecord;
use tracing::{debug, info};

/// Events scanned per event stream.
const EVENTS_PER_PAGE: u32 = 30;

/// Repositories listed when scanning a user's own repositories.
const REPOS_PER_PAGE: u32 = 10;

/// Leading repositories of the listing that are inspected.
const REPOS_TO_INSPECT: usize = 3;

/// Commits scanned per inspected repository.
const COMMITS_PER_PAGE: u32 = 10;

/// A single place to look for a user's email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailStrategy {
    /// Commit authors of `PushEvent`s in the user's event stream.
    PushEvents,
    /// Commit authors embedded in `CreateEvent`s of the public event stream.
    PublicEvents,
    /// Commits authored by the user in their most recently updated repositories.
    OwnedRepositories,
}

impl EmailStrategy {
    /// All strategies in the order they are tried.
    pub const ALL: [EmailStrategy; 3] = [
        EmailStrategy::PushEvents,
        EmailStrategy::PublicEvents,
        EmailStrategy::OwnedRepositories,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EmailStrategy::PushEvents => "push events",
            EmailStrategy::PublicEvents => "public events",
            EmailStrategy::OwnedRepositories => "owned repositories",
        }
    }

    async fn run(self, client: &GitHubClient, username: &str) -> Result<Option<String>, GitHubError> {
        match self {
            EmailStrategy::PushEvents => {
                let events = fetch_events(client, &format!("/users/{username}/events")).await?;
                Ok(first_event_email(&events, "PushEvent"))
            }
            EmailStrategy::PublicEvents => {
                let events =
                    fetch_events(client, &format!("/users/{username}/events/public")).await?;
                Ok(first_event_email(&events, "CreateEvent"))
            }
            EmailStrategy::OwnedRepositories => owned_repository_email(client, username).await,
        }
    }
}

impl GitHubClient {
    /// Runs the email strategies in order and returns the first acceptable
    /// address.
    ///
    /// A failing strategy is logged and skipped; running out of strategies
    /// is not an error.
    pub async fn discover_email(&self, username: &str) -> Option<String> {
        for strategy in EmailStrategy::ALL {
            match strategy.run(self, username).await {
                Ok(Some(email)) => {
                    info!(user = username, source = strategy.name(), "Found email");
                    return Some(email);
                }
                Ok(None) => {
                    debug!(user = username, source = strategy.name(), "No email found");
                }
                Err(e) => {
                    debug!(
                        user = username,
                        source = strategy.name(),
                        error = %e,
                        "Email strategy failed"
                    );
                }
            }
        }

        debug!(user = username, "No email found after trying all strategies");
        None
    }

    /// Fetches a user's profile, filling in a discovered email when the
    /// profile email is private and `aggressive_email` is set.
    ///
    /// # Errors
    ///
    /// Returns the profile fetch error; discovery failures never surface.
    pub async fn user_details(
        &self,
        username: &str,
        aggressive_email: bool,
    ) -> Result<UserRecord, GitHubError> {
        let mut user = self.user_profile(username).await?;

        if user.email().is_none() {
            if aggressive_email {
                debug!(user = username, "Email not public, trying discovery");
                let discovered = self.discover_email(username).await;
                if let Some(details) = user.details.as_mut() {
                    details.email = discovered;
                }
            } else {
                debug!(user = username, "No public email and discovery disabled");
            }
        }

        Ok(user)
    }
}

async fn fetch_events(client: &GitHubClient, endpoint: &str) -> Result<Vec<EventPayload>, GitHubError> {
    client
        .get(endpoint, &[("per_page", EVENTS_PER_PAGE.to_string())])
        .await
}

/// First acceptable commit author email among events of `kind`.
fn first_event_email(events: &[EventPayload], kind: &str) -> Option<String> {
    events
        .iter()
        .filter(|event| event.kind.as_deref() == Some(kind))
        .flat_map(EventPayload::commits)
        .filter_map(|commit| commit.author.as_ref()?.email.as_deref())
        .find(|email| is_acceptable_email(email))
        .map(str::to_string)
}

async fn owned_repository_email(
    client: &GitHubClient,
    username: &str,
) -> Result<Option<String>, GitHubError> {
    let repos: Vec<OwnedRepoPayload> = client
        .get(
            &format!("/users/{username}/repos"),
            &[
                ("per_page", REPOS_PER_PAGE.to_string()),
                ("sort", "updated".to_string()),
            ],
        )
        .await?;

    let owned = repos
        .iter()
        .take(REPOS_TO_INSPECT)
        .filter(|repo| repo.owner.as_ref().is_some_and(|o| o.login == username));

    for repo in owned {
        let commits: Vec<CommitPayload> = match client
            .get(
                &format!("/repos/{username}/{}/commits", repo.name),
                &[
                    ("per_page", COMMITS_PER_PAGE.to_string()),
                    ("author", username.to_string()),
                ],
            )
            .await
        {
            Ok(commits) => commits,
            Err(e) => {
                debug!(user = username, repo = %repo.name, error = %e, "Skipping repository");
                continue;
            }
        };

        let email = commits
            .iter()
            .filter_map(|c| c.commit.as_ref()?.author.as_ref()?.email.as_deref())
            .find(|email| is_acceptable_email(email));

        if let Some(email) = email {
            return Ok(Some(email.to_string()));
        }
    }

    Ok(None)
}
