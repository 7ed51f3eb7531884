//! Page-numbered list walking.
//!
//! GitHub list endpoints are walked from page 1 until an empty page comes
//! back or a page ceiling is reached. Each entry is projected into a minimal
//! [`UserRecord`].

use crate::github::types::{ForkPayload, UserSummaryPayload};
use crate::github::{GitHubClient, GitHubError};
use crate::models::UserRecord;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Number of pages needed to cover `max_count` items at `page_size` per page.
#[must_use]
pub fn pages_for(max_count: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    u32::try_from(max_count.div_ceil(page_size)).unwrap_or(u32::MAX)
}

impl GitHubClient {
    /// Walks a list of user objects, e.g. `/repos/{owner}/{repo}/stargazers`.
    ///
    /// # Errors
    ///
    /// Any request failure aborts the walk; records from earlier pages are
    /// not returned.
    pub async fn paginate_users(
        &self,
        endpoint: &str,
        page_size: u32,
        max_pages: Option<u32>,
    ) -> Result<Vec<UserRecord>, GitHubError> {
        self.paginate(endpoint, page_size, max_pages, |user: UserSummaryPayload| {
            user.into()
        })
        .await
    }

    /// Walks `/repos/{owner}/{repo}/forks`, taking the user from each fork's
    /// nested `owner` object.
    ///
    /// # Errors
    ///
    /// Same as [`GitHubClient::paginate_users`].
    pub async fn paginate_fork_owners(
        &self,
        endpoint: &str,
        page_size: u32,
        max_pages: Option<u32>,
    ) -> Result<Vec<UserRecord>, GitHubError> {
        self.paginate(endpoint, page_size, max_pages, |fork: ForkPayload| {
            fork.owner.into()
        })
        .await
    }

    async fn paginate<T, F>(
        &self,
        endpoint: &str,
        page_size: u32,
        max_pages: Option<u32>,
        project: F,
    ) -> Result<Vec<UserRecord>, GitHubError>
    where
        T: DeserializeOwned,
        F: Fn(T) -> UserRecord,
    {
        let mut users = Vec::new();
        let mut page: u32 = 1;

        loop {
            if max_pages.is_some_and(|max| page > max) {
                debug!(endpoint, page, "Reached page ceiling");
                break;
            }

            let query = [
                ("page", page.to_string()),
                ("per_page", page_size.to_string()),
            ];
            let items: Vec<T> = self.get(endpoint, &query).await?;

            if items.is_empty() {
                debug!(endpoint, page, "Empty page, stopping");
                break;
            }

            debug!(endpoint, page, count = items.len(), "Fetched page");
            users.extend(items.into_iter().map(&project));
            page += 1;
        }

        Ok(users)
    }
}
