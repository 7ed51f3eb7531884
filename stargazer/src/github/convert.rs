//! Conversions from wire types to report models.

use super::types::{RepositoryPayload, UserProfilePayload, UserSummaryPayload};
use crate::models::{RepositoryRecord, UserDetails, UserRecord};

impl From<RepositoryPayload> for RepositoryRecord {
    fn from(repo: RepositoryPayload) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            owner: repo.owner.login,
            description: repo.description,
            html_url: repo.html_url,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            language: repo.language,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
        }
    }
}

impl From<UserSummaryPayload> for UserRecord {
    fn from(user: UserSummaryPayload) -> Self {
        UserRecord::minimal(user.login, user.avatar_url, user.html_url)
    }
}

impl From<UserProfilePayload> for UserRecord {
    fn from(user: UserProfilePayload) -> Self {
        Self {
            login: user.login,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            details: Some(UserDetails {
                name: user.name,
                email: user.email.filter(|e| !e.is_empty()),
                location: user.location,
                company: user.company,
                bio: user.bio,
                blog: user.blog,
                twitter_username: user.twitter_username,
                public_repos: user.public_repos,
                followers: user.followers,
                following: user.following,
                created_at: user.created_at,
                updated_at: user.updated_at,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn converts_repository_payload() {
        let payload: RepositoryPayload = serde_json::from_value(json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "owner": { "login": "octocat", "id": 1 },
            "description": "This your first repo!",
            "html_url": "https://github.com/octocat/Hello-World",
            "stargazers_count": 80,
            "forks_count": 9,
            "language": null,
            "created_at": "2011-01-26T19:01:12Z",
            "updated_at": "2011-01-26T19:14:43Z"
        }))
        .unwrap();

        let record = RepositoryRecord::from(payload);
        assert_eq!(record.owner, "octocat");
        assert_eq!(record.full_name, "octocat/Hello-World");
        assert_eq!(record.stargazers_count, 80);
        assert_eq!(record.language, None);
        assert_eq!(
            record.created_at,
            Some(Utc.with_ymd_and_hms(2011, 1, 26, 19, 1, 12).unwrap())
        );
    }

    #[test]
    fn converts_profile_and_drops_empty_email() {
        let payload: UserProfilePayload = serde_json::from_value(json!({
            "login": "jane",
            "name": "Jane Doe",
            "email": "",
            "location": "Berlin",
            "company": null,
            "bio": null,
            "blog": "https://jane.dev",
            "twitter_username": null,
            "public_repos": 12,
            "followers": 3,
            "following": 4,
            "created_at": "2015-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z",
            "avatar_url": "https://avatars.githubusercontent.com/u/2",
            "html_url": "https://github.com/jane"
        }))
        .unwrap();

        let record = UserRecord::from(payload);
        let details = record.details.expect("profile conversion yields details");
        assert_eq!(details.email, None);
        assert_eq!(details.location.as_deref(), Some("Berlin"));
        assert_eq!(details.public_repos, 12);
    }
}
