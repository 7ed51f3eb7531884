//! Repository identifier parsing.

use super::ExtractError;
use std::fmt;
use url::Url;

/// The only host accepted in URL identifiers.
const GITHUB_HOST: &str = "github.com";

/// An `owner/name` pair naming a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoIdentifier {
    pub owner: String,
    pub name: String,
}

impl RepoIdentifier {
    /// Parses `https://github.com/{owner}/{repo}[/...]` or `{owner}/{repo}`.
    ///
    /// Surrounding whitespace is ignored. Extra URL path segments, the
    /// query and the fragment are dropped, so a link to a file or an issue
    /// still resolves to its repository.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnsupportedHost`] for URLs on any other host
    /// and [`ExtractError::InvalidIdentifier`] for anything else that does
    /// not name a repository.
    pub fn parse(input: &str) -> Result<Self, ExtractError> {
        let input = input.trim();

        if input.starts_with("http://") || input.starts_with("https://") {
            return Self::parse_url(input);
        }

        match input.split_once('/') {
            Some((owner, name)) => Self::from_parts(input, owner, name),
            None => Err(ExtractError::InvalidIdentifier(input.to_string())),
        }
    }

    /// Accepts the pair only if both parts are plain path segments.
    fn from_parts(input: &str, owner: &str, name: &str) -> Result<Self, ExtractError> {
        if is_valid_part(owner) && is_valid_part(name) {
            Ok(Self::new(owner, name))
        } else {
            Err(ExtractError::InvalidIdentifier(input.to_string()))
        }
    }

    fn parse_url(input: &str) -> Result<Self, ExtractError> {
        let url = Url::parse(input).map_err(|_| ExtractError::InvalidIdentifier(input.to_string()))?;

        let host = url.host_str().unwrap_or_default();
        if host != GITHUB_HOST || url.port().is_some() {
            return Err(ExtractError::UnsupportedHost(host.to_string()));
        }

        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some(owner), Some(name)) => Self::from_parts(input, owner, name),
            _ => Err(ExtractError::InvalidIdentifier(input.to_string())),
        }
    }

    /// Creates an identifier from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// API path of a sub-resource, e.g. `/repos/{owner}/{name}/forks`.
    pub(crate) fn endpoint(&self, suffix: &str) -> String {
        format!("/repos/{}/{}/{suffix}", self.owner, self.name)
    }
}

/// Owner and repository names are limited to ASCII letters, digits, `-`,
/// `_` and `.`, and may not be `.` or `..`.
fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && part != "."
        && part != ".."
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl fmt::Display for RepoIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
