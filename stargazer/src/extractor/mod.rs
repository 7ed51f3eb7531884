//! Extraction orchestrator.
//!
//! [`Extractor::extract`] resolves a repository identifier, fetches the
//! repository, then collects stargazers and fork owners. Only the repository
//! fetch is fatal; a failing section is left empty and recorded on the
//! report, and a failing profile fetch keeps the minimal user record.

mod error;
mod identifier;

pub use error::ExtractError;
pub use identifier::RepoIdentifier;

use crate::config::ClientConfig;
use crate::github::{GitHubClient, GitHubError};
use crate::models::{ExtractionReport, Section, UserRecord};
use crate::pagination::pages_for;
use crate::rate_limit::RateLimitStatus;
use tracing::{info, info_span, warn, Instrument};

/// Per-call extraction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub include_stargazers: bool,
    pub include_forkers: bool,
    /// Upper bound on stargazers returned; `None` fetches all.
    pub max_stargazers: Option<usize>,
    /// Upper bound on fork owners returned; `None` fetches all.
    pub max_forkers: Option<usize>,
    /// Fetch each user's profile after listing.
    pub detailed_user_info: bool,
    /// Run email discovery for users without a public profile email.
    /// Only used together with `detailed_user_info`.
    pub aggressive_email_extraction: bool,
    /// Items per page; clamped to the configured maximum.
    pub page_size: Option<u32>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_stargazers: true,
            include_forkers: true,
            max_stargazers: None,
            max_forkers: None,
            detailed_user_info: false,
            aggressive_email_extraction: true,
            page_size: None,
        }
    }
}

impl ExtractOptions {
    fn includes(&self, section: Section) -> bool {
        match section {
            Section::Stargazers => self.include_stargazers,
            Section::Forkers => self.include_forkers,
        }
    }

    fn cap(&self, section: Section) -> Option<usize> {
        match section {
            Section::Stargazers => self.max_stargazers,
            Section::Forkers => self.max_forkers,
        }
    }
}

/// Entry point for extracting a repository's audience.
#[derive(Clone)]
pub struct Extractor {
    client: GitHubClient,
}

impl Extractor {
    /// Builds an extractor over a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Config`] if the configuration is invalid and
    /// [`ExtractError::Client`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        let client = GitHubClient::new(config).map_err(ExtractError::Client)?;
        Ok(Self::from_client(client))
    }

    /// Wraps an existing client.
    pub fn from_client(client: GitHubClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Extracts repository metadata, stargazers and fork owners.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable identifier or when the repository itself
    /// cannot be fetched. Section failures are reported through
    /// [`ExtractionReport::section_errors`].
    pub async fn extract(
        &self,
        identifier: &str,
        options: &ExtractOptions,
    ) -> Result<ExtractionReport, ExtractError> {
        let repo = RepoIdentifier::parse(identifier)?;
        let span = info_span!("extract", repo = %repo);
        self.extract_repository(&repo, options).instrument(span).await
    }

    async fn extract_repository(
        &self,
        repo: &RepoIdentifier,
        options: &ExtractOptions,
    ) -> Result<ExtractionReport, ExtractError> {
        info!("Extracting repository");

        let repository = self
            .client
            .repository(&repo.owner, &repo.name)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to fetch repository"))?;
        info!(
            stars = repository.stargazers_count,
            forks = repository.forks_count,
            "Fetched repository"
        );

        let mut report = ExtractionReport::new(repository);

        for section in [Section::Stargazers, Section::Forkers] {
            if !options.includes(section) {
                continue;
            }

            match self.collect_section(repo, section, options).await {
                Ok(users) => {
                    info!(%section, count = users.len(), "Extracted section");
                    match section {
                        Section::Stargazers => report.stargazers = users,
                        Section::Forkers => report.forkers = users,
                    }
                }
                Err(e) => {
                    warn!(%section, error = %e, "Failed to extract section, leaving it empty");
                    report.record_failure(section, e);
                }
            }
        }

        Ok(report)
    }

    async fn collect_section(
        &self,
        repo: &RepoIdentifier,
        section: Section,
        options: &ExtractOptions,
    ) -> Result<Vec<UserRecord>, GitHubError> {
        let cap = options.cap(section);
        if cap == Some(0) {
            return Ok(Vec::new());
        }

        let page_size = self.client.config().page_size(options.page_size);
        let max_pages = cap.map(|max| pages_for(max, page_size));
        let endpoint = repo.endpoint(section.path());

        let mut users = match section {
            Section::Stargazers => {
                self.client
                    .paginate_users(&endpoint, page_size, max_pages)
                    .await?
            }
            Section::Forkers => {
                self.client
                    .paginate_fork_owners(&endpoint, page_size, max_pages)
                    .await?
            }
        };

        if let Some(max) = cap {
            users.truncate(max);
        }

        if options.detailed_user_info {
            self.enrich(&mut users, options.aggressive_email_extraction)
                .await;
        }

        Ok(users)
    }

    /// Replaces each record with its detailed form, in place.
    async fn enrich(&self, users: &mut [UserRecord], aggressive_email: bool) {
        for user in users.iter_mut() {
            match self.client.user_details(&user.login, aggressive_email).await {
                Ok(detailed) => *user = detailed,
                Err(e) => {
                    warn!(user = %user.login, error = %e, "Failed to fetch user details, keeping minimal record");
                }
            }
        }
    }

    /// Current API budget.
    ///
    /// # Errors
    ///
    /// Returns the underlying query error.
    pub async fn rate_limit_status(&self) -> Result<RateLimitStatus, GitHubError> {
        self.client.rate_limit_status().await
    }
}
