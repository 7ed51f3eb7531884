//! Extraction report.

use super::{RepositoryRecord, UserRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The user lists an extraction can collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Stargazers,
    Forkers,
}

impl Section {
    /// API path segment under `/repos/{owner}/{repo}/`.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Section::Stargazers => "stargazers",
            Section::Forkers => "forks",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Stargazers => f.write_str("stargazers"),
            Section::Forkers => f.write_str("forkers"),
        }
    }
}

/// A section that could not be fetched and was left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionError {
    pub section: Section,
    pub error: String,
}

/// Result of one extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub repository: RepositoryRecord,

    /// Stargazers in API delivery order.
    pub stargazers: Vec<UserRecord>,

    /// Fork owners in API delivery order.
    pub forkers: Vec<UserRecord>,

    /// Star count reported by the repository, not the number fetched.
    pub total_stargazers: u64,

    /// Fork count reported by the repository, not the number fetched.
    pub total_forkers: u64,

    pub extracted_at: DateTime<Utc>,

    /// Sections that failed and were left empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub section_errors: Vec<SectionError>,
}

impl ExtractionReport {
    /// Creates a report with empty sections and the repository's own totals.
    #[must_use]
    pub fn new(repository: RepositoryRecord) -> Self {
        Self {
            total_stargazers: repository.stargazers_count,
            total_forkers: repository.forks_count,
            repository,
            stargazers: Vec::new(),
            forkers: Vec::new(),
            extracted_at: Utc::now(),
            section_errors: Vec::new(),
        }
    }

    /// Returns true if any section was degraded.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.section_errors.is_empty()
    }

    /// Records a failed section.
    pub fn record_failure(&mut self, section: Section, error: impl fmt::Display) {
        self.section_errors.push(SectionError {
            section,
            error: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> RepositoryRecord {
        RepositoryRecord {
            name: "Hello-World".to_string(),
            full_name: "octocat/Hello-World".to_string(),
            owner: "octocat".to_string(),
            description: None,
            html_url: "https://github.com/octocat/Hello-World".to_string(),
            stargazers_count: 1500,
            forks_count: 40,
            language: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn new_report_takes_totals_from_repository() {
        let report = ExtractionReport::new(repository());
        assert_eq!(report.total_stargazers, 1500);
        assert_eq!(report.total_forkers, 40);
        assert!(report.stargazers.is_empty());
        assert!(!report.has_failures());
    }

    #[test]
    fn section_errors_are_omitted_from_json_when_empty() {
        let mut report = ExtractionReport::new(repository());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("section_errors").is_none());

        report.record_failure(Section::Forkers, "Access forbidden: /repos/octocat/Hello-World/forks");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["section_errors"][0]["section"], "forkers");
        assert!(report.has_failures());
    }
}
