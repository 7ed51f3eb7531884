#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod email;
pub mod extractor;
pub mod github;
pub mod http;
pub mod models;
pub mod pagination;
pub mod rate_limit;

pub use config::{ClientConfig, ConfigError};
pub use email::{is_acceptable_email, EmailStrategy};
pub use extractor::{ExtractError, ExtractOptions, Extractor, RepoIdentifier};
pub use github::{GitHubClient, GitHubError};
pub use http::{HttpError, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use models::{ExtractionReport, RepositoryRecord, Section, SectionError, UserDetails, UserRecord};
pub use pagination::pages_for;
pub use rate_limit::{rate_limit_wait, wait_for_retry_after, RateLimitInfo, RateLimitStatus};
