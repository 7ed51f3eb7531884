//! Client configuration.
//!
//! [`ClientConfig`] is an immutable value handed to the GitHub client at
//! construction. It can be built from defaults, from the environment, or from
//! an optional `stargazer.toml` file with environment overrides on top.

mod error;
mod file;

pub use error::ConfigError;

use file::ConfigFile;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the API root.
pub const API_BASE_URL_ENV: &str = "GITHUB_API_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_MAX_RETRIES: usize = 3;
pub const DEFAULT_PER_PAGE: u32 = 30;

/// GitHub refuses page sizes above this.
pub const MAX_PER_PAGE: u32 = 100;

const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Settings for talking to the GitHub REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root the endpoints are appended to.
    api_base_url: String,
    /// Optional token sent as `Authorization: token <value>`.
    token: Option<String>,
    /// Retries for transient statuses and connection failures.
    max_retries: usize,
    /// First backoff delay; doubles on each retry.
    backoff: Duration,
    /// Page size used when the caller does not choose one.
    default_per_page: u32,
    /// Upper bound for any requested page size.
    max_per_page: u32,
    /// Per-request timeout.
    request_timeout: Duration,
    /// Courtesy pause after every successful request.
    request_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: DEFAULT_BACKOFF,
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from defaults plus environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if an override is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, then applies environment overrides.
    ///
    /// The environment takes precedence over the file. A missing file is not
    /// an error and yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if the
    /// resulting configuration fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if path.exists() {
            debug!(path = %path.display(), "Loading config file");
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
                path: path.display().to_string(),
                source,
            })?;
            let parsed: ConfigFile =
                toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
                    path: path.display().to_string(),
                    source,
                })?;
            config = config.with_file(parsed)?;
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
        }

        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn with_file(mut self, file: ConfigFile) -> Result<Self, ConfigError> {
        if let Some(url) = file.api_base_url {
            self.api_base_url = url;
        }
        if file.token.is_some() {
            self.token = file.token;
        }
        if let Some(retries) = file.max_retries {
            self.max_retries = retries;
        }
        if let Some(secs) = file.backoff_secs {
            self.backoff =
                Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::ValidationError {
                    field: "backoff-secs".to_string(),
                    message: e.to_string(),
                })?;
        }
        if let Some(per_page) = file.default_per_page {
            self.default_per_page = per_page;
        }
        if let Some(max) = file.max_per_page {
            self.max_per_page = max;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = file.request_delay_ms {
            self.request_delay = Duration::from_millis(ms);
        }
        Ok(self)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            self.token = Some(token);
        }
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            self.api_base_url = url;
        }
        self
    }

    /// Checks that the configuration can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(ConfigError::ValidationError {
                    field: "api-base-url".to_string(),
                    message: format!("not an http(s) URL: {}", self.api_base_url),
                });
            }
        }

        if self.max_per_page == 0 || self.max_per_page > MAX_PER_PAGE {
            return Err(ConfigError::ValidationError {
                field: "max-per-page".to_string(),
                message: format!("must be between 1 and {MAX_PER_PAGE}"),
            });
        }

        if self.default_per_page == 0 || self.default_per_page > self.max_per_page {
            return Err(ConfigError::ValidationError {
                field: "default-per-page".to_string(),
                message: format!("must be between 1 and {}", self.max_per_page),
            });
        }

        Ok(())
    }

    /// Sets the API root.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Sets the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the retry ceiling for transient failures.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the first backoff delay.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets the default and maximum page sizes.
    pub fn with_page_sizes(mut self, default_per_page: u32, max_per_page: u32) -> Self {
        self.default_per_page = default_per_page;
        self.max_per_page = max_per_page;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the pause inserted after each successful request.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Returns the API root.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns the configured token, ignoring blank values.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Returns true if a non-blank token is configured.
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    pub fn default_per_page(&self) -> u32 {
        self.default_per_page
    }

    pub fn max_per_page(&self) -> u32 {
        self.max_per_page
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Clamps a requested page size into `1..=max_per_page`, falling back
    /// to the default when none is given.
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_per_page)
            .clamp(1, self.max_per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("stargazer.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_match_github_conventions() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url(), "https://api.github.com");
        assert_eq!(config.max_retries(), 3);
        assert_eq!(config.default_per_page(), 30);
        assert_eq!(config.max_per_page(), 100);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.request_delay(), Duration::from_millis(100));
        assert!(!config.has_token());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_token_is_treated_as_absent() {
        let config = ClientConfig::new().with_token("   ");
        assert!(!config.has_token());
        assert_eq!(config.token(), None);

        let config = ClientConfig::new().with_token("ghp_abc");
        assert_eq!(config.token(), Some("ghp_abc"));
    }

    #[test]
    fn page_size_is_clamped() {
        let config = ClientConfig::default();
        assert_eq!(config.page_size(None), 30);
        assert_eq!(config.page_size(Some(0)), 1);
        assert_eq!(config.page_size(Some(500)), 100);
        assert_eq!(config.page_size(Some(50)), 50);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        temp_env::with_vars_unset([TOKEN_ENV, API_BASE_URL_ENV], || {
            let temp = TempDir::new().unwrap();
            let config = ClientConfig::load(&temp.path().join("absent.toml")).unwrap();
            assert_eq!(config, ClientConfig::default());
        });
    }

    #[test]
    fn load_reads_file_values() {
        temp_env::with_vars_unset([TOKEN_ENV, API_BASE_URL_ENV], || {
            let temp = TempDir::new().unwrap();
            let path = write_config(
                &temp,
                r#"
api-base-url = "https://ghe.example.com/api/v3"
token = "from-file"
max-retries = 5
backoff-secs = 0.5
default-per-page = 50
request-timeout-secs = 10
request-delay-ms = 0
"#,
            );
            let config = ClientConfig::load(&path).unwrap();
            assert_eq!(config.api_base_url(), "https://ghe.example.com/api/v3");
            assert_eq!(config.token(), Some("from-file"));
            assert_eq!(config.max_retries(), 5);
            assert_eq!(config.backoff(), Duration::from_millis(500));
            assert_eq!(config.default_per_page(), 50);
            assert_eq!(config.request_timeout(), Duration::from_secs(10));
            assert_eq!(config.request_delay(), Duration::ZERO);
        });
    }

    #[test]
    fn env_overrides_file() {
        temp_env::with_vars(
            [
                (TOKEN_ENV, Some("from-env")),
                (API_BASE_URL_ENV, None::<&str>),
            ],
            || {
                let temp = TempDir::new().unwrap();
                let path = write_config(&temp, "token = \"from-file\"\n");
                let config = ClientConfig::load(&path).unwrap();
                assert_eq!(config.token(), Some("from-env"));
            },
        );
    }

    #[test]
    fn from_env_reads_token_and_base_url() {
        temp_env::with_vars(
            [
                (TOKEN_ENV, Some("env-token")),
                (API_BASE_URL_ENV, Some("http://localhost:8080")),
            ],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(config.token(), Some("env-token"));
                assert_eq!(config.api_base_url(), "http://localhost:8080");
            },
        );
    }

    #[test]
    fn load_reports_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "max-retries = [");
        let error = ClientConfig::load(&path).unwrap_err();
        assert!(matches!(error, ConfigError::TomlError { .. }));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "retries = 3\n");
        let error = ClientConfig::load(&path).unwrap_err();
        assert!(matches!(error, ConfigError::TomlError { .. }));
    }

    #[test]
    fn load_rejects_negative_backoff() {
        temp_env::with_vars_unset([TOKEN_ENV, API_BASE_URL_ENV], || {
            let temp = TempDir::new().unwrap();
            let path = write_config(&temp, "backoff-secs = -1.0\n");
            let error = ClientConfig::load(&path).unwrap_err();
            assert!(
                matches!(error, ConfigError::ValidationError { ref field, .. } if field == "backoff-secs")
            );
        });
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_url = ClientConfig::new().with_api_base_url("ftp://example.com");
        assert!(matches!(
            bad_url.validate(),
            Err(ConfigError::ValidationError { ref field, .. }) if field == "api-base-url"
        ));

        let too_large = ClientConfig::new().with_page_sizes(30, 101);
        assert!(matches!(
            too_large.validate(),
            Err(ConfigError::ValidationError { ref field, .. }) if field == "max-per-page"
        ));

        let default_over_max = ClientConfig::new().with_page_sizes(60, 50);
        assert!(matches!(
            default_over_max.validate(),
            Err(ConfigError::ValidationError { ref field, .. }) if field == "default-per-page"
        ));
    }
}
