//! Config file deserialization.

use serde::Deserialize;

/// Parsed contents of a `stargazer.toml` file.
///
/// Every key is optional; absent keys keep the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct ConfigFile {
    /// API root, e.g. `https://api.github.com` or a GitHub Enterprise `/api/v3` URL.
    pub api_base_url: Option<String>,

    /// Personal access token.
    pub token: Option<String>,

    pub max_retries: Option<usize>,

    /// Base delay for exponential backoff, in seconds.
    pub backoff_secs: Option<f64>,

    pub default_per_page: Option<u32>,

    pub max_per_page: Option<u32>,

    pub request_timeout_secs: Option<u64>,

    /// Pause after each successful request, in milliseconds.
    pub request_delay_ms: Option<u64>,
}
