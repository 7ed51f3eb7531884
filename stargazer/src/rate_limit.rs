//! Rate limiting utilities for GitHub API.
//!
//! This module computes how long a caller should back off after an HTTP 429,
//! describes the current budget, and waits for a reset when a caller opts in.

mod info;

pub use info::{RateLimitInfo, RateLimitStatus};

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

/// Minimum wait reported for a rate-limited request (1 minute).
pub const MIN_RATE_LIMIT_WAIT_SECS: u64 = 60;

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Header carrying the reset time as Unix seconds.
pub const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

/// Computes the wait after a 429 from the reset header value.
///
/// A missing or unparsable reset counts as `0`; the result is never below
/// [`MIN_RATE_LIMIT_WAIT_SECS`].
#[must_use]
pub fn rate_limit_wait(reset_header: Option<&str>, now: u64) -> u64 {
    let reset = reset_header
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);
    reset.saturating_sub(now).max(MIN_RATE_LIMIT_WAIT_SECS)
}

/// Current Unix time in seconds.
pub(crate) fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Waits for rate limit reset with a specific duration.
///
/// # Arguments
///
/// * `retry_after_secs` - Seconds to wait (from a rate-limit error)
pub async fn wait_for_retry_after(retry_after_secs: u64) {
    let actual_wait = retry_after_secs.min(MAX_WAIT_SECS);
    info!(
        retry_after = retry_after_secs,
        actual_wait, "Rate limited, waiting before retry"
    );
    tokio::time::sleep(Duration::from_secs(actual_wait)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_uses_floor_when_reset_is_near() {
        let now = 1_700_000_000;
        let reset = (now + 30).to_string();
        assert_eq!(rate_limit_wait(Some(&reset), now), 60);
    }

    #[test]
    fn test_wait_uses_reset_when_far() {
        let now = 1_700_000_000;
        let reset = (now + 600).to_string();
        assert_eq!(rate_limit_wait(Some(&reset), now), 600);
    }

    #[test]
    fn test_wait_defaults_when_header_missing_or_invalid() {
        assert_eq!(rate_limit_wait(None, 1_700_000_000), 60);
        assert_eq!(rate_limit_wait(Some("soon"), 1_700_000_000), 60);
        assert_eq!(rate_limit_wait(Some("100"), 1_700_000_000), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_retry_after_caps_wait() {
        let start = tokio::time::Instant::now();
        wait_for_retry_after(10_000).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(MAX_WAIT_SECS));
        assert!(elapsed < Duration::from_secs(MAX_WAIT_SECS + 1));
    }
}
