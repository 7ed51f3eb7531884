//! Rate limit information.

use octocrab::models::{Rate, RateLimit};
use serde::Serialize;

/// Rate limit information for a specific resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

/// Snapshot of `/rate_limit`.
///
/// Every endpoint this crate calls draws from the REST `core` budget, so
/// the other resources GitHub reports are not carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitStatus {
    pub core: RateLimitInfo,
}

impl From<&Rate> for RateLimitInfo {
    fn from(rate: &Rate) -> Self {
        Self {
            remaining: u32::try_from(rate.remaining).unwrap_or(u32::MAX),
            reset: rate.reset,
            limit: u32::try_from(rate.limit).unwrap_or(u32::MAX),
        }
    }
}

impl From<&RateLimit> for RateLimitStatus {
    fn from(rate_limit: &RateLimit) -> Self {
        Self {
            core: RateLimitInfo::from(&rate_limit.resources.core),
        }
    }
}
