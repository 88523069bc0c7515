//! Rate limiting utilities for GitHub API.
//!
//! Before each call the relevant bucket is checked, and the run sleeps until
//! reset when it is nearly exhausted. Failed calls are never retried here.

mod info;

pub use info::{RateLimitInfo, RateLimitResource};

use octocrab::Octocrab;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Fetches the current rate limit for one bucket.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_rate_limit(
    octocrab: &Octocrab,
    resource: RateLimitResource,
) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let rate = match resource {
        RateLimitResource::Search => &rate_limit.resources.search,
        RateLimitResource::Core => &rate_limit.resources.core,
    };

    Ok(RateLimitInfo {
        resource,
        remaining: rate.remaining as u32,
        reset: rate.reset,
        limit: rate.limit as u32,
    })
}

/// How long to sleep before the next request, if at all.
///
/// `now` is a Unix timestamp in seconds.
#[must_use]
pub fn wait_duration(info: &RateLimitInfo, now: u64) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD || info.reset <= now {
        return None;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            resource = info.resource.as_str(),
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = wait_duration(info, now) else {
        return false;
    };

    info!(
        resource = info.resource.as_str(),
        remaining = info.remaining,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(wait).await;
    true
}

/// Ensures sufficient rate limit before making a call against `resource`.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_rate_limit(
    octocrab: &Octocrab,
    resource: RateLimitResource,
) -> Result<(), octocrab::Error> {
    let info = check_rate_limit(octocrab, resource).await?;
    wait_if_needed(&info).await;
    Ok(())
}
