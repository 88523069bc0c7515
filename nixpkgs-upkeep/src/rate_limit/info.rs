//! Rate limit snapshot for one API bucket.

/// GitHub API bucket a request is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResource {
    /// Issue and pull request search.
    Search,
    /// REST calls on pulls, issues and comments.
    Core,
}

impl RateLimitResource {
    /// Name used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Core => "core",
        }
    }
}

/// Rate limit information for a specific resource.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Bucket this snapshot describes.
    pub resource: RateLimitResource,

    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}
