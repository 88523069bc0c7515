//! Hosting service error types.

use thiserror::Error;

/// Errors that can occur while talking to the hosting service.
#[derive(Debug, Error)]
pub enum HostError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// GraphQL request returned errors.
    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    /// A field needed by the caller was absent from a response.
    #[error("Pull request #{number} is missing {field}")]
    MissingField { number: u64, field: &'static str },

    /// Proposal does not exist.
    #[error("Pull request #{number} not found")]
    NotFound { number: u64 },
}
