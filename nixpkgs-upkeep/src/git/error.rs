//! Git error types.

use thiserror::Error;

/// Errors that can occur during git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be started.
    #[error("Failed to execute git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Git exited with a failure status.
    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// A branch name is not a valid git ref name.
    #[error("Invalid branch name '{name}': {message}")]
    InvalidBranchName { name: String, message: String },

    /// A remote URL could not be built.
    #[error("Invalid remote URL: {message}")]
    InvalidRemoteUrl { message: String },
}
