//! Runner error types.

use std::path::PathBuf;

/// Errors that end a run with a failure status.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// A version string is not a semantic version.
    #[error(transparent)]
    Version(#[from] crate::version::VersionError),

    /// Hosting service call failed before reconciliation.
    #[error(transparent)]
    Host(#[from] crate::hosting::HostError),

    /// Git operation failed while preparing the commit.
    #[error(transparent)]
    Git(#[from] crate::git::GitError),

    /// Package evaluation failed.
    #[error(transparent)]
    Package(#[from] crate::package::PackageError),

    /// Reconciliation or readiness failed.
    #[error(transparent)]
    Proposal(#[from] crate::proposals::ProposalError),

    /// Summary template is invalid or failed to render.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// The default proposal template could not be read.
    #[error("Failed to read proposal template '{}': {source}", path.display())]
    TemplateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A run input is unusable.
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
}
