//! Proposal reconciliation error types.

use crate::git::GitError;
use crate::hosting::HostError;
use crate::package::PackageError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that abort reconciliation or the readiness transition.
///
/// None of them are retried; whatever was pushed or posted before the
/// failure stays in place.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// Hosting service call failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// Git operation failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// Package evaluation failed.
    #[error(transparent)]
    Package(#[from] PackageError),

    /// Report rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
