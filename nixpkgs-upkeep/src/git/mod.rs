//! Git working tree access.
//!
//! The working tree is one mutable resource for the whole run: switching
//! branches discards uncommitted state. It is therefore modelled as a
//! [`Workspace`] handle that callers pass around by `&mut`, so only one
//! operation can hold it at a time.

mod error;
mod workspace;

pub use error::GitError;
pub use workspace::{fork_remote_url, redact_url, GitWorkspace};

use async_trait::async_trait;
use bstr::ByteSlice;

/// How a cherry-pick resolves conflicting hunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Resolve every conflicting hunk in favour of the commit being applied.
    ///
    /// The incoming commit is a freshly regenerated package definition, so
    /// stale content on the destination yields. This also overrides
    /// unrelated edits that happen to touch the same region.
    PreferIncoming,
    /// Stop with an error on any conflict.
    Abort,
}

/// How much history a fetch refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Fetch the branch tip without trees (`--filter=tree:0`).
    Filtered,
    /// Same, but discard what a shallow clone already has (`--refetch`).
    ///
    /// A shallow checkout cannot be pushed to another repository.
    Refetch,
}

/// Operations the upkeep run performs on its working tree.
#[async_trait]
pub trait Workspace: Send {
    /// Returns `true` when the tree has no changes against `HEAD`.
    async fn is_clean(&mut self) -> Result<bool, GitError>;

    /// Sets the committer identity for this repository.
    async fn configure_identity(&mut self, name: &str, email: &str) -> Result<(), GitError>;

    /// Adds a remote, or repoints it if it already exists.
    async fn set_remote(&mut self, name: &str, url: &str) -> Result<(), GitError>;

    /// Fetches one branch from a remote.
    async fn fetch(&mut self, remote: &str, branch: &str, mode: FetchMode) -> Result<(), GitError>;

    /// Switches to an existing local branch.
    async fn switch(&mut self, branch: &str) -> Result<(), GitError>;

    /// Creates a branch at `HEAD` and switches to it.
    async fn create_branch(&mut self, branch: &str) -> Result<(), GitError>;

    /// Points local `branch` at `remote/branch` and switches to it.
    async fn switch_to_remote_branch(&mut self, remote: &str, branch: &str)
        -> Result<(), GitError>;

    /// Stages everything and commits it.
    async fn commit_all(&mut self, message: &str) -> Result<(), GitError>;

    /// Applies the tip commit of `rev` onto `HEAD`.
    async fn cherry_pick(&mut self, rev: &str, policy: ConflictPolicy) -> Result<(), GitError>;

    /// Replaces the message of the `HEAD` commit.
    async fn amend_message(&mut self, message: &str) -> Result<(), GitError>;

    /// Pushes `branch` to `remote` and records it as upstream.
    async fn push(&mut self, remote: &str, branch: &str) -> Result<(), GitError>;
}

/// Checks that `name` can be used as a branch name.
///
/// # Errors
///
/// Returns [`GitError::InvalidBranchName`] otherwise.
pub fn validate_branch_name(name: &str) -> Result<(), GitError> {
    gix_validate::reference::name_partial(name.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| GitError::InvalidBranchName {
            name: name.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_upgrade_branch_names() {
        assert!(validate_branch_name("hello-2.12.1").is_ok());
        assert!(validate_branch_name("python3Packages.requests-2.32.3").is_ok());
    }

    #[test]
    fn rejects_invalid_branch_names() {
        assert!(validate_branch_name("has space-1.0.0").is_err());
        assert!(validate_branch_name("double..dot").is_err());
        assert!(validate_branch_name("").is_err());
        assert!(validate_branch_name("trailing.lock").is_err());
    }
}
