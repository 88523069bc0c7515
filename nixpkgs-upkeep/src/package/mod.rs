//! Package definition access: version, changelog and build.

mod error;
mod nix;

pub use error::PackageError;
pub use nix::{validate_attr_path, NixPackageSet, MISSING_CHANGELOG};

use async_trait::async_trait;
use serde::Serialize;

/// Result of one build attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
    /// Whether the build tool exited successfully.
    pub succeeded: bool,
    /// Combined build output.
    pub log: String,
    /// Command line shown in reports, e.g. `nix-build -A hello`.
    pub command: String,
}

impl BuildOutcome {
    /// Program name of the build command.
    #[must_use]
    pub fn tool(&self) -> &str {
        self.command.split_whitespace().next().unwrap_or_default()
    }
}

/// A package set evaluated from the current working tree.
///
/// Results depend on which branch is checked out, so callers evaluate after
/// switching.
#[async_trait]
pub trait PackageSet: Send + Sync {
    /// Version of `package` in the checked-out tree.
    async fn version(&self, package: &str) -> Result<String, PackageError>;

    /// Changelog reference of `package`, usually a URL.
    async fn changelog(&self, package: &str) -> Result<String, PackageError>;

    /// Builds `package`. A failed build is an outcome, not an error.
    async fn build(&self, package: &str) -> Result<BuildOutcome, PackageError>;
}
