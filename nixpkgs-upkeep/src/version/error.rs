//! Version comparison error types.

use thiserror::Error;

/// Errors that can occur while comparing versions.
#[derive(Debug, Error)]
pub enum VersionError {
    /// A version string is not valid semver.
    #[error("'{value}' is not a semantic version: {source}")]
    Malformed {
        value: String,
        #[source]
        source: semver::Error,
    },
}
