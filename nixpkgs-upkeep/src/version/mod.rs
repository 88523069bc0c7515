//! Upgrade detection.
//!
//! An updater script can leave a diff behind without changing the version
//! (hash format churn, for example) or even propose a downgrade. Only a
//! strictly greater semantic version counts as an upgrade.

mod error;

pub use error::VersionError;

use semver::Version;
use std::cmp::Ordering;

/// Returns `true` iff `new` is strictly greater than `previous`.
///
/// Precedence follows semver: build metadata is ignored, pre-releases sort
/// before their release.
///
/// # Errors
///
/// Returns [`VersionError::Malformed`] if either string is not a semantic
/// version. Callers treat this as fatal.
pub fn is_upgrade(previous: &str, new: &str) -> Result<bool, VersionError> {
    let previous = parse(previous)?;
    let new = parse(new)?;
    Ok(new.cmp_precedence(&previous) == Ordering::Greater)
}

fn parse(value: &str) -> Result<Version, VersionError> {
    Version::parse(value.trim()).map_err(|source| VersionError::Malformed {
        value: value.to_string(),
        source,
    })
}
