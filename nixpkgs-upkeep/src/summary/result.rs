//! Outcome of a single upkeep run.

use crate::proposals::{Readiness, ReconcilePath};
use serde::Serialize;

/// How a run ended.
///
/// Every variant except [`RunOutcome::Proposed`] means nothing outside the
/// working tree was changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The working tree has no diff against `HEAD`.
    NoChanges,

    /// The evaluated version is not newer than the recorded one.
    NotAnUpgrade {
        /// Version recorded before the update.
        previous_version: String,
        /// Version found after the update.
        new_version: String,
    },

    /// Open proposals already cover this upgrade.
    DuplicateFound {
        /// Version the duplicates upgrade to.
        new_version: String,
        /// Web URLs of the matching proposals.
        urls: Vec<String>,
    },

    /// Dry run stopped before touching git or the hosting service.
    DryRun {
        /// Version that would be proposed.
        new_version: String,
        /// Existing proposal that would be amended, if any.
        would_update: Option<u64>,
    },

    /// A proposal now carries the upgrade.
    Proposed {
        /// Proposal number.
        number: u64,
        /// Web URL.
        url: String,
        /// Whether the proposal was created or amended.
        path: ReconcilePath,
        /// Readiness after the build.
        readiness: Readiness,
    },
}

impl RunOutcome {
    /// Returns the outcome as a string for reporting.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoChanges => "no changes",
            Self::NotAnUpgrade { .. } => "not an upgrade",
            Self::DuplicateFound { .. } => "duplicate found",
            Self::DryRun { .. } => "dry run",
            Self::Proposed { .. } => "proposed",
        }
    }

    /// Returns `true` if the run changed nothing outside the working tree.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !matches!(self, Self::Proposed { .. })
    }

    /// Number of the proposal created or amended by this run.
    #[must_use]
    pub fn proposal_number(&self) -> Option<u64> {
        match self {
            Self::Proposed { number, .. } => Some(*number),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_proposed_mutates() {
        let proposed = RunOutcome::Proposed {
            number: 42,
            url: "https://github.com/NixOS/nixpkgs/pull/42".to_string(),
            path: ReconcilePath::Created {
                head_branch: "pkg-1.1.0".to_string(),
            },
            readiness: Readiness::Draft,
        };

        assert!(RunOutcome::NoChanges.is_noop());
        assert!(RunOutcome::DuplicateFound {
            new_version: "1.1.0".to_string(),
            urls: Vec::new(),
        }
        .is_noop());
        assert!(!proposed.is_noop());
        assert_eq!(proposed.proposal_number(), Some(42));
        assert_eq!(proposed.as_str(), "proposed");
    }

    #[test]
    fn serializes_with_outcome_tag() {
        let outcome = RunOutcome::NotAnUpgrade {
            previous_version: "1.1.0".to_string(),
            new_version: "1.0.0".to_string(),
        };
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["outcome"], "not_an_upgrade");
        assert_eq!(value["new_version"], "1.0.0");
    }
}
