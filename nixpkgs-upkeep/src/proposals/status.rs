//! Reconciliation and readiness status types.

use crate::hosting::Proposal;
use serde::Serialize;

/// Which way the reconciler landed the upgrade commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum ReconcilePath {
    /// A new branch was pushed and a new draft proposal opened.
    Created {
        /// Pushed branch.
        head_branch: String,
    },

    /// The commit was transplanted onto an existing proposal's branch.
    Transplanted {
        /// Existing head branch, advanced by one commit.
        head_branch: String,
        /// Version found at the branch tip before the transplant.
        base_version: String,
    },
}

impl ReconcilePath {
    /// Returns the path as a string for reporting.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Transplanted { .. } => "updated",
        }
    }

    /// Branch the proposal's head now points at.
    #[must_use]
    pub fn head_branch(&self) -> &str {
        match self {
            Self::Created { head_branch } | Self::Transplanted { head_branch, .. } => head_branch,
        }
    }
}

/// Readiness state of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    /// Not yet reviewable.
    Draft,
    /// Ready for review.
    ReadyForReview,
}

impl Readiness {
    /// Current readiness of a proposal.
    #[must_use]
    pub fn of(proposal: &Proposal) -> Self {
        if proposal.is_draft {
            Self::Draft
        } else {
            Self::ReadyForReview
        }
    }

    /// Returns the state as a string for reporting.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::ReadyForReview => "ready for review",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_reconcile_path_to_string() {
        let created = ReconcilePath::Created {
            head_branch: "pkg-1.1.0".to_string(),
        };
        let transplanted = ReconcilePath::Transplanted {
            head_branch: "pkg-1.1.0".to_string(),
            base_version: "1.1.0".to_string(),
        };

        assert_eq!(created.as_str(), "created");
        assert_eq!(transplanted.as_str(), "updated");
        assert_eq!(transplanted.head_branch(), "pkg-1.1.0");
    }

    #[test]
    fn readiness_follows_draft_flag() {
        let mut proposal = Proposal {
            number: 7,
            node_id: "PR_7".to_string(),
            title: "pkg: 1.0.0 -> 1.1.0".to_string(),
            body: String::new(),
            head_ref: "pkg-1.1.0".to_string(),
            base_ref: "master".to_string(),
            html_url: String::new(),
            is_draft: true,
        };
        assert_eq!(Readiness::of(&proposal), Readiness::Draft);

        proposal.is_draft = false;
        assert_eq!(Readiness::of(&proposal), Readiness::ReadyForReview);
        assert_eq!(Readiness::ReadyForReview.as_str(), "ready for review");
    }
}
