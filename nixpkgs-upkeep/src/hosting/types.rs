//! Proposal data exchanged with the hosting service.

use serde::{Deserialize, Serialize};

/// A search hit for an open proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRef {
    /// Proposal number.
    pub number: u64,
    /// Proposal title.
    pub title: String,
    /// Web URL.
    pub html_url: String,
    /// Login of the author.
    pub author: String,
}

/// A proposal with everything the reconciler and readiness gate need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Proposal number, stable for the proposal's lifetime.
    pub number: u64,
    /// GraphQL node id, used for the ready-for-review mutation.
    pub node_id: String,
    /// Proposal title.
    pub title: String,
    /// Description. Empty when the proposal has none.
    pub body: String,
    /// Head branch name (on the fork).
    pub head_ref: String,
    /// Base branch name.
    pub base_ref: String,
    /// Web URL.
    pub html_url: String,
    /// Whether the proposal is still a draft.
    pub is_draft: bool,
}

/// Search parameters for open proposals on the target repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalQuery {
    /// Words that must appear in the title.
    pub title_terms: Vec<String>,
    /// Restrict to proposals opened by this login.
    pub author: Option<String>,
}

impl ProposalQuery {
    /// Query matching titles containing every term, by any author.
    #[must_use]
    pub fn title(terms: &[&str]) -> Self {
        Self {
            title_terms: terms.iter().map(|t| (*t).to_string()).collect(),
            author: None,
        }
    }

    /// Restricts the query to one author.
    #[must_use]
    pub fn by(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }
}

/// Parameters for opening a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProposal {
    /// Branch to merge into.
    pub base: String,
    /// Head in `owner:branch` form.
    pub head: String,
    /// Title.
    pub title: String,
    /// Description.
    pub body: String,
    /// Open as draft.
    pub draft: bool,
}

/// Fields rewritten on an existing proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalUpdate {
    /// New title.
    pub title: String,
    /// New description.
    pub body: String,
}
