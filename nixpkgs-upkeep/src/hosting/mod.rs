//! Hosting service access for upgrade proposals.
//!
//! The reconciler and readiness gate only see [`ProposalHost`], so they run
//! the same against GitHub and against test doubles.

mod error;
mod github;
mod types;

pub use error::HostError;
pub use github::GitHubHost;
pub use types::{NewProposal, Proposal, ProposalQuery, ProposalRef, ProposalUpdate};

use async_trait::async_trait;

/// Proposal operations on the target repository.
#[async_trait]
pub trait ProposalHost: Send + Sync {
    /// Searches open proposals on the target repository.
    async fn search_open_proposals(
        &self,
        query: &ProposalQuery,
    ) -> Result<Vec<ProposalRef>, HostError>;

    /// Fetches a proposal by number.
    async fn get_proposal(&self, number: u64) -> Result<Proposal, HostError>;

    /// Opens a new proposal.
    async fn create_proposal(&self, proposal: &NewProposal) -> Result<Proposal, HostError>;

    /// Rewrites the title and body of an existing proposal.
    async fn update_proposal(
        &self,
        number: u64,
        update: &ProposalUpdate,
    ) -> Result<Proposal, HostError>;

    /// Posts a comment on a proposal.
    async fn create_comment(&self, number: u64, body: &str) -> Result<(), HostError>;

    /// Moves a proposal out of draft.
    ///
    /// Must succeed without effect when the proposal is already ready.
    async fn mark_ready_for_review(&self, proposal: &Proposal) -> Result<(), HostError>;
}
