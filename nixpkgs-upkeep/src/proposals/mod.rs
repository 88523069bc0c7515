//! Upgrade proposal lifecycle.
//!
//! A run ends in one of two places: a new draft proposal for the upgrade, or
//! the bot's existing proposal for the same starting version advanced by one
//! commit. Either way the build outcome then decides whether the proposal is
//! marked ready for review.

mod base;
mod duplicates;
mod error;
mod readiness;
mod reconcile;
mod status;

pub use base::{select_base_proposal, BaseProposalLocator, TitleSearchLocator};
pub use duplicates::{find_duplicates, title_mentions};
pub use error::ProposalError;
pub use readiness::apply_build_outcome;
pub use reconcile::{BranchReconciler, ForkTarget, ProposalText, Reconciliation, UpgradeRequest};
pub use status::{ReconcilePath, Readiness};
