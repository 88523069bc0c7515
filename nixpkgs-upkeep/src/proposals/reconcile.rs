//! Landing an upgrade commit on the right remote branch.
//!
//! The run has already committed the upgrade on a disposable local branch
//! `{package}-{new_version}`. From there:
//!
//! - No open bot proposal starts at `previous_version`: push the disposable
//!   branch and open a draft proposal for it.
//! - One does: transplant the commit onto that proposal's head branch, fix up
//!   the commit message to the version actually found there, push, and
//!   rewrite the proposal's title and summary. The proposal keeps its number
//!   and its template block.

use super::base::BaseProposalLocator;
use super::{ProposalError, ReconcilePath};
use crate::git::{ConflictPolicy, FetchMode, Workspace};
use crate::hosting::{NewProposal, Proposal, ProposalHost, ProposalRef, ProposalUpdate};
use crate::package::PackageSet;
use crate::templates::{
    extract_template, generate_branch_name, generate_commit_message, generate_pr_title, make_body,
};
use tracing::{debug, info, info_span, Instrument};

/// The upgrade being proposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    /// Package attribute path.
    pub package: String,
    /// Version recorded before the update.
    pub previous_version: String,
    /// Version after the update.
    pub new_version: String,
    /// Changelog reference, shown verbatim.
    pub changelog: String,
    /// Local branch holding the single upgrade commit.
    pub local_branch: String,
}

impl UpgradeRequest {
    /// Describes an upgrade committed on `{package}-{new_version}`.
    pub fn new(
        package: impl Into<String>,
        previous_version: impl Into<String>,
        new_version: impl Into<String>,
        changelog: impl Into<String>,
    ) -> Self {
        let package = package.into();
        let new_version = new_version.into();
        let local_branch = generate_branch_name(&package, &new_version);
        Self {
            package,
            previous_version: previous_version.into(),
            new_version,
            changelog: changelog.into(),
            local_branch,
        }
    }

    /// Title for the proposal, always relative to `previous_version`.
    #[must_use]
    pub fn title(&self) -> String {
        generate_pr_title(&self.package, &self.previous_version, &self.new_version)
    }
}

/// Where proposals are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkTarget {
    /// Remote name of the bot's fork in the working tree.
    pub remote: String,
    /// Login owning the fork.
    pub owner: String,
    /// Branch proposals merge into.
    pub target_branch: String,
}

/// Text placed in a proposal body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalText {
    /// Generated summary above the marker.
    pub summary: String,
    /// Template block for proposals that have none yet.
    pub default_template: String,
}

/// A proposal after reconciliation.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The proposal now carrying the upgrade.
    pub proposal: Proposal,
    /// How it got there.
    pub path: ReconcilePath,
}

/// Decides between opening a new proposal and amending the bot's existing one.
pub struct BranchReconciler<'a, H, L, P> {
    host: &'a H,
    locator: &'a L,
    packages: &'a P,
    fork: ForkTarget,
}

impl<'a, H, L, P> BranchReconciler<'a, H, L, P>
where
    H: ProposalHost,
    L: BaseProposalLocator,
    P: PackageSet,
{
    /// Creates a reconciler publishing to `fork`.
    pub fn new(host: &'a H, locator: &'a L, packages: &'a P, fork: ForkTarget) -> Self {
        Self {
            host,
            locator,
            packages,
            fork,
        }
    }

    /// Lands the upgrade commit and returns the proposal carrying it.
    ///
    /// `workspace` must be on a clean tree with the upgrade committed on
    /// `request.local_branch`. It is left on whichever branch was pushed.
    ///
    /// # Errors
    ///
    /// Any failing git, hosting or evaluation step aborts with
    /// [`ProposalError`]. Nothing already pushed is rolled back. On the
    /// transplant path the proposal is only updated after the push succeeded.
    pub async fn reconcile<W: Workspace + ?Sized>(
        &self,
        workspace: &mut W,
        request: &UpgradeRequest,
        text: &ProposalText,
    ) -> Result<Reconciliation, ProposalError> {
        let span = info_span!(
            "reconcile",
            package = %request.package,
            previous_version = %request.previous_version,
            new_version = %request.new_version
        );

        async {
            let base = self
                .locator
                .find_base_proposal(&request.package, &request.previous_version)
                .await?;

            match base {
                Some(base) => self.transplant(workspace, request, text, &base).await,
                None => self.publish_fresh(workspace, request, text).await,
            }
        }
        .instrument(span)
        .await
    }

    async fn publish_fresh<W: Workspace + ?Sized>(
        &self,
        workspace: &mut W,
        request: &UpgradeRequest,
        text: &ProposalText,
    ) -> Result<Reconciliation, ProposalError> {
        info!(branch = %request.local_branch, "Pushing new proposal branch");
        workspace
            .push(&self.fork.remote, &request.local_branch)
            .await?;

        info!(base = %self.fork.target_branch, "Creating draft proposal");
        let proposal = self
            .host
            .create_proposal(&NewProposal {
                base: self.fork.target_branch.clone(),
                head: format!("{}:{}", self.fork.owner, request.local_branch),
                title: request.title(),
                body: make_body(&text.summary, &text.default_template),
                draft: true,
            })
            .await?;

        info!(pr_number = proposal.number, url = %proposal.html_url, "Created proposal");
        Ok(Reconciliation {
            proposal,
            path: ReconcilePath::Created {
                head_branch: request.local_branch.clone(),
            },
        })
    }

    async fn transplant<W: Workspace + ?Sized>(
        &self,
        workspace: &mut W,
        request: &UpgradeRequest,
        text: &ProposalText,
        base: &ProposalRef,
    ) -> Result<Reconciliation, ProposalError> {
        info!(pr_number = base.number, "Updating existing proposal branch");
        let existing = self.host.get_proposal(base.number).await?;
        let head = existing.head_ref.clone();

        workspace
            .fetch(&self.fork.remote, &head, FetchMode::Filtered)
            .await?;
        workspace
            .switch_to_remote_branch(&self.fork.remote, &head)
            .await?;

        // The head may already be past the version its title names.
        let base_version = self.packages.version(&request.package).await?;
        debug!(head = %head, base_version = %base_version, "Evaluated proposal head");

        workspace
            .cherry_pick(&request.local_branch, ConflictPolicy::PreferIncoming)
            .await?;
        workspace
            .amend_message(&generate_commit_message(
                &request.package,
                &base_version,
                &request.new_version,
                &request.changelog,
            ))
            .await?;
        workspace.push(&self.fork.remote, &head).await?;

        let template = extract_template(&existing.body).unwrap_or(&text.default_template);

        let proposal = self
            .host
            .update_proposal(
                existing.number,
                &ProposalUpdate {
                    title: request.title(),
                    body: make_body(&text.summary, template),
                },
            )
            .await?;

        info!(pr_number = proposal.number, url = %proposal.html_url, "Updated proposal");
        Ok(Reconciliation {
            proposal,
            path: ReconcilePath::Transplanted {
                head_branch: head,
                base_version,
            },
        })
    }
}
