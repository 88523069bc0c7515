//! Reporting a build outcome on a proposal.

use super::{ProposalError, Readiness};
use crate::hosting::{Proposal, ProposalHost};
use crate::package::BuildOutcome;
use crate::templates::TemplateRenderer;
use tracing::{info, info_span, warn, Instrument};

/// Posts the build report on `proposal` and marks it ready if the build passed.
///
/// Exactly one comment is posted per call. A failed build leaves the draft
/// state as it was.
///
/// # Errors
///
/// Returns [`ProposalError`] if the report cannot be rendered or posted, or
/// if marking the proposal ready fails.
pub async fn apply_build_outcome<H: ProposalHost>(
    host: &H,
    renderer: &TemplateRenderer,
    proposal: &Proposal,
    outcome: &BuildOutcome,
) -> Result<Readiness, ProposalError> {
    let span = info_span!("apply_build_outcome", pr_number = proposal.number);

    async {
        let report = renderer.render_build_report(outcome)?;
        host.create_comment(proposal.number, &report).await?;

        if !outcome.succeeded {
            warn!(command = %outcome.command, "Build failed, proposal stays as it is");
            return Ok(Readiness::of(proposal));
        }

        host.mark_ready_for_review(proposal).await?;
        info!("Build succeeded, proposal ready for review");
        Ok(Readiness::ReadyForReview)
    }
    .instrument(span)
    .await
}
