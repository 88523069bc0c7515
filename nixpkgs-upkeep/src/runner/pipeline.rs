//! The upkeep pipeline, generic over its collaborators.

use super::{RunnerConfig, RunnerError};
use crate::git::{fork_remote_url, validate_branch_name, FetchMode, Workspace};
use crate::hosting::ProposalHost;
use crate::package::{validate_attr_path, PackageSet};
use crate::proposals::{
    apply_build_outcome, find_duplicates, BaseProposalLocator, BranchReconciler, ForkTarget,
    ProposalText, TitleSearchLocator, UpgradeRequest,
};
use crate::summary::RunOutcome;
use crate::templates::{generate_commit_message, SummaryContext, TemplateRenderer};
use crate::version::is_upgrade;
use tracing::{info, info_span, warn, Instrument};

/// Runs one upkeep pass over an updated working tree.
///
/// Stages, in order: change detection, package evaluation, upgrade check,
/// duplicate search, commit preparation, reconciliation, build, readiness.
/// The first three checks and dry runs return early without mutating
/// anything outside the working tree.
///
/// # Errors
///
/// Returns [`RunnerError`] for invalid input and for any failed git, nix or
/// hosting call. Nothing is retried or rolled back.
pub async fn run_pipeline<H, W, P>(
    config: &RunnerConfig,
    host: &H,
    workspace: &mut W,
    packages: &P,
) -> Result<RunOutcome, RunnerError>
where
    H: ProposalHost,
    W: Workspace + ?Sized,
    P: PackageSet,
{
    let span = info_span!("upkeep", package = %config.package());

    async {
        let settings = config.settings();
        let package = config.package();
        validate_attr_path(package)?;

        let renderer = match &settings.summary_template {
            Some(template) => TemplateRenderer::with_summary_template(template)?,
            None => TemplateRenderer::new()?,
        };

        if workspace.is_clean().await? {
            info!("No changes in working tree");
            return Ok(RunOutcome::NoChanges);
        }

        let new_version = packages.version(package).await?;
        let changelog = packages.changelog(package).await?;
        info!(
            previous_version = %config.previous_version(),
            new_version = %new_version,
            "Evaluated package"
        );

        if !is_upgrade(config.previous_version(), &new_version)? {
            info!(new_version = %new_version, "Not an upgrade, skipping");
            return Ok(RunOutcome::NotAnUpgrade {
                previous_version: config.previous_version().to_string(),
                new_version,
            });
        }

        let request =
            UpgradeRequest::new(package, config.previous_version(), &new_version, changelog);
        validate_branch_name(&request.local_branch)?;

        let duplicates = find_duplicates(host, package, &new_version).await?;
        if !duplicates.is_empty() {
            warn!(count = duplicates.len(), "Upgrade already proposed, skipping");
            return Ok(RunOutcome::DuplicateFound {
                new_version,
                urls: duplicates.into_iter().map(|d| d.html_url).collect(),
            });
        }

        let locator = TitleSearchLocator::new(host, &settings.bot_user);

        if config.dry_run() {
            let base = locator
                .find_base_proposal(package, config.previous_version())
                .await?;
            return Ok(RunOutcome::DryRun {
                new_version,
                would_update: base.map(|b| b.number),
            });
        }

        prepare_commit(config, workspace, &request).await?;

        let default_template = read_default_template(config).await?;
        let summary = renderer.render_summary(&SummaryContext {
            package: request.package.clone(),
            previous_version: request.previous_version.clone(),
            new_version: request.new_version.clone(),
            changelog: request.changelog.clone(),
            workflow_url: config.workflow_url().unwrap_or_default().to_string(),
            generator_url: settings.generator_url.clone(),
            cc: SummaryContext::mentions(&settings.cc),
        })?;

        let fork = ForkTarget {
            remote: settings.fork_remote.clone(),
            owner: settings.bot_user.clone(),
            target_branch: settings.target_branch.clone(),
        };
        let reconciler = BranchReconciler::new(host, &locator, packages, fork);
        let reconciliation = reconciler
            .reconcile(
                workspace,
                &request,
                &ProposalText {
                    summary,
                    default_template,
                },
            )
            .await?;

        let outcome = packages.build(package).await?;
        let readiness =
            apply_build_outcome(host, &renderer, &reconciliation.proposal, &outcome).await?;

        Ok(RunOutcome::Proposed {
            number: reconciliation.proposal.number,
            url: reconciliation.proposal.html_url,
            path: reconciliation.path,
            readiness,
        })
    }
    .instrument(span)
    .await
}

/// Commits the working tree changes on a fresh branch off the target branch.
async fn prepare_commit<W: Workspace + ?Sized>(
    config: &RunnerConfig,
    workspace: &mut W,
    request: &UpgradeRequest,
) -> Result<(), RunnerError> {
    let settings = config.settings();

    workspace
        .configure_identity(&settings.bot_user, &settings.bot_email)
        .await?;
    workspace
        .fetch(
            &settings.origin_remote,
            &settings.target_branch,
            FetchMode::Refetch,
        )
        .await?;

    let fork_url = fork_remote_url(
        &settings.git_host,
        &settings.bot_user,
        &settings.fork_repo,
        config.token(),
    )?;
    workspace.set_remote(&settings.fork_remote, &fork_url).await?;

    workspace.switch(&settings.target_branch).await?;
    workspace.create_branch(&request.local_branch).await?;
    workspace
        .commit_all(&generate_commit_message(
            &request.package,
            &request.previous_version,
            &request.new_version,
            &request.changelog,
        ))
        .await?;

    info!(branch = %request.local_branch, "Committed upgrade");
    Ok(())
}

async fn read_default_template(config: &RunnerConfig) -> Result<String, RunnerError> {
    let path = config.pr_template_path();
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| RunnerError::TemplateFile {
            path: path.clone(),
            source,
        })
}
