//! GitHub implementation of [`ProposalHost`] using octocrab.

use super::{
    HostError, NewProposal, Proposal, ProposalHost, ProposalQuery, ProposalRef, ProposalUpdate,
};
use crate::rate_limit::{ensure_rate_limit, RateLimitResource};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, info, warn};

const MARK_READY_MUTATION: &str = r"
mutation MarkPullRequestReadyForReview($pullRequestId: ID!) {
    markPullRequestReadyForReview(input: { pullRequestId: $pullRequestId }) {
        pullRequest {
            number
            isDraft
        }
    }
}
";

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    /// Joined error messages, if the response reports any.
    fn error_message(&self) -> Option<String> {
        self.errors
            .as_deref()
            .filter(|errors| !errors.is_empty())
            .map(|errors| {
                errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
    }
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkReadyData {
    mark_pull_request_ready_for_review: Option<MarkReadyPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkReadyPayload {
    pull_request: MarkedPullRequest,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkedPullRequest {
    number: u64,
    is_draft: bool,
}

/// Proposal host backed by the GitHub REST and GraphQL APIs.
pub struct GitHubHost {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubHost {
    /// Creates a host for `owner/repo` using an authenticated client.
    pub fn new(client: Octocrab, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Builds an issue search query for open pull requests by title.
///
/// Format: `{terms} repo:{owner}/{repo} type:pr state:open in:title [author:{login}]`
fn build_search_query(full_name: &str, query: &ProposalQuery) -> String {
    let mut q = format!(
        "{} repo:{full_name} type:pr state:open in:title",
        query.title_terms.join(" ")
    );
    if let Some(author) = &query.author {
        q.push_str(&format!(" author:{author}"));
    }
    q
}

fn proposal_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> Result<Proposal, HostError> {
    let node_id = pr.node_id.clone().ok_or(HostError::MissingField {
        number: pr.number,
        field: "node_id",
    })?;

    Ok(Proposal {
        number: pr.number,
        node_id,
        title: pr.title.clone().unwrap_or_default(),
        body: pr.body.clone().unwrap_or_default(),
        head_ref: pr.head.ref_field.clone(),
        base_ref: pr.base.ref_field.clone(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        is_draft: pr.draft.unwrap_or(false),
    })
}

#[async_trait]
impl ProposalHost for GitHubHost {
    async fn search_open_proposals(
        &self,
        query: &ProposalQuery,
    ) -> Result<Vec<ProposalRef>, HostError> {
        let q = build_search_query(&self.full_name(), query);
        debug!(query = %q, "Searching pull requests");

        ensure_rate_limit(&self.client, RateLimitResource::Search).await?;
        let page = self
            .client
            .search()
            .issues_and_pull_requests(&q)
            .send()
            .await?;

        Ok(page
            .items
            .into_iter()
            .filter(|item| item.pull_request.is_some())
            .map(|item| ProposalRef {
                number: item.number,
                title: item.title,
                html_url: item.html_url.to_string(),
                author: item.user.login,
            })
            .collect())
    }

    async fn get_proposal(&self, number: u64) -> Result<Proposal, HostError> {
        ensure_rate_limit(&self.client, RateLimitResource::Core).await?;
        let pr = self
            .client
            .pulls(&self.owner, &self.repo)
            .get(number)
            .await?;
        proposal_from_octocrab(&pr)
    }

    async fn create_proposal(&self, proposal: &NewProposal) -> Result<Proposal, HostError> {
        debug!(head = %proposal.head, base = %proposal.base, draft = proposal.draft, "Creating pull request");

        ensure_rate_limit(&self.client, RateLimitResource::Core).await?;
        let pulls = self.client.pulls(&self.owner, &self.repo);
        let pr = pulls
            .create(&proposal.title, &proposal.head, &proposal.base)
            .body(&proposal.body)
            .draft(proposal.draft)
            .maintainer_can_modify(true)
            .send()
            .await?;

        proposal_from_octocrab(&pr)
    }

    async fn update_proposal(
        &self,
        number: u64,
        update: &ProposalUpdate,
    ) -> Result<Proposal, HostError> {
        debug!(pr_number = number, title = %update.title, "Updating pull request");

        ensure_rate_limit(&self.client, RateLimitResource::Core).await?;
        let pulls = self.client.pulls(&self.owner, &self.repo);
        let pr = pulls
            .update(number)
            .title(&update.title)
            .body(&update.body)
            .send()
            .await?;

        proposal_from_octocrab(&pr)
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), HostError> {
        ensure_rate_limit(&self.client, RateLimitResource::Core).await?;
        self.client
            .issues(&self.owner, &self.repo)
            .create_comment(number, body)
            .await?;
        Ok(())
    }

    async fn mark_ready_for_review(&self, proposal: &Proposal) -> Result<(), HostError> {
        debug!(pr_number = proposal.number, "Marking pull request ready for review");

        let response: GraphQlResponse<MarkReadyData> = self
            .client
            .graphql(&serde_json::json!({
                "query": MARK_READY_MUTATION,
                "variables": { "pullRequestId": proposal.node_id },
            }))
            .await?;

        if let Some(message) = response.error_message() {
            // GitHub rejects the mutation for proposals that are not drafts.
            let current = self.get_proposal(proposal.number).await?;
            if !current.is_draft {
                info!(pr_number = proposal.number, "Pull request already ready for review");
                return Ok(());
            }

            warn!(pr_number = proposal.number, error = %message, "Ready-for-review mutation failed");
            return Err(HostError::GraphQl { message });
        }

        let marked = response
            .data
            .and_then(|data| data.mark_pull_request_ready_for_review)
            .ok_or_else(|| HostError::GraphQl {
                message: "no data in response".to_string(),
            })?
            .pull_request;
        debug!(pr_number = marked.number, is_draft = marked.is_draft, "Pull request marked ready");
        Ok(())
    }
}
