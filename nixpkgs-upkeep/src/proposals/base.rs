//! Lookup of the bot's open proposal for the same starting version.

use crate::hosting::{HostError, ProposalHost, ProposalQuery, ProposalRef};
use crate::templates::generate_base_title_prefix;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Finds the open proposal an upgrade should be stacked onto.
///
/// The reconciler only depends on this interface; the title search below is
/// one way to answer it.
#[async_trait]
pub trait BaseProposalLocator: Send + Sync {
    /// Returns the bot's open proposal upgrading `package` from `previous_version`.
    async fn find_base_proposal(
        &self,
        package: &str,
        previous_version: &str,
    ) -> Result<Option<ProposalRef>, HostError>;
}

/// Locates base proposals by title: `"{package}: {previous_version} -> "`.
pub struct TitleSearchLocator<'a, H> {
    host: &'a H,
    author: String,
}

impl<'a, H: ProposalHost> TitleSearchLocator<'a, H> {
    /// Searches `host` for proposals opened by `author`.
    pub fn new(host: &'a H, author: impl Into<String>) -> Self {
        Self {
            host,
            author: author.into(),
        }
    }
}

#[async_trait]
impl<'a, H: ProposalHost> BaseProposalLocator for TitleSearchLocator<'a, H> {
    async fn find_base_proposal(
        &self,
        package: &str,
        previous_version: &str,
    ) -> Result<Option<ProposalRef>, HostError> {
        let query = ProposalQuery::title(&[package, previous_version]).by(&self.author);
        let hits = self.host.search_open_proposals(&query).await?;

        let candidates: Vec<ProposalRef> = hits
            .into_iter()
            .filter(|hit| hit.author.eq_ignore_ascii_case(&self.author))
            .collect();
        debug!(candidates = candidates.len(), "Base proposal search complete");

        Ok(select_base_proposal(candidates, package, previous_version))
    }
}

/// Picks the base proposal among search hits.
///
/// Only titles starting with `"{package}: {previous_version} -> "` qualify.
/// If several do, the lowest number wins.
#[must_use]
pub fn select_base_proposal(
    candidates: Vec<ProposalRef>,
    package: &str,
    previous_version: &str,
) -> Option<ProposalRef> {
    let prefix = generate_base_title_prefix(package, previous_version);
    let mut matching: Vec<ProposalRef> = candidates
        .into_iter()
        .filter(|candidate| candidate.title.starts_with(&prefix))
        .collect();

    if matching.len() > 1 {
        warn!(
            prefix = %prefix,
            numbers = ?matching.iter().map(|m| m.number).collect::<Vec<_>>(),
            "Several base proposals match, using the lowest number"
        );
    }

    matching.sort_by_key(|candidate| candidate.number);
    matching.into_iter().next()
}
