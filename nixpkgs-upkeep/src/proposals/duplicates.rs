//! Detection of proposals that already cover an upgrade.

use crate::hosting::{HostError, ProposalHost, ProposalQuery, ProposalRef};
use tracing::{debug, info, info_span, Instrument};

/// Returns `true` if a title mentions both the package and the new version.
#[must_use]
pub fn title_mentions(title: &str, package: &str, new_version: &str) -> bool {
    title.contains(package) && title.contains(new_version)
}

/// Finds open proposals, by anyone, for upgrading `package` to `new_version`.
///
/// Search is token based, so hits are filtered to titles containing both
/// strings. A non-empty result means another proposal already covers this
/// upgrade and the run should stop.
///
/// # Errors
///
/// Returns [`HostError`] if the search fails.
pub async fn find_duplicates<H: ProposalHost>(
    host: &H,
    package: &str,
    new_version: &str,
) -> Result<Vec<ProposalRef>, HostError> {
    let span = info_span!("find_duplicates", package = %package, new_version = %new_version);

    async {
        let hits = host
            .search_open_proposals(&ProposalQuery::title(&[package, new_version]))
            .await?;
        debug!(hits = hits.len(), "Search complete");

        let duplicates: Vec<ProposalRef> = hits
            .into_iter()
            .filter(|hit| title_mentions(&hit.title, package, new_version))
            .collect();

        for duplicate in &duplicates {
            info!(pr_number = duplicate.number, url = %duplicate.html_url, "Existing proposal found");
        }
        Ok(duplicates)
    }
    .instrument(span)
    .await
}
