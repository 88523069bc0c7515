//! Text formats: titles, branch names, commit messages, proposal bodies and
//! build reports.
//!
//! Titles double as search and parse keys, so their format is fixed:
//! `"{package}: {old_version} -> {new_version}"`.

mod body;
mod error;
mod renderer;

pub use body::{extract_template, make_body, TEMPLATE_MARKER};
pub use error::TemplateError;
pub use renderer::{
    abbreviate_log, create_handlebars_registry, SummaryContext, TemplateRenderer,
    ABBREVIATED_LOG_LINES, DEFAULT_SUMMARY_TEMPLATE,
};

/// Generates the proposal title for an upgrade.
///
/// Format: "{package}: {old_version} -> {new_version}"
#[must_use]
pub fn generate_pr_title(package: &str, old_version: &str, new_version: &str) -> String {
    format!("{package}: {old_version} -> {new_version}")
}

/// Generates the title prefix shared by every proposal starting at `old_version`.
///
/// Format: "{package}: {old_version} -> "
#[must_use]
pub fn generate_base_title_prefix(package: &str, old_version: &str) -> String {
    format!("{package}: {old_version} -> ")
}

/// Generates the disposable branch name for an upgrade.
///
/// Format: "{package}-{new_version}"
#[must_use]
pub fn generate_branch_name(package: &str, new_version: &str) -> String {
    format!("{package}-{new_version}")
}

/// Generates the upgrade commit message.
///
/// Format: "{package}: {old_version} -> {new_version}\n\nChangelog: {changelog}"
#[must_use]
pub fn generate_commit_message(
    package: &str,
    old_version: &str,
    new_version: &str,
    changelog: &str,
) -> String {
    format!(
        "{}\n\nChangelog: {changelog}",
        generate_pr_title(package, old_version, new_version)
    )
}
