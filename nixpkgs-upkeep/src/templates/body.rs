//! Proposal body layout.
//!
//! A body is the generated summary, the marker line, then the template block:
//!
//! ```text
//! {summary}
//!
//! <!-- BEGIN_TEMPLATE -->
//!
//! {template}
//! ```
//!
//! Humans may edit the block (ticking checklist items, for example). Rewrites
//! carry the existing block forward instead of resetting it.

/// Marker separating the summary from the template block.
pub const TEMPLATE_MARKER: &str = "<!-- BEGIN_TEMPLATE -->";

/// Joins a summary and a template block around the marker.
#[must_use]
pub fn make_body(summary: &str, template: &str) -> String {
    format!(
        "{}\n\n{TEMPLATE_MARKER}\n\n{}",
        summary.trim(),
        template.trim()
    )
}

/// Returns the template block of `body`, if it has a marker.
///
/// The block is everything after the first marker, trimmed.
#[must_use]
pub fn extract_template(body: &str) -> Option<&str> {
    body.split_once(TEMPLATE_MARKER)
        .map(|(_, template)| template.trim())
}
