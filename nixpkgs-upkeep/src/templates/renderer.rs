//! Template renderer.

use crate::package::BuildOutcome;
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use serde_json::json;

/// Number of trailing log lines quoted in a failure report.
pub const ABBREVIATED_LOG_LINES: usize = 15;

/// Default proposal summary, placed above the template block.
pub const DEFAULT_SUMMARY_TEMPLATE: &str = r"Upgrades {{package}} from {{previous_version}} to {{new_version}}

This PR was automatically generated by [nixpkgs-upkeep]({{generator_url}}).

- Changelog: {{changelog}}
{{#if workflow_url}}
- [CI workflow]({{workflow_url}}) that created this PR.
{{/if}}
{{#if cc}}

cc {{cc}}
{{/if}}
";

const BUILD_SUCCESS_TEMPLATE: &str = r"{{tool}} was successful! Marking this PR as ready for review.

<details>
<summary>Complete build log</summary>

```
> {{command}}
{{build_log}}
```
</details>
";

const BUILD_FAILURE_TEMPLATE: &str = r#"{{tool}} failed. Leaving this PR as a draft for now. Push commits to this branch and mark as "ready for review" once the build issues have been resolved.

Abbreviated log:
```
> {{command}}
...
{{abbreviated}}
```

<details>
<summary>Complete build log</summary>

```
> {{command}}
{{build_log}}
```
</details>
"#;

const SUMMARY: &str = "summary";
const BUILD_SUCCESS: &str = "build-success";
const BUILD_FAILURE: &str = "build-failure";

handlebars_helper!(eq: |a: str, b: str| a == b);

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("eq", Box::new(eq));
    hbs
}

/// Values available to the summary template.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryContext {
    /// Package attribute path.
    pub package: String,
    /// Version recorded before the update.
    pub previous_version: String,
    /// Version after the update.
    pub new_version: String,
    /// Changelog reference.
    pub changelog: String,
    /// CI run that produced the proposal. Empty when unknown.
    pub workflow_url: String,
    /// Link to this tool.
    pub generator_url: String,
    /// Mentions, already formatted (`@a @b`). Empty for none.
    pub cc: String,
}

impl SummaryContext {
    /// Formats handles as space separated mentions.
    #[must_use]
    pub fn mentions(handles: &[String]) -> String {
        handles
            .iter()
            .map(|handle| format!("@{}", handle.trim_start_matches('@')))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Renders proposal summaries and build reports.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer with the default summary template.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self, super::TemplateError> {
        Self::with_summary_template(DEFAULT_SUMMARY_TEMPLATE)
    }

    /// Creates a renderer with a custom summary template.
    ///
    /// # Errors
    ///
    /// Returns an error if `summary` is not a valid Handlebars template.
    pub fn with_summary_template(summary: &str) -> Result<Self, super::TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(SUMMARY, summary)?;
        handlebars.register_template_string(BUILD_SUCCESS, BUILD_SUCCESS_TEMPLATE)?;
        handlebars.register_template_string(BUILD_FAILURE, BUILD_FAILURE_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Renders the proposal summary.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_summary(&self, context: &SummaryContext) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render(SUMMARY, context)?)
    }

    /// Renders the comment reporting a build outcome.
    ///
    /// A failure report quotes the last [`ABBREVIATED_LOG_LINES`] lines before
    /// the complete log.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_build_report(
        &self,
        outcome: &BuildOutcome,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "tool": outcome.tool(),
            "command": outcome.command,
            "build_log": outcome.log.trim_end(),
            "abbreviated": abbreviate_log(&outcome.log, ABBREVIATED_LOG_LINES),
        });

        let name = if outcome.succeeded {
            BUILD_SUCCESS
        } else {
            BUILD_FAILURE
        };
        Ok(self.handlebars.render(name, &data)?)
    }
}

/// Returns the last `lines` lines of `log`.
#[must_use]
pub fn abbreviate_log(log: &str, lines: usize) -> String {
    let all: Vec<&str> = log.lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}
