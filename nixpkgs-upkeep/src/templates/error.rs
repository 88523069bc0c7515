//! Template error types.

/// Errors from parsing or rendering Handlebars templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A template could not be rendered with the given data.
    #[error("Failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),

    /// A template is not valid Handlebars.
    #[error("Invalid template: {0}")]
    Parse(#[from] handlebars::TemplateError),
}
