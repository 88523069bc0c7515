//! Package evaluation error types.

use thiserror::Error;

/// Errors that can occur while evaluating or building a package.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The attribute path cannot be safely interpolated into a Nix expression.
    #[error("Invalid package attribute path '{attr}'")]
    InvalidAttribute { attr: String },

    /// A Nix tool could not be started.
    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Evaluation exited with a failure status.
    #[error("Evaluating '{expr}' failed: {stderr}")]
    EvalFailed { expr: String, stderr: String },

    /// Evaluation output was not the expected JSON string.
    #[error("Unexpected output evaluating '{expr}': {source}")]
    UnexpectedOutput {
        expr: String,
        #[source]
        source: serde_json::Error,
    },
}
