//! Runner configuration.

use crate::config::UpkeepSettings;
use std::path::{Path, PathBuf};

/// Configuration for one upkeep run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Package attribute path, e.g. `hello` or `python3Packages.requests`.
    package: String,
    /// Version recorded before the updater ran.
    previous_version: String,
    /// GitHub token used for API calls and pushes to the fork.
    token: String,
    /// Root of the nixpkgs checkout.
    repo_path: PathBuf,
    /// CI run linked from the proposal summary.
    workflow_url: Option<String>,
    /// Whether to stop before any mutation.
    dry_run: bool,
    /// Repository, identity and text settings.
    settings: UpkeepSettings,
}

impl RunnerConfig {
    /// Creates a configuration with default settings.
    pub fn new(
        package: impl Into<String>,
        previous_version: impl Into<String>,
        token: impl Into<String>,
        repo_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package: package.into(),
            previous_version: previous_version.into(),
            token: token.into(),
            repo_path: repo_path.into(),
            workflow_url: None,
            dry_run: false,
            settings: UpkeepSettings::default(),
        }
    }

    /// Sets the CI workflow URL shown in the summary.
    #[must_use]
    pub fn with_workflow_url(mut self, workflow_url: Option<String>) -> Self {
        self.workflow_url = workflow_url.filter(|url| !url.trim().is_empty());
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Replaces the default settings.
    #[must_use]
    pub fn with_settings(mut self, settings: UpkeepSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the package attribute path.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the version recorded before the update.
    pub fn previous_version(&self) -> &str {
        &self.previous_version
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the nixpkgs checkout path.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Returns the CI workflow URL, if any.
    pub fn workflow_url(&self) -> Option<&str> {
        self.workflow_url.as_deref()
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the run settings.
    pub fn settings(&self) -> &UpkeepSettings {
        &self.settings
    }

    /// Default proposal template location.
    pub fn pr_template_path(&self) -> PathBuf {
        self.repo_path.join(&self.settings.pr_template_path)
    }
}
