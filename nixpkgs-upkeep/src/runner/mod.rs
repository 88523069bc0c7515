//! Orchestrates one upkeep run.

mod config;
mod error;
mod pipeline;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use pipeline::run_pipeline;

use crate::git::GitWorkspace;
use crate::hosting::GitHubHost;
use crate::package::NixPackageSet;
use crate::summary::RunOutcome;
use octocrab::Octocrab;

/// Runs the pipeline against GitHub, a git checkout and nixpkgs.
pub struct Runner {
    config: RunnerConfig,
    octocrab: Octocrab,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidInput`] for an empty token, or an
    /// octocrab error if the client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        if config.token().trim().is_empty() {
            return Err(RunnerError::InvalidInput {
                field: "token",
                message: "must not be empty".to_string(),
            });
        }

        let octocrab = Octocrab::builder()
            .personal_token(config.token().to_string())
            .build()?;
        Ok(Self { config, octocrab })
    }

    /// Executes the full run.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on any fatal failure. No-op outcomes are `Ok`.
    pub async fn run(&self) -> Result<RunOutcome, RunnerError> {
        let settings = self.config.settings();
        let host = GitHubHost::new(
            self.octocrab.clone(),
            &settings.upstream_owner,
            &settings.upstream_repo,
        );
        let mut workspace = GitWorkspace::open(self.config.repo_path());
        let packages = NixPackageSet::new(self.config.repo_path());

        run_pipeline(&self.config, &host, &mut workspace, &packages).await
    }
}
