//! Settings file deserialization.

use crate::config::ConfigError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Environment variable that overrides `target-branch` (e.g. `staging`).
pub const TARGET_BRANCH_ENV: &str = "UPKEEP_TARGET_BRANCH";

/// Settings read from an optional `upkeep.toml`.
///
/// Every key is optional; the defaults describe the upstream nixpkgs setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct UpkeepSettings {
    /// Branch every proposal targets.
    pub target_branch: String,

    /// Owner of the upstream repository.
    pub upstream_owner: String,

    /// Name of the upstream repository.
    pub upstream_repo: String,

    /// Login of the automated identity. Also the owner of the fork.
    pub bot_user: String,

    /// Commit email of the automated identity.
    pub bot_email: String,

    /// Name of the bot's fork of the upstream repository.
    pub fork_repo: String,

    /// Remote pointing at the upstream repository.
    pub origin_remote: String,

    /// Remote registered for the bot's fork.
    pub fork_remote: String,

    /// Host used to build the fork push URL.
    pub git_host: String,

    /// Default proposal template, relative to the repository root.
    pub pr_template_path: String,

    /// Link shown in the generated proposal summary.
    pub generator_url: String,

    /// Handles mentioned at the end of the proposal summary.
    pub cc: Vec<String>,

    /// Handlebars template replacing the default proposal summary.
    pub summary_template: Option<String>,
}

impl Default for UpkeepSettings {
    fn default() -> Self {
        Self {
            target_branch: "master".to_string(),
            upstream_owner: "NixOS".to_string(),
            upstream_repo: "nixpkgs".to_string(),
            bot_user: "botnk".to_string(),
            bot_email: "github-botnk@korz.dev".to_string(),
            fork_repo: "nixpkgs".to_string(),
            origin_remote: "origin".to_string(),
            fork_remote: "fork".to_string(),
            git_host: "github.com".to_string(),
            pr_template_path: ".github/PULL_REQUEST_TEMPLATE.md".to_string(),
            generator_url: "https://github.com/niklaskorz/nixpkgs-upkeep".to_string(),
            cc: Vec::new(),
            summary_template: None,
        }
    }
}

impl UpkeepSettings {
    /// Loads settings from `path`, or returns the defaults when no path is given.
    ///
    /// The `UPKEEP_TARGET_BRANCH` environment variable takes precedence over
    /// the file's `target-branch`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not valid
    /// TOML, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(branch) = resolve_target_branch_override() {
            debug!(branch = %branch, "Target branch overridden from environment");
            settings.target_branch = branch;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Checks that identity and repository fields are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("target-branch", &self.target_branch),
            ("upstream-owner", &self.upstream_owner),
            ("upstream-repo", &self.upstream_repo),
            ("bot-user", &self.bot_user),
            ("bot-email", &self.bot_email),
            ("fork-repo", &self.fork_repo),
            ("origin-remote", &self.origin_remote),
            ("fork-remote", &self.fork_remote),
            ("git-host", &self.git_host),
            ("pr-template-path", &self.pr_template_path),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        if self.origin_remote == self.fork_remote {
            return Err(ConfigError::ValidationError {
                field: "fork-remote".to_string(),
                message: "must differ from origin-remote".to_string(),
            });
        }

        Ok(())
    }

    /// Upstream repository as `owner/repo`.
    #[must_use]
    pub fn upstream_full_name(&self) -> String {
        format!("{}/{}", self.upstream_owner, self.upstream_repo)
    }
}

fn resolve_target_branch_override() -> Option<String> {
    std::env::var(TARGET_BRANCH_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_settings(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("upkeep.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_target_upstream_master() {
        temp_env::with_var_unset(TARGET_BRANCH_ENV, || {
            let settings = UpkeepSettings::load(None).unwrap();
            assert_eq!(settings.target_branch, "master");
            assert_eq!(settings.upstream_full_name(), "NixOS/nixpkgs");
            assert_eq!(settings.fork_remote, "fork");
            assert!(settings.cc.is_empty());
        });
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(
            &temp,
            r#"
bot-user = "upkeep-bot"
bot-email = "upkeep@example.com"
cc = ["alice", "bob"]
"#,
        );

        temp_env::with_var_unset(TARGET_BRANCH_ENV, || {
            let settings = UpkeepSettings::load(Some(&path)).unwrap();
            assert_eq!(settings.bot_user, "upkeep-bot");
            assert_eq!(settings.bot_email, "upkeep@example.com");
            assert_eq!(settings.cc, vec!["alice", "bob"]);
            assert_eq!(settings.upstream_repo, "nixpkgs");
        });
    }

    #[test]
    fn environment_overrides_target_branch() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "target-branch = \"master\"\n");

        temp_env::with_var(TARGET_BRANCH_ENV, Some("staging"), || {
            let settings = UpkeepSettings::load(Some(&path)).unwrap();
            assert_eq!(settings.target_branch, "staging");
        });
    }

    #[test]
    fn rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "bot-name = \"typo\"\n");

        let error = UpkeepSettings::load(Some(&path)).unwrap_err();
        assert!(matches!(error, ConfigError::TomlError { .. }));
    }

    #[test]
    fn rejects_empty_bot_user() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "bot-user = \"  \"\n");

        let error = UpkeepSettings::load(Some(&path)).unwrap_err();
        assert!(
            matches!(error, ConfigError::ValidationError { ref field, .. } if field == "bot-user")
        );
    }

    #[test]
    fn rejects_fork_remote_equal_to_origin() {
        let settings = UpkeepSettings {
            fork_remote: "origin".to_string(),
            ..UpkeepSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let error = UpkeepSettings::load(Some(&missing)).unwrap_err();
        assert!(matches!(error, ConfigError::MissingFile { .. }));
    }
}
