//! [`Workspace`] backed by the `git` binary.

use super::{ConflictPolicy, FetchMode, GitError, Workspace};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;
use url::Url;

/// A git checkout driven through `git` subprocesses.
#[derive(Debug)]
pub struct GitWorkspace {
    root: PathBuf,
}

impl GitWorkspace {
    /// Opens the checkout at `root`. Nothing is validated until the first command.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Checkout directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs a git command, returning its stdout.
    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = display_command(args);
        debug!(command = %command, "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                command,
                stderr: redact_text(stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs a git command whose exit status is the answer.
    async fn succeeds(&self, args: &[&str]) -> Result<bool, GitError> {
        let command = display_command(args);
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| GitError::Spawn { command, source })?;
        Ok(status.success())
    }
}

#[async_trait]
impl Workspace for GitWorkspace {
    async fn is_clean(&mut self) -> Result<bool, GitError> {
        // Refresh the index first; diff-index trusts stale stat info.
        let _ = self.run(&["update-index", "-q", "--refresh"]).await;
        self.succeeds(&["diff-index", "--quiet", "HEAD", "--"]).await
    }

    async fn configure_identity(&mut self, name: &str, email: &str) -> Result<(), GitError> {
        self.run(&["config", "user.email", email]).await?;
        self.run(&["config", "user.name", name]).await?;
        Ok(())
    }

    async fn set_remote(&mut self, name: &str, url: &str) -> Result<(), GitError> {
        if self.succeeds(&["remote", "get-url", name]).await? {
            self.run(&["remote", "set-url", name, url]).await?;
        } else {
            self.run(&["remote", "add", name, url]).await?;
        }
        Ok(())
    }

    async fn fetch(&mut self, remote: &str, branch: &str, mode: FetchMode) -> Result<(), GitError> {
        match mode {
            FetchMode::Filtered => {
                self.run(&["fetch", "--filter=tree:0", remote, branch]).await?;
            }
            FetchMode::Refetch => {
                self.run(&["fetch", "--refetch", "--filter=tree:0", remote, branch])
                    .await?;
            }
        }
        Ok(())
    }

    async fn switch(&mut self, branch: &str) -> Result<(), GitError> {
        self.run(&["switch", branch]).await?;
        Ok(())
    }

    async fn create_branch(&mut self, branch: &str) -> Result<(), GitError> {
        self.run(&["switch", "-c", branch]).await?;
        Ok(())
    }

    async fn switch_to_remote_branch(
        &mut self,
        remote: &str,
        branch: &str,
    ) -> Result<(), GitError> {
        let start = format!("{remote}/{branch}");
        self.run(&["switch", "-C", branch, &start]).await?;
        Ok(())
    }

    async fn commit_all(&mut self, message: &str) -> Result<(), GitError> {
        self.run(&["add", "."]).await?;
        self.run(&["commit", "-m", message]).await?;
        Ok(())
    }

    async fn cherry_pick(&mut self, rev: &str, policy: ConflictPolicy) -> Result<(), GitError> {
        match policy {
            ConflictPolicy::PreferIncoming => {
                self.run(&["cherry-pick", "--strategy-option=theirs", rev])
                    .await?;
            }
            ConflictPolicy::Abort => {
                self.run(&["cherry-pick", rev]).await?;
            }
        }
        Ok(())
    }

    async fn amend_message(&mut self, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "--amend", "-m", message]).await?;
        Ok(())
    }

    async fn push(&mut self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run(&["push", "--set-upstream", remote, branch]).await?;
        Ok(())
    }
}

/// Builds the authenticated push URL for the bot's fork.
///
/// Format: `https://{user}:{token}@{host}/{user}/{repo}.git`
///
/// # Errors
///
/// Returns [`GitError::InvalidRemoteUrl`] if the parts do not form a URL.
pub fn fork_remote_url(host: &str, user: &str, repo: &str, token: &str) -> Result<String, GitError> {
    let invalid = |message: String| GitError::InvalidRemoteUrl { message };

    let mut url = Url::parse(&format!("https://{host}/"))
        .map_err(|e| invalid(format!("bad host '{host}': {e}")))?;
    url.set_path(&format!("{user}/{repo}.git"));
    url.set_username(user)
        .map_err(|()| invalid(format!("bad user '{user}'")))?;
    url.set_password(Some(token))
        .map_err(|()| invalid("cannot carry credentials".to_string()))?;

    Ok(url.to_string())
}

/// Replaces the password of a URL with `***`. Other strings pass through.
#[must_use]
pub fn redact_url(value: &str) -> String {
    match Url::parse(value) {
        Ok(mut url) if url.password().is_some() => {
            // set_password only fails for URLs that cannot have credentials.
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => value.to_string(),
    }
}

fn display_command(args: &[&str]) -> String {
    args.iter()
        .map(|arg| redact_url(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Redacts credentials in URLs embedded in free text, including quoted ones.
fn redact_text(text: &str) -> String {
    text.lines()
        .map(|line| {
            line.split(' ')
                .map(|word| {
                    let candidate = word.trim_matches(|c: char| {
                        matches!(c, '\'' | '"' | ':' | ',' | '(' | ')')
                    });
                    let redacted = redact_url(candidate);
                    if redacted == candidate {
                        word.to_string()
                    } else {
                        word.replacen(candidate, &redacted, 1)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
