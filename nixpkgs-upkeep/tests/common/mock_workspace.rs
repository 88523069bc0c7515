//! Workspace that tracks branches as lists of commit messages.

use async_trait::async_trait;
use nixpkgs_upkeep::{ConflictPolicy, FetchMode, GitError, Workspace};
use std::collections::HashMap;

/// Simulated checkout. Commits are identified by their message.
#[derive(Debug, Default)]
pub struct MockWorkspace {
    pub dirty: bool,
    pub current: String,
    pub local: HashMap<String, Vec<String>>,
    pub remote: HashMap<(String, String), Vec<String>>,
    pub remotes: HashMap<String, String>,
    pub identity: Option<(String, String)>,
    pub cherry_picks: Vec<(String, ConflictPolicy)>,
    pub ops: Vec<String>,
    pub fail_on: Option<&'static str>,
}

impl MockWorkspace {
    /// A dirty checkout of `master`, with `origin/master` at one commit.
    pub fn dirty_on_master() -> Self {
        let base = vec!["base".to_string()];
        let mut workspace = Self {
            dirty: true,
            current: "master".to_string(),
            ..Self::default()
        };
        workspace.local.insert("master".to_string(), base.clone());
        workspace
            .remote
            .insert(("origin".to_string(), "master".to_string()), base);
        workspace
    }

    /// Puts a branch on the fork remote.
    pub fn with_remote_branch(mut self, remote: &str, branch: &str, commits: &[&str]) -> Self {
        self.remote.insert(
            (remote.to_string(), branch.to_string()),
            commits.iter().map(|c| (*c).to_string()).collect(),
        );
        self
    }

    pub fn remote_commits(&self, remote: &str, branch: &str) -> Vec<String> {
        self.remote
            .get(&(remote.to_string(), branch.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn local_commits(&self, branch: &str) -> Vec<String> {
        self.local.get(branch).cloned().unwrap_or_default()
    }

    fn enter(&mut self, operation: &'static str, detail: String) -> Result<(), GitError> {
        self.ops.push(format!("{operation} {detail}").trim_end().to_string());
        if self.fail_on == Some(operation) {
            return Err(failed(operation, "injected failure"));
        }
        Ok(())
    }

    fn head_mut(&mut self) -> Result<&mut Vec<String>, GitError> {
        let current = self.current.clone();
        self.local
            .get_mut(&current)
            .ok_or_else(|| failed("HEAD", "no commits on current branch"))
    }
}

fn failed(command: &str, stderr: &str) -> GitError {
    GitError::CommandFailed {
        command: command.to_string(),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl Workspace for MockWorkspace {
    async fn is_clean(&mut self) -> Result<bool, GitError> {
        self.enter("is_clean", String::new())?;
        Ok(!self.dirty)
    }

    async fn configure_identity(&mut self, name: &str, email: &str) -> Result<(), GitError> {
        self.enter("configure_identity", name.to_string())?;
        self.identity = Some((name.to_string(), email.to_string()));
        Ok(())
    }

    async fn set_remote(&mut self, name: &str, url: &str) -> Result<(), GitError> {
        self.enter("set_remote", name.to_string())?;
        self.remotes.insert(name.to_string(), url.to_string());
        Ok(())
    }

    async fn fetch(&mut self, remote: &str, branch: &str, mode: FetchMode) -> Result<(), GitError> {
        self.enter("fetch", format!("{remote} {branch} {mode:?}"))?;
        if !self
            .remote
            .contains_key(&(remote.to_string(), branch.to_string()))
        {
            return Err(failed("fetch", "couldn't find remote ref"));
        }
        Ok(())
    }

    async fn switch(&mut self, branch: &str) -> Result<(), GitError> {
        self.enter("switch", branch.to_string())?;
        if !self.local.contains_key(branch) {
            return Err(failed("switch", "invalid reference"));
        }
        self.current = branch.to_string();
        Ok(())
    }

    async fn create_branch(&mut self, branch: &str) -> Result<(), GitError> {
        self.enter("create_branch", branch.to_string())?;
        if self.local.contains_key(branch) {
            return Err(failed("switch -c", "a branch with that name already exists"));
        }
        let commits = self.head_mut()?.clone();
        self.local.insert(branch.to_string(), commits);
        self.current = branch.to_string();
        Ok(())
    }

    async fn switch_to_remote_branch(
        &mut self,
        remote: &str,
        branch: &str,
    ) -> Result<(), GitError> {
        self.enter("switch_to_remote_branch", format!("{remote}/{branch}"))?;
        if self.dirty {
            return Err(failed("switch -C", "local changes would be overwritten"));
        }
        let commits = self
            .remote
            .get(&(remote.to_string(), branch.to_string()))
            .cloned()
            .ok_or_else(|| failed("switch -C", "invalid reference"))?;
        self.local.insert(branch.to_string(), commits);
        self.current = branch.to_string();
        Ok(())
    }

    async fn commit_all(&mut self, message: &str) -> Result<(), GitError> {
        self.enter("commit_all", String::new())?;
        if !self.dirty {
            return Err(failed("commit", "nothing to commit"));
        }
        self.head_mut()?.push(message.to_string());
        self.dirty = false;
        Ok(())
    }

    async fn cherry_pick(&mut self, rev: &str, policy: ConflictPolicy) -> Result<(), GitError> {
        self.enter("cherry_pick", rev.to_string())?;
        let commit = self
            .local
            .get(rev)
            .and_then(|commits| commits.last())
            .cloned()
            .ok_or_else(|| failed("cherry-pick", "bad revision"))?;
        self.cherry_picks.push((rev.to_string(), policy));
        self.head_mut()?.push(commit);
        Ok(())
    }

    async fn amend_message(&mut self, message: &str) -> Result<(), GitError> {
        self.enter("amend_message", String::new())?;
        let head = self.head_mut()?;
        let last = head
            .last_mut()
            .ok_or_else(|| failed("commit --amend", "no commit to amend"))?;
        *last = message.to_string();
        Ok(())
    }

    async fn push(&mut self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.enter("push", format!("{remote} {branch}"))?;
        let commits = self
            .local
            .get(branch)
            .cloned()
            .ok_or_else(|| failed("push", "src refspec does not match any"))?;
        self.remote
            .insert((remote.to_string(), branch.to_string()), commits);
        Ok(())
    }
}
