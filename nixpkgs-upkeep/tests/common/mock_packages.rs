//! Package set with scripted versions and build result.

use async_trait::async_trait;
use nixpkgs_upkeep::{BuildOutcome, PackageError, PackageSet};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns queued versions in order; the last one repeats.
#[derive(Debug)]
pub struct MockPackages {
    versions: Mutex<VecDeque<String>>,
    changelog: String,
    succeeded: bool,
    log: String,
    builds: Mutex<usize>,
}

impl MockPackages {
    pub fn new(versions: &[&str]) -> Self {
        Self {
            versions: Mutex::new(versions.iter().map(|v| (*v).to_string()).collect()),
            changelog: "https://example.com/pkg/releases".to_string(),
            succeeded: true,
            log: "building '/nix/store/abc-pkg.drv'...\n/nix/store/xyz-pkg\n".to_string(),
            builds: Mutex::new(0),
        }
    }

    pub fn with_build(mut self, succeeded: bool, log: &str) -> Self {
        self.succeeded = succeeded;
        self.log = log.to_string();
        self
    }

    pub fn builds(&self) -> usize {
        *self.builds.lock().unwrap()
    }
}

#[async_trait]
impl PackageSet for MockPackages {
    async fn version(&self, _package: &str) -> Result<String, PackageError> {
        let mut versions = self.versions.lock().unwrap();
        let version = if versions.len() > 1 {
            versions.pop_front()
        } else {
            versions.front().cloned()
        };
        Ok(version.unwrap_or_default())
    }

    async fn changelog(&self, _package: &str) -> Result<String, PackageError> {
        Ok(self.changelog.clone())
    }

    async fn build(&self, package: &str) -> Result<BuildOutcome, PackageError> {
        *self.builds.lock().unwrap() += 1;
        Ok(BuildOutcome {
            succeeded: self.succeeded,
            log: self.log.clone(),
            command: format!("nix-build -A {package}"),
        })
    }
}
