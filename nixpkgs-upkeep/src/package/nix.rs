//! [`PackageSet`] for a nixpkgs checkout.

use super::{BuildOutcome, PackageError, PackageSet};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Changelog reference used when `meta.changelog` is null.
pub const MISSING_CHANGELOG: &str = "none";

/// Evaluates and builds packages with `nix-instantiate` and `nix-build`.
#[derive(Debug, Clone)]
pub struct NixPackageSet {
    root: PathBuf,
}

impl NixPackageSet {
    /// Uses the nixpkgs checkout at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Evaluates `with import ./. {}; {expr}` and decodes the JSON result.
    async fn eval<T: DeserializeOwned>(&self, expr: &str) -> Result<T, PackageError> {
        let full = format!("with import ./. {{}}; {expr}");
        debug!(expr = %full, "Evaluating");

        let output = Command::new("nix-instantiate")
            .args(["--eval", "-E", &full, "--json"])
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| PackageError::Spawn {
                tool: "nix-instantiate",
                source,
            })?;

        if !output.status.success() {
            return Err(PackageError::EvalFailed {
                expr: expr.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_eval_output(expr, &output.stdout)
    }
}

#[async_trait]
impl PackageSet for NixPackageSet {
    async fn version(&self, package: &str) -> Result<String, PackageError> {
        validate_attr_path(package)?;
        self.eval(&format!("lib.getVersion {package}")).await
    }

    async fn changelog(&self, package: &str) -> Result<String, PackageError> {
        validate_attr_path(package)?;
        let changelog: Option<String> = self.eval(&format!("{package}.meta.changelog")).await?;
        Ok(changelog.unwrap_or_else(|| MISSING_CHANGELOG.to_string()))
    }

    async fn build(&self, package: &str) -> Result<BuildOutcome, PackageError> {
        validate_attr_path(package)?;
        let command = format!("nix-build -A {package}");
        info!(command = %command, "Building package");

        let output = Command::new("nix-build")
            .args(["-A", package])
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| PackageError::Spawn {
                tool: "nix-build",
                source,
            })?;

        // The build log goes to stderr, the store path to stdout.
        let mut log = String::from_utf8_lossy(&output.stderr).into_owned();
        log.push_str(&String::from_utf8_lossy(&output.stdout));

        let succeeded = output.status.success();
        info!(succeeded, "Build finished");
        Ok(BuildOutcome {
            succeeded,
            log,
            command,
        })
    }
}

/// Checks that `attr` is a plain attribute path such as `python3Packages.requests`.
///
/// # Errors
///
/// Returns [`PackageError::InvalidAttribute`] for anything else.
pub fn validate_attr_path(attr: &str) -> Result<(), PackageError> {
    let valid_segment = |segment: &str| {
        segment
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '\''))
    };

    if attr.split('.').all(valid_segment) {
        Ok(())
    } else {
        Err(PackageError::InvalidAttribute {
            attr: attr.to_string(),
        })
    }
}

fn parse_eval_output<T: DeserializeOwned>(expr: &str, stdout: &[u8]) -> Result<T, PackageError> {
    serde_json::from_slice::<T>(stdout).map_err(|source| PackageError::UnexpectedOutput {
        expr: expr.to_string(),
        source,
    })
}
