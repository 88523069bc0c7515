//! In-memory collaborators for driving the pipeline without git, nix or GitHub.

#![allow(dead_code)]

pub mod mock_host;
pub mod mock_packages;
pub mod mock_workspace;

pub use mock_host::MockHost;
pub use mock_packages::MockPackages;
pub use mock_workspace::MockWorkspace;

pub const BOT: &str = "botnk";
