//! Settings for the upkeep run.
//!
//! Everything has a default matching upstream nixpkgs, so the settings file is
//! optional. A file only needs the keys it changes:
//!
//! ```toml
//! bot-user = "upkeep-bot"
//! bot-email = "upkeep-bot@example.com"
//! cc = ["maintainer"]
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{UpkeepSettings, TARGET_BRANCH_ENV};
