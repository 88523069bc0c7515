//! CLI for nixpkgs-upkeep.
//!
//! Run from a nixpkgs checkout after an updater script has changed a package.
//! Opens or amends a draft pull request for the upgrade, builds the package,
//! and marks the pull request ready for review if the build passed.

use clap::Parser;
use nixpkgs_upkeep::{RunOutcome, Runner, RunnerConfig, RunnerError, UpkeepSettings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// nixpkgs-upkeep - Propose a package upgrade as a nixpkgs pull request.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Package attribute path, e.g. `hello` or `python3Packages.requests`.
    #[arg(long, env = "PACKAGE")]
    package: String,

    /// Package version before the updater ran.
    #[arg(long, env = "PRE_VERSION")]
    pre_version: String,

    /// GitHub token for API calls and pushes to the fork.
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    token: String,

    /// CI run linked from the pull request description.
    #[arg(long, env = "GITHUB_WORKFLOW_URL")]
    workflow_url: Option<String>,

    /// Path to the nixpkgs checkout.
    #[arg(long, default_value = ".")]
    repo_path: PathBuf,

    /// Path to a settings TOML file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop before committing, pushing or opening pull requests.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // octocrab and reqwest need a process-wide rustls provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    match run(args).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Compact single-line output; `RUST_LOG` selects the level and defaults to
/// `info`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunOutcome, RunnerError> {
    let settings = UpkeepSettings::load(args.config.as_deref())?;
    let config = RunnerConfig::new(args.package, args.pre_version, args.token, args.repo_path)
        .with_workflow_url(args.workflow_url)
        .with_dry_run(args.dry_run)
        .with_settings(settings);

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run outcome.
fn print_outcome(outcome: &RunOutcome) {
    println!("\nOutcome: {}", outcome.as_str());

    match outcome {
        RunOutcome::NoChanges => {}
        RunOutcome::NotAnUpgrade {
            previous_version,
            new_version,
        } => {
            println!("  {new_version} is not newer than {previous_version}");
        }
        RunOutcome::DuplicateFound { new_version, urls } => {
            println!("  {new_version} is already proposed in:");
            for url in urls {
                println!("    {url}");
            }
        }
        RunOutcome::DryRun {
            new_version,
            would_update,
        } => match would_update {
            Some(number) => println!("  Would update #{number} to {new_version}"),
            None => println!("  Would open a new pull request for {new_version}"),
        },
        RunOutcome::Proposed {
            number,
            url,
            path,
            readiness,
        } => {
            println!("  Pull request #{number} {}: {url}", path.as_str());
            println!("  Branch: {}", path.head_branch());
            println!("  State: {}", readiness.as_str());
        }
    }
}
