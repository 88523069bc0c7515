#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod git;
pub mod hosting;
pub mod package;
pub mod proposals;
pub mod rate_limit;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod version;

pub use config::{ConfigError, UpkeepSettings, TARGET_BRANCH_ENV};
pub use git::{
    fork_remote_url, redact_url, validate_branch_name, ConflictPolicy, FetchMode, GitError,
    GitWorkspace, Workspace,
};
pub use hosting::{
    GitHubHost, HostError, NewProposal, Proposal, ProposalHost, ProposalQuery, ProposalRef,
    ProposalUpdate,
};
pub use package::{validate_attr_path, BuildOutcome, NixPackageSet, PackageError, PackageSet};
pub use proposals::{
    apply_build_outcome, find_duplicates, select_base_proposal, BaseProposalLocator,
    BranchReconciler, ForkTarget, ProposalError, ProposalText, Readiness, ReconcilePath,
    Reconciliation, TitleSearchLocator, UpgradeRequest,
};
pub use rate_limit::{
    check_rate_limit, ensure_rate_limit, wait_if_needed, RateLimitInfo, RateLimitResource,
};
pub use runner::{run_pipeline, Runner, RunnerConfig, RunnerError};
pub use summary::RunOutcome;
pub use templates::{
    create_handlebars_registry, extract_template, generate_branch_name, generate_commit_message,
    generate_pr_title, make_body, SummaryContext, TemplateError, TemplateRenderer,
    TEMPLATE_MARKER,
};
pub use version::{is_upgrade, VersionError};
