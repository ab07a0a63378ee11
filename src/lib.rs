//! # git-transfer
//!
//! Copy every repository of a GitLab account to GitHub or to another GitLab
//!
//! ## Usage
//!
//! ```txt
//! Usage: git-transfer [OPTIONS] <SOURCE_TOKEN_FILE> <DESTINATION_TOKEN_FILE>
//!
//! Arguments:
//!   <SOURCE_TOKEN_FILE>       File whose first line is the source (GitLab) token
//!   <DESTINATION_TOKEN_FILE>  File whose first line is the destination token
//!
//! Options:
//!   -d, --destination <DESTINATION>    The destination platform (github, gitlab) [aliases: to]
//!       --source-url <SOURCE_URL>      Url of the source GitLab instance
//!       --destination-url <URL>        Url of the destination API (GitHub API or GitLab instance)
//!   -e, --exclude <ID>                 Source project id to skip (repeatable)
//!       --loose                        Keep names as-is, compare them case-sensitively and only take owned public projects
//!       --local-branches-only          Only push the branches checked out by the clone
//!   -c, --config <CONFIG>              Custom configuration file path
//!       --show-config-path             Show the current config path
//!   -v, --verbose...                   Verbose mode (-v, -vv)
//!   -h, --help                         Print help
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::cargo,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![warn(clippy::multiple_crate_versions)]

pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod git;
pub(crate) mod migrate;
pub(crate) mod naming;
pub(crate) mod platform;
pub(crate) mod projects;
pub(crate) mod utils;
pub(crate) mod workspace;

mod github;
mod gitlab;

pub use cli::{git_transfer_main, TransferCli};
pub use config::{read_credential, ConfigData, Settings, TransferConfig};
pub use errors::{TransferError, TransferErrorKind};
pub use git::{track_remote_branches, GitCli, GitClient};
pub use github::platform::GithubPlatform;
pub use gitlab::platform::GitlabPlatform;
pub use migrate::{MigrationReport, Migrator, ProjectOutcome, Stage};
pub use naming::{base_name, resolve_name, NamingPolicy, TakenNames};
pub use platform::{
    DestinationPlatform, PlatformType, Project, ProjectQuery, SourcePlatform, TransferFuture,
    Visibility,
};
pub use projects::list_migratable_projects;
pub use utils::{is_affirmative, main_transfer, ConsolePrompter, Prompter};
pub use workspace::TempWorkspace;
