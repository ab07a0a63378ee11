//! Command line options for the git-transfer tool
use crate::{
    config::TransferConfig, errors::TransferError, platform::PlatformType, utils::main_transfer,
};
use clap::Parser;
use std::path::PathBuf;

/// git-transfer - Copy GitLab repositories to GitHub or another GitLab
#[derive(Parser, Default, Clone, Debug)]
#[command(version, about)]
pub struct TransferCli {
    /// File whose first line is the source (GitLab) token
    #[arg(required_unless_present = "show_config_path")]
    pub source_token_file: Option<PathBuf>,

    /// File whose first line is the destination token
    #[arg(required_unless_present = "show_config_path")]
    pub destination_token_file: Option<PathBuf>,

    /// The destination platform (github, gitlab) [aliases: to]
    #[arg(short, long, visible_alias = "to", value_enum)]
    pub destination: Option<PlatformType>,

    /// Url of the source GitLab instance
    #[arg(long, env = "GIT_TRANSFER_SOURCE_URL")]
    pub source_url: Option<String>,

    /// Url of the destination API (GitHub API or GitLab instance)
    #[arg(long, env = "GIT_TRANSFER_DESTINATION_URL")]
    pub destination_url: Option<String>,

    /// Source project id to skip (repeatable)
    #[arg(short, long, value_name = "ID")]
    pub exclude: Vec<u64>,

    /// Keep names as-is, compare them case-sensitively and only take owned public projects
    #[arg(long)]
    pub loose: bool,

    /// Only push the branches checked out by the clone
    #[arg(long = "local-branches-only")]
    pub local_branches_only: bool,

    /// Custom configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the current config path
    #[arg(long)]
    pub show_config_path: bool,

    /// Verbose mode (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl TransferCli {
    /// Log level matching the verbosity flag
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Run the git-transfer tool with the provided command line options
/// # Errors
/// Error if the configuration is invalid or the run can't be set up
pub async fn git_transfer_main() -> Result<(), TransferError> {
    let args = TransferCli::parse();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(env!("CARGO_CRATE_NAME"), args.log_level())
        .format_target(false)
        .format_timestamp(None)
        .init();
    let config = TransferConfig::try_new(args)?;
    if config.cli_args.show_config_path {
        println!("{}", config.config_path.display());
        return Ok(());
    }
    main_transfer(config).await.map(|_| ())
}
