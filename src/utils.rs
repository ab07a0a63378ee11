//! Utility functions
use std::path::Path;
use url::Url;

use crate::config::{read_credential, TransferConfig};
use crate::errors::{TransferError, TransferErrorKind};
use crate::git::GitCli;
use crate::github::platform::GithubPlatform;
use crate::gitlab::platform::GitlabPlatform;
use crate::migrate::{MigrationReport, Migrator};
use crate::platform::{DestinationPlatform, PlatformType, SourcePlatform};
use crate::projects::list_migratable_projects;

/// Operator interaction needed during a run
pub trait Prompter {
    /// Ask `question` and return the raw answer
    /// # Errors
    /// Error if the answer can't be read
    fn ask_confirmation(&mut self, question: &str) -> Result<String, TransferError>;

    /// Ask for a replacement of the taken name `candidate`; empty means skip
    /// # Errors
    /// Error if the answer can't be read
    fn ask_rename(&mut self, candidate: &str) -> Result<String, TransferError>;
}

/// [`Prompter`] reading answers from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn ask_confirmation(&mut self, question: &str) -> Result<String, TransferError> {
        print!("{question}");
        input()
    }

    fn ask_rename(&mut self, candidate: &str) -> Result<String, TransferError> {
        print!("{candidate} already exists, input a new name or enter to skip: ");
        input()
    }
}

/// Whether an answer confirms: "y" or "yes", any case
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Get input from the user
pub(crate) fn input() -> Result<String, TransferError> {
    use std::io::{stdin, stdout, Write};
    let mut s = String::new();
    let _ = stdout().flush();
    stdin()
        .read_line(&mut s)
        .map_err(|e| TransferError::new_with_source("Did not enter a correct string", e))?;
    if let Some('\n') = s.chars().next_back() {
        s.pop();
    }
    if let Some('\r') = s.chars().next_back() {
        s.pop();
    }
    Ok(s)
}

/// Validate an http(s) url and return it without trailing slash
/// # Errors
/// Error if the url is malformed or not http(s)
pub(crate) fn parse_base_url(url: &str) -> Result<String, TransferError> {
    let parsed = Url::parse(url)?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none() {
        return Err(TransferError::new(TransferErrorKind::Config)
            .with_text(&format!("'{url}' is not an http(s) url")));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Read the token of the `role` side from its token file
fn read_token_file(path: Option<&Path>, role: &str) -> Result<String, TransferError> {
    match path {
        Some(path) => read_credential(path),
        None => Err(TransferError::new(TransferErrorKind::Credentials)
            .with_text(&format!("Missing {role} token file"))),
    }
}

/// Turn a setup failure into the message naming the likely misconfiguration
fn setup_error(error: TransferError, platform: PlatformType) -> TransferError {
    let name = platform.display_name();
    if error.is_connection() {
        log::debug!("{error}");
        format!("Connection failed. Check {name} url").into()
    } else if error.is_authentication() {
        log::debug!("{error}");
        format!("Authentication failed. Check {name} token").into()
    } else {
        error
    }
}

/// Main function to transfer repositories
/// # Errors
/// Error if the run can't be set up
pub async fn main_transfer(config: TransferConfig) -> Result<MigrationReport, TransferError> {
    let settings = config.settings();
    let source_token = read_token_file(config.cli_args.source_token_file.as_deref(), "source")?;
    let destination_token = read_token_file(
        config.cli_args.destination_token_file.as_deref(),
        "destination",
    )?;

    let source = GitlabPlatform::new(&settings.source_url, source_token)?;
    let current_user = SourcePlatform::current_username(&source)
        .await
        .map_err(|e| setup_error(e, PlatformType::Gitlab))?;
    log::info!("Authenticated on {} as {current_user}", settings.source_url);

    let projects = list_migratable_projects(&source, &settings)
        .await
        .map_err(|e| setup_error(e, PlatformType::Gitlab))?;
    log::info!("Number of projects to copy: {}", projects.len());

    let destination: Box<dyn DestinationPlatform> = match settings.destination {
        PlatformType::Github => Box::new(GithubPlatform::new(
            &settings.destination_url,
            destination_token,
        )?),
        PlatformType::Gitlab => Box::new(GitlabPlatform::new(
            &settings.destination_url,
            destination_token,
        )?),
    };
    let destination_user = destination
        .current_username()
        .await
        .map_err(|e| setup_error(e, settings.destination))?;
    let existing = destination
        .list_repository_names()
        .await
        .map_err(|e| setup_error(e, settings.destination))?;
    log::info!(
        "Number of repos of {destination_user} in destination: {} ({})",
        existing.len(),
        settings.destination_url
    );

    let git = GitCli::new(settings.local_branches_only);
    let mut prompter = ConsolePrompter;
    let report = Migrator::new(
        &current_user,
        destination.as_ref(),
        &git,
        &mut prompter,
        settings.naming,
    )
    .run(&projects, existing)
    .await?;
    report.print(settings.destination.display_name());
    Ok(report)
}
