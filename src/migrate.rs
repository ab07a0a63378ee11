//! Migration of the selected projects to the destination platform
use std::fmt;

use crate::errors::TransferError;
use crate::git::{GitClient, ORIGIN};
use crate::naming::{resolve_name, NamingPolicy, TakenNames};
use crate::platform::{DestinationPlatform, Project};
use crate::utils::{is_affirmative, Prompter};
use crate::workspace::TempWorkspace;

/// Question asked once before anything is created
pub const CONFIRM_QUESTION: &str = "Confirm making repos?: ";

/// Step a project failed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Repository creation on the destination
    Create,

    /// Clone of the source project
    Clone,

    /// Update of the clone's remote
    SetRemote,

    /// Push of the branches
    Push,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Create => write!(f, "create"),
            Stage::Clone => write!(f, "clone"),
            Stage::SetRemote => write!(f, "set-remote"),
            Stage::Push => write!(f, "push"),
        }
    }
}

/// What happened to one project
#[derive(Debug)]
pub enum ProjectOutcome {
    /// Created and pushed under this name
    Done(String),

    /// The operator chose to skip it
    Skipped,

    /// Failed after the name was resolved
    Failed {
        /// Resolved destination name
        name: String,

        /// Step that failed
        stage: Stage,

        /// Cause of the failure
        error: TransferError,
    },
}

/// A project that could not be migrated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedProject {
    /// Resolved destination name
    pub name: String,

    /// Step that failed
    pub stage: Stage,

    /// Error message
    pub error: String,
}

/// Result of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Whether the operator confirmed the run
    pub confirmed: bool,

    /// Destination names created and pushed, in order
    pub record: Vec<String>,

    /// Number of projects the operator skipped
    pub skipped: usize,

    /// Projects that failed
    pub failed: Vec<FailedProject>,
}

impl MigrationReport {
    /// Print the summary for the operator
    pub fn print(&self, destination: &str) {
        if !self.confirmed {
            println!("No repository created");
            return;
        }
        println!("Repos successfully copied to {destination}:");
        for name in &self.record {
            println!("{name}");
        }
        if !self.failed.is_empty() {
            println!("Repos that could not be copied:");
            for failed in &self.failed {
                println!("{} ({}): {}", failed.name, failed.stage, failed.error);
            }
        }
    }
}

/// Drives one pass over the enumerated projects
pub struct Migrator<'a> {
    /// Username on the source platform
    current_user: String,

    /// Where repositories are created
    destination: &'a dyn DestinationPlatform,

    /// Local git operations
    git: &'a dyn GitClient,

    /// Operator interaction
    prompter: &'a mut dyn Prompter,

    /// Name derivation and comparison policy
    naming: NamingPolicy,
}

impl<'a> Migrator<'a> {
    /// Create a new Migrator
    pub fn new(
        current_user: &str,
        destination: &'a dyn DestinationPlatform,
        git: &'a dyn GitClient,
        prompter: &'a mut dyn Prompter,
        naming: NamingPolicy,
    ) -> Self {
        Self {
            current_user: current_user.to_string(),
            destination,
            git,
            prompter,
            naming,
        }
    }

    /// Ask for confirmation then migrate every project in order.
    ///
    /// `existing` are the names already present at the destination.
    /// # Errors
    /// Error if the operator can't be prompted or the workspace can't be created
    pub async fn run(
        &mut self,
        projects: &[Project],
        existing: Vec<String>,
    ) -> Result<MigrationReport, TransferError> {
        let mut report = MigrationReport::default();
        let answer = self.prompter.ask_confirmation(CONFIRM_QUESTION)?;
        if !is_affirmative(&answer) {
            return Ok(report);
        }
        report.confirmed = true;
        let workspace = TempWorkspace::create()?;
        let mut taken = TakenNames::new(self.naming, existing);
        let total = projects.len();
        for (idx, project) in projects.iter().enumerate() {
            log::debug!("[{}/{}] {}", idx + 1, total, project.name);
            match self.migrate_project(project, &mut taken, &workspace).await? {
                ProjectOutcome::Done(name) => {
                    log::info!("[{}/{}] {name}: Successfully copied", idx + 1, total);
                    report.record.push(name);
                }
                ProjectOutcome::Skipped => {
                    log::info!("[{}/{}] Skipping {}", idx + 1, total, project.name);
                    report.skipped += 1;
                }
                ProjectOutcome::Failed { name, stage, error } => {
                    log::error!("[{}/{}] {name}: Error at {stage}: {error}", idx + 1, total);
                    report.failed.push(FailedProject {
                        name,
                        stage,
                        error: error.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    /// Name, create, clone and push one project.
    ///
    /// Only prompt failures are returned as errors, every other failure is an
    /// outcome of the project.
    async fn migrate_project(
        &mut self,
        project: &Project,
        taken: &mut TakenNames,
        workspace: &TempWorkspace,
    ) -> Result<ProjectOutcome, TransferError> {
        let name = match resolve_name(
            &project.name,
            &project.owner,
            &self.current_user,
            taken,
            &mut *self.prompter,
        )? {
            Some(name) => name,
            None => return Ok(ProjectOutcome::Skipped),
        };
        let failed = |stage, error| ProjectOutcome::Failed {
            name: name.clone(),
            stage,
            error,
        };

        log::debug!("{name}: Creating repo on {}", self.destination.get_type());
        let remote_url = match self.destination.create_repository(&name, true).await {
            Ok(url) => url,
            Err(e) => return Ok(failed(Stage::Create, e)),
        };
        // the repository exists now, even if a later step fails
        taken.insert(&name);

        let clone_path = workspace.clone_path(&name);
        log::debug!(
            "{name}: Cloning '{}' to '{}'",
            project.clone_url,
            clone_path.display()
        );
        if let Err(e) = self.git.clone_repo(&project.clone_url, &clone_path).await {
            return Ok(failed(Stage::Clone, e));
        }
        log::debug!("{name}: Setting {ORIGIN} to '{remote_url}'");
        if let Err(e) = self.git.set_remote(&clone_path, ORIGIN, &remote_url).await {
            return Ok(failed(Stage::SetRemote, e));
        }
        log::debug!("{name}: Pushing branches");
        if let Err(e) = self.git.push_all_branches(&clone_path).await {
            return Ok(failed(Stage::Push, e));
        }
        Ok(ProjectOutcome::Done(name))
    }
}
