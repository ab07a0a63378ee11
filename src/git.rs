//! Local git operations: clone, remote update and push
use git2::{BranchType, Repository};
use std::{ffi::OsString, path::Path, process::Stdio};
use tokio::process::Command;

use crate::errors::{TransferError, TransferErrorKind};
use crate::platform::TransferFuture;

/// Name of the remote created by `git clone`
pub const ORIGIN: &str = "origin";

/// Local git operations needed to move one repository
pub trait GitClient: Sync + Send {
    /// Clone `url` into `path`
    fn clone_repo(&self, url: &str, path: &Path) -> TransferFuture<'_, ()>;

    /// Point `remote` of the repository at `path` to `url`
    fn set_remote(&self, path: &Path, remote: &str, url: &str) -> TransferFuture<'_, ()>;

    /// Push every local branch of the repository at `path` to `origin`
    fn push_all_branches(&self, path: &Path) -> TransferFuture<'_, ()>;
}

/// [`GitClient`] running the `git` binary, output suppressed
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    /// Only push what `git clone` checked out
    local_branches_only: bool,
}

impl GitCli {
    /// Create a new GitCli
    pub fn new(local_branches_only: bool) -> Self {
        Self {
            local_branches_only,
        }
    }
}

/// Run `git` with `args`, failing on a non-zero exit status
async fn run_git<I, S>(args: I) -> Result<(), TransferError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut command = Command::new("git");
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    log::trace!("Running {command:?}");
    let status = command.status().await?;
    if !status.success() {
        return Err(TransferError::new(TransferErrorKind::GitCommand)
            .with_text(&format!("{command:?} exited with {status}")));
    }
    Ok(())
}

impl GitClient for GitCli {
    fn clone_repo(&self, url: &str, path: &Path) -> TransferFuture<'_, ()> {
        let args: Vec<OsString> = vec!["clone".into(), url.into(), path.into()];
        Box::pin(run_git(args))
    }

    fn set_remote(&self, path: &Path, remote: &str, url: &str) -> TransferFuture<'_, ()> {
        let args: Vec<OsString> = vec![
            "-C".into(),
            path.into(),
            "remote".into(),
            "set-url".into(),
            remote.into(),
            url.into(),
        ];
        Box::pin(run_git(args))
    }

    fn push_all_branches(&self, path: &Path) -> TransferFuture<'_, ()> {
        let path = path.to_path_buf();
        Box::pin(async move {
            if !self.local_branches_only {
                let repo_path = path.clone();
                let created = tokio::task::spawn_blocking(move || track_remote_branches(&repo_path))
                    .await
                    .map_err(|e| TransferError::new_with_source("Branch tracking task failed", e))??;
                log::debug!("Created {created} local branches in {}", path.display());
            }
            let args: Vec<OsString> = vec![
                "-C".into(),
                path.into_os_string(),
                "push".into(),
                "--all".into(),
            ];
            run_git(args).await
        })
    }
}

/// Create a local branch for every `origin/*` branch that has none, so that
/// `git push --all` sends every branch of the source.
///
/// Returns the number of branches created.
/// # Errors
/// Error if the repository can't be opened or a branch can't be created
pub fn track_remote_branches(path: &Path) -> Result<usize, TransferError> {
    let repo = Repository::open(path)?;
    let prefix = format!("{ORIGIN}/");
    let mut remote_branches: Vec<(String, String)> = vec![];
    for branch in repo.branches(Some(BranchType::Remote))? {
        let (branch, _) = branch?;
        let Some(name) = branch.name()? else {
            continue;
        };
        let Some(local_name) = name.strip_prefix(&prefix) else {
            continue;
        };
        if local_name == "HEAD" || branch.get().symbolic_target().is_some() {
            continue;
        }
        remote_branches.push((name.to_string(), local_name.to_string()));
    }
    let mut created = 0;
    for (remote_name, local_name) in remote_branches {
        if repo.find_branch(&local_name, BranchType::Local).is_ok() {
            continue;
        }
        let commit = repo
            .find_branch(&remote_name, BranchType::Remote)?
            .get()
            .peel_to_commit()?;
        let mut local = repo.branch(&local_name, &commit, false)?;
        local.set_upstream(Some(&remote_name))?;
        log::trace!("Tracking {remote_name} as {local_name}");
        created += 1;
    }
    Ok(created)
}
