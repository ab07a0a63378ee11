//! Temporary working directory of a run
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use std::{
    fs::{create_dir, remove_dir_all},
    path::{Path, PathBuf},
};

use crate::errors::TransferError;

/// Directory under the OS temp dir, removed with everything in it when dropped
#[derive(Debug)]
pub struct TempWorkspace {
    /// Root of the workspace
    path: PathBuf,
}

impl TempWorkspace {
    /// Create a fresh, uniquely named workspace
    /// # Errors
    /// Error if the directory can't be created
    pub fn create() -> Result<Self, TransferError> {
        let rand_string: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(10)
            .map(char::from)
            .collect();
        let path = std::env::temp_dir().join(format!("git-transfer-{rand_string}"));
        create_dir(&path)?;
        log::debug!("Created workspace {}", path.display());
        Ok(Self { path })
    }

    /// Root of the workspace
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the clone of a project named `name` goes.
    ///
    /// Always a direct child of [`Self::path`]: separators become `-` and
    /// `.`/`..` get a `_` prefix.
    pub fn clone_path(&self, name: &str) -> PathBuf {
        let dir_name = name.replace(['/', '\\', ':'], "-");
        match dir_name.as_str() {
            "" | "." | ".." => self.path.join(format!("_{dir_name}")),
            _ => self.path.join(dir_name),
        }
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        log::debug!("Cleaning up {}", self.path.display());
        if let Err(e) = remove_dir_all(&self.path) {
            log::warn!("Unable to remove {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn workspace_is_removed_on_drop() {
        let workspace = TempWorkspace::create().unwrap();
        let root = workspace.path().to_path_buf();
        let nested = workspace.clone_path("alpha").join("refs");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        assert!(root.is_dir());
        drop(workspace);
        assert!(!root.exists());
    }

    #[test]
    fn workspace_is_removed_on_panic() {
        let root = std::panic::catch_unwind(|| {
            let workspace = TempWorkspace::create().unwrap();
            let root = workspace.path().to_path_buf();
            std::fs::write(root.join("marker"), "x").unwrap();
            if root.exists() {
                std::panic::panic_any(root);
            }
        })
        .unwrap_err();
        let root = root.downcast::<PathBuf>().unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn workspaces_are_unique() {
        let first = TempWorkspace::create().unwrap();
        let second = TempWorkspace::create().unwrap();
        assert_ne!(first.path(), second.path());
        assert_eq!(first.clone_path("beta"), first.path().join("beta"));
    }

    #[test]
    fn clone_path_stays_in_workspace() {
        let workspace = TempWorkspace::create().unwrap();
        for name in ["../x", "/abs/x", "..", ".", "", "a\\..\\b", "C:x", "../../etc"] {
            let path = workspace.clone_path(name);
            assert_eq!(path.parent(), Some(workspace.path()), "{name}");
            assert!(path.file_name().is_some(), "{name}");
        }
        assert_eq!(
            workspace.clone_path("../alpha2"),
            workspace.path().join("..-alpha2")
        );
        assert_eq!(
            workspace.clone_path("/home/op/alpha2"),
            workspace.path().join("-home-op-alpha2")
        );
    }
}
