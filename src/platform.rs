//! Platform abstractions for the source and destination hosts
use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

use crate::errors::TransferError;

/// Boxed future returned by the platform and git traits
pub type TransferFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TransferError>> + Send + 'a>>;

/// Project visibility on a hosting platform
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only visible to members
    #[default]
    Private,

    /// Visible to logged-in users of the instance
    Internal,

    /// Visible to everyone
    Public,
}

/// A source-side project
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct Project {
    /// Identifier of the project on the source platform
    pub id: u64,

    /// Name of the project
    pub name: String,

    /// Username of the project owner (namespace path for group projects)
    pub owner: String,

    /// Visibility of the project
    pub visibility: Visibility,

    /// HTTPS clone url
    pub clone_url: String,
}

/// Which projects to request from the source platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectQuery {
    /// Every private project the user can see
    Private,

    /// Public projects owned by the user
    PublicOwned,

    /// Public projects where the user has at least this access level
    PublicWithAccess(u8),
}

/// Platform projects are migrated from
pub trait SourcePlatform: Sync + Send {
    /// Username of the authenticated user
    fn current_username(&self) -> TransferFuture<'_, String>;

    /// Every project matching `query`, all pages included
    fn list_projects(&self, query: ProjectQuery) -> TransferFuture<'_, Vec<Project>>;
}

/// Platform projects are migrated to
pub trait DestinationPlatform: Sync + Send {
    /// Username of the authenticated user
    fn current_username(&self) -> TransferFuture<'_, String>;

    /// Names of every repository owned by the authenticated user
    fn list_repository_names(&self) -> TransferFuture<'_, Vec<String>>;

    /// Create a repository and return the remote url `git` should push to
    fn create_repository(&self, name: &str, private: bool) -> TransferFuture<'_, String>;

    /// Kind of the platform
    fn get_type(&self) -> PlatformType;
}

/// Supported platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    /// GitLab (gitlab.com or self-hosted)
    Gitlab,

    /// GitHub
    #[default]
    Github,
}

impl PlatformType {
    /// Name of the platform as its owners write it
    pub fn display_name(&self) -> &'static str {
        match self {
            PlatformType::Gitlab => "GitLab",
            PlatformType::Github => "GitHub",
        }
    }
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformType::Gitlab => write!(f, "gitlab"),
            PlatformType::Github => write!(f, "github"),
        }
    }
}
