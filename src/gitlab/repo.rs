//! GitLab project structs and conversion to Project struct
use crate::platform::{Project, Visibility};
use serde::{Deserialize, Serialize};

/// GitLab project as returned by `/projects`
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GitlabProject {
    /// Project id
    pub id: u64,

    /// Project name
    pub name: String,

    /// Project visibility
    #[serde(default)]
    pub visibility: Visibility,

    /// HTTPS clone url
    pub http_url_to_repo: String,

    /// SSH clone url
    pub ssh_url_to_repo: String,

    /// Owner, absent for group projects
    pub owner: Option<GitlabUser>,

    /// Namespace holding the project
    pub namespace: Option<GitlabNamespace>,
}

/// GitLab user
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GitlabUser {
    /// Username
    pub username: String,
}

/// GitLab namespace (user or group)
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GitlabNamespace {
    /// Namespace path
    pub path: String,
}

/// Body of a project creation request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GitlabProjectCreation {
    /// Project name
    pub name: String,

    /// Project visibility
    pub visibility: Visibility,
}

impl GitlabProject {
    /// Username of the owner, falling back to the namespace path
    pub fn owner_name(&self) -> String {
        match (&self.owner, &self.namespace) {
            (Some(owner), _) => owner.username.clone(),
            (None, Some(namespace)) => namespace.path.clone(),
            (None, None) => String::new(),
        }
    }
}

impl From<GitlabProject> for Project {
    fn from(project: GitlabProject) -> Self {
        Project {
            id: project.id,
            owner: project.owner_name(),
            name: project.name,
            visibility: project.visibility,
            clone_url: project.http_url_to_repo,
        }
    }
}
