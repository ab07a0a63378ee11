//! GitHub repository structs
use serde::{Deserialize, Serialize};

/// GitHub Repo
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct RepoGithub {
    /// Repository ID
    pub id: u64,

    /// Repository name
    pub name: String,

    /// Repository private status
    pub private: bool,

    /// HTTPS clone url
    pub clone_url: String,
}

/// Body of a repository creation request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RepoGithubCreation {
    /// Repository name
    pub name: String,

    /// Repository private status
    pub private: bool,
}

/// GitHub user
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct UserGithub {
    /// Login of the user
    pub login: String,
}
