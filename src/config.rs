//! Configuration handling
use std::{
    collections::HashSet,
    fs::{create_dir_all, read_to_string, File},
    io::{BufRead, BufReader, ErrorKind, Write},
    path::{Path, PathBuf},
};

use home::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    cli::TransferCli,
    errors::{TransferError, TransferErrorKind},
    github::GITHUB_API_URL,
    gitlab::GITLAB_DEFAULT_URL,
    naming::NamingPolicy,
    platform::{PlatformType, ProjectQuery},
};

/// Access level GitLab grants to maintainers
pub const MAINTAINER_ACCESS_LEVEL: u8 = 30;

/// Configuration data
#[derive(Default, Clone, Debug)]
pub struct TransferConfig {
    /// path to the configuration file
    pub config_path: PathBuf,

    /// actual configuration data
    pub config_data: ConfigData,

    /// CLI arguments
    pub cli_args: TransferCli,
}

/// Content of the configuration file
#[derive(Deserialize, Serialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ConfigData {
    /// Url of the source GitLab instance
    pub source_url: Option<String>,

    /// Url of the destination API (GitHub API or GitLab instance)
    pub destination_url: Option<String>,

    /// Destination platform kind
    pub destination: Option<PlatformType>,

    /// Source project ids never migrated
    #[serde(default)]
    pub excluded_ids: Vec<u64>,

    /// Keep project names as-is and compare them case-sensitively
    pub loose: Option<bool>,

    /// Minimum access level for public projects in strict mode
    pub min_access_level: Option<u8>,

    /// Push only the branches present locally after the clone
    pub local_branches_only: Option<bool>,
}

/// Settings of one run, resolved from the CLI, the config file and defaults
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Url of the source GitLab instance
    pub source_url: String,

    /// Url of the destination API
    pub destination_url: String,

    /// Destination platform kind
    pub destination: PlatformType,

    /// Source project ids never migrated
    pub excluded_ids: HashSet<u64>,

    /// Name derivation and comparison policy
    pub naming: NamingPolicy,

    /// Which public projects are migrated next to the private ones
    pub public_projects: ProjectQuery,

    /// Push only the branches present locally after the clone
    pub local_branches_only: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: GITLAB_DEFAULT_URL.to_string(),
            destination_url: GITHUB_API_URL.to_string(),
            destination: PlatformType::Github,
            excluded_ids: HashSet::new(),
            naming: NamingPolicy::STRICT,
            public_projects: ProjectQuery::PublicWithAccess(MAINTAINER_ACCESS_LEVEL),
            local_branches_only: false,
        }
    }
}

impl TransferConfig {
    /// Create a new Config object from the CLI arguments
    /// # Errors
    /// Error if the config file can't be opened or parsed
    pub fn try_new(cli_args: TransferCli) -> Result<Self, TransferError> {
        let config_path = match cli_args.config.clone() {
            Some(p) => p,
            None => Self::get_config_path()?,
        };
        let contents = read_to_string(&config_path)
            .map_err(|e| TransferError::new_with_source("Unable to open config file", e))?;
        let config_data = toml::from_str(&contents)?;
        Ok(TransferConfig {
            config_path,
            cli_args,
            config_data,
        })
    }

    /// Get the path to the config file
    /// # Errors
    /// Error if the home directory can't be found
    pub fn get_config_path() -> Result<PathBuf, TransferError> {
        let home_dir = match home_dir() {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err("Unable to get your home dir! home::home_dir() isn't working".into()),
        };
        let config_directory = home_dir.join(".config").join(".git-transfer");
        let config_path = config_directory.join("config.toml");
        create_dir_all(config_directory)
            .map_err(|e| TransferError::new_with_source("Unable to create config dir", e))?;
        if !config_path.exists() {
            let mut file = File::create(&config_path)
                .map_err(|e| TransferError::new_with_source("Unable to create config file", e))?;
            file.write_all(b"")
                .map_err(|e| TransferError::new_with_source("Unable to write to config file", e))?;
        }
        Ok(config_path)
    }

    /// Resolve the settings of the run, CLI values taking precedence
    pub fn settings(&self) -> Settings {
        let args = &self.cli_args;
        let data = &self.config_data;
        let destination = args
            .destination
            .or(data.destination)
            .unwrap_or_default();
        let destination_url = args
            .destination_url
            .clone()
            .or_else(|| data.destination_url.clone())
            .unwrap_or_else(|| match destination {
                PlatformType::Github => GITHUB_API_URL.to_string(),
                PlatformType::Gitlab => GITLAB_DEFAULT_URL.to_string(),
            });
        let loose = args.loose || data.loose.unwrap_or(false);
        let public_projects = if loose {
            ProjectQuery::PublicOwned
        } else {
            ProjectQuery::PublicWithAccess(
                data.min_access_level.unwrap_or(MAINTAINER_ACCESS_LEVEL),
            )
        };
        Settings {
            source_url: args
                .source_url
                .clone()
                .or_else(|| data.source_url.clone())
                .unwrap_or_else(|| GITLAB_DEFAULT_URL.to_string()),
            destination_url,
            destination,
            excluded_ids: data
                .excluded_ids
                .iter()
                .chain(args.exclude.iter())
                .copied()
                .collect(),
            naming: if loose {
                NamingPolicy::LOOSE
            } else {
                NamingPolicy::STRICT
            },
            public_projects,
            local_branches_only: args.local_branches_only
                || data.local_branches_only.unwrap_or(false),
        }
    }
}

/// Read a credential: the first line of the file, trailing whitespace removed
/// # Errors
/// Error if the file does not exist, can't be read or has an empty first line
pub fn read_credential(path: &Path) -> Result<String, TransferError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TransferError::new(TransferErrorKind::Credentials)
            .with_text(&format!("{} does not exist", path.display())),
        _ => TransferError::new(TransferErrorKind::Credentials).with_source(e),
    })?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| TransferError::new(TransferErrorKind::Credentials).with_source(e))?;
    let credential = line.trim_end().to_string();
    if credential.is_empty() {
        return Err(TransferError::new(TransferErrorKind::Credentials)
            .with_text(&format!("{} is empty", path.display())));
    }
    Ok(credential)
}
