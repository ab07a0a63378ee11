//! GitLab Platform
use super::{
    repo::{GitlabProject, GitlabProjectCreation, GitlabUser},
    GITLAB_API_PATH, GITLAB_PER_PAGE, GITLAB_TOKEN_HEADER,
};
use crate::{
    errors::{TransferError, TransferErrorKind},
    platform::{
        DestinationPlatform, PlatformType, Project, ProjectQuery, SourcePlatform, TransferFuture,
        Visibility,
    },
    utils::parse_base_url,
};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Response, StatusCode,
};

/// GitLab Platform, usable as source and as destination
#[derive(Debug, Clone)]
pub struct GitlabPlatform {
    /// Instance url without trailing slash
    base_url: String,

    /// GitLab token
    token: String,

    /// Reqwest client
    client: reqwest::Client,
}

impl GitlabPlatform {
    /// Create a new GitlabPlatform for the instance at `url`
    /// # Errors
    /// Error if the url is malformed
    pub fn new(url: &str, token: String) -> Result<Self, TransferError> {
        Ok(Self {
            base_url: parse_base_url(url)?,
            token,
            client: reqwest::Client::new(),
        })
    }

    /// Full url of an API endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{GITLAB_API_PATH}/{endpoint}", self.base_url)
    }

    /// Request every page of `/projects` with the given filters
    async fn get_all_projects(
        &self,
        filters: &[(&str, String)],
    ) -> Result<Vec<GitlabProject>, TransferError> {
        let url = self.api_url("projects");
        let mut page: usize = 1;
        let mut all_projects = vec![];
        loop {
            let mut query: Vec<(&str, String)> = vec![
                ("per_page", GITLAB_PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            query.extend(filters.iter().cloned());
            let response = self
                .client
                .get(&url)
                .header(GITLAB_TOKEN_HEADER, &self.token)
                .header(ACCEPT, "application/json")
                .query(&query)
                .send()
                .await?;
            let response = check_response(response, TransferErrorKind::GetAllRepos).await?;
            let text = response.text().await?;
            let projects: Vec<GitlabProject> = serde_json::from_str(&text)?;
            log::debug!("Requested gitlab (page {}): {}", page, projects.len());
            if projects.is_empty() {
                break;
            }
            all_projects.extend(projects);
            page += 1;
        }
        Ok(all_projects)
    }

    /// Username of the token owner
    async fn fetch_username(&self) -> Result<String, TransferError> {
        let response = self
            .client
            .get(self.api_url("user"))
            .header(GITLAB_TOKEN_HEADER, &self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = check_response(response, TransferErrorKind::GetUser).await?;
        let user: GitlabUser = serde_json::from_str(&response.text().await?)?;
        Ok(user.username)
    }
}

/// Map an unsuccessful response to an error of the given kind
async fn check_response(
    response: Response,
    kind: TransferErrorKind,
) -> Result<Response, TransferError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await?;
    let kind = match status {
        StatusCode::UNAUTHORIZED => TransferErrorKind::Authentication,
        _ => kind,
    };
    Err(TransferError::new(kind)
        .with_platform(PlatformType::Gitlab)
        .with_text(&format!("{status} {text}")))
}

impl SourcePlatform for GitlabPlatform {
    fn current_username(&self) -> TransferFuture<'_, String> {
        Box::pin(self.fetch_username())
    }

    fn list_projects(&self, query: ProjectQuery) -> TransferFuture<'_, Vec<Project>> {
        Box::pin(async move {
            let filters = match query {
                ProjectQuery::Private => vec![("visibility", "private".to_string())],
                ProjectQuery::PublicOwned => vec![
                    ("visibility", "public".to_string()),
                    ("owned", "true".to_string()),
                ],
                ProjectQuery::PublicWithAccess(level) => vec![
                    ("visibility", "public".to_string()),
                    ("min_access_level", level.to_string()),
                ],
            };
            let projects = self.get_all_projects(&filters).await?;
            Ok(projects.into_iter().map(Project::from).collect())
        })
    }
}

impl DestinationPlatform for GitlabPlatform {
    fn current_username(&self) -> TransferFuture<'_, String> {
        Box::pin(self.fetch_username())
    }

    fn list_repository_names(&self) -> TransferFuture<'_, Vec<String>> {
        Box::pin(async move {
            let projects = self
                .get_all_projects(&[("owned", "true".to_string())])
                .await?;
            Ok(projects.into_iter().map(|p| p.name).collect())
        })
    }

    fn create_repository(&self, name: &str, private: bool) -> TransferFuture<'_, String> {
        let json_body = GitlabProjectCreation {
            name: name.to_string(),
            visibility: if private {
                Visibility::Private
            } else {
                Visibility::Public
            },
        };
        Box::pin(async move {
            let response = self
                .client
                .post(self.api_url("projects"))
                .header(GITLAB_TOKEN_HEADER, &self.token)
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json")
                .json(&json_body)
                .send()
                .await?;
            let response = check_response(response, TransferErrorKind::RepoCreation).await?;
            let project: GitlabProject = serde_json::from_str(&response.text().await?)?;
            Ok(project.ssh_url_to_repo)
        })
    }

    fn get_type(&self) -> PlatformType {
        PlatformType::Gitlab
    }
}
