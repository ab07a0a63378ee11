//! Github Platform
use super::{
    repo::{RepoGithub, RepoGithubCreation, UserGithub},
    GITHUB_API_HEADER, GITHUB_API_VERSION, GITHUB_PER_PAGE,
};
use crate::{
    errors::{TransferError, TransferErrorKind},
    platform::{DestinationPlatform, PlatformType, TransferFuture},
    utils::parse_base_url,
};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
    Method, RequestBuilder, Response, StatusCode,
};

/// Github Platform
#[derive(Debug, Clone)]
pub struct GithubPlatform {
    /// API url without trailing slash
    api_url: String,

    /// Github token
    token: String,

    /// Reqwest client
    client: reqwest::Client,
}

impl GithubPlatform {
    /// Create a new GithubPlatform talking to the API at `api_url`
    /// # Errors
    /// Error if the url is malformed
    pub fn new(api_url: &str, token: String) -> Result<Self, TransferError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            token,
            client: reqwest::Client::new(),
        })
    }

    /// Request with the headers every endpoint expects
    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{endpoint}", self.api_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, env!("CARGO_PKG_NAME"))
            .header(GITHUB_API_HEADER, GITHUB_API_VERSION)
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
        .with_platform(PlatformType::Github)
        .with_text(&format!("{status} {text}")))
}

impl DestinationPlatform for GithubPlatform {
    fn current_username(&self) -> TransferFuture<'_, String> {
        Box::pin(async move {
            let response = self.request(Method::GET, "user").send().await?;
            let response = check_response(response, TransferErrorKind::GetUser).await?;
            let user: UserGithub = serde_json::from_str(&response.text().await?)?;
            Ok(user.login)
        })
    }

    fn list_repository_names(&self) -> TransferFuture<'_, Vec<String>> {
        Box::pin(async move {
            let mut page: usize = 1;
            let mut all_names = vec![];
            loop {
                let page_str = page.to_string();
                let response = self
                    .request(Method::GET, "user/repos")
                    .query(&[
                        ("affiliation", "owner"),
                        ("per_page", GITHUB_PER_PAGE),
                        ("page", page_str.as_str()),
                    ])
                    .send()
                    .await?;
                let response = check_response(response, TransferErrorKind::GetAllRepos).await?;
                let text = response.text().await?;
                let repos: Vec<RepoGithub> = serde_json::from_str(&text)?;
                log::debug!("Requested github (page {}): {}", page, repos.len());
                if repos.is_empty() {
                    break;
                }
                all_names.extend(repos.into_iter().map(|r| r.name));
                page += 1;
            }
            Ok(all_names)
        })
    }

    fn create_repository(&self, name: &str, private: bool) -> TransferFuture<'_, String> {
        let json_body = RepoGithubCreation {
            name: name.to_string(),
            private,
        };
        Box::pin(async move {
            let response = self
                .request(Method::POST, "user/repos")
                .json(&json_body)
                .send()
                .await?;
            let response = check_response(response, TransferErrorKind::RepoCreation).await?;
            let repo: RepoGithub = serde_json::from_str(&response.text().await?)?;
            Ok(repo.clone_url)
        })
    }

    fn get_type(&self) -> PlatformType {
        PlatformType::Github
    }
}
