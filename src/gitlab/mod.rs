//! GitLab API module.
pub(crate) mod platform;
pub(crate) mod repo;

/// Default GitLab instance
pub(crate) const GITLAB_DEFAULT_URL: &str = "https://gitlab.com";

/// GitLab REST API prefix
const GITLAB_API_PATH: &str = "api/v4";

/// Header carrying the personal access token
const GITLAB_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Number of projects requested per page
const GITLAB_PER_PAGE: &str = "100";
