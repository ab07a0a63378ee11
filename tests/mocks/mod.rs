#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

pub const GITLAB_TOKEN: &str = "glpat-source";
pub const GITHUB_TOKEN: &str = "ghp_destination";

pub fn gitlab_project_json(id: u64, name: &str, owner: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "visibility": "private",
        "http_url_to_repo": format!("https://gitlab.example.com/{owner}/{name}.git"),
        "ssh_url_to_repo": format!("git@gitlab.example.com:{owner}/{name}.git"),
        "owner": { "username": owner },
        "namespace": { "path": owner }
    })
}

pub fn gitlab_projects_mock(filters: &[(&str, &str)], page: usize, response: Value) -> Mock {
    let mut mock = Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(header("PRIVATE-TOKEN", GITLAB_TOKEN))
        .and(query_param("per_page", "100"))
        .and(query_param("page", page.to_string()));
    for (key, value) in filters {
        mock = mock.and(query_param(*key, *value));
    }
    mock.respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
}

pub fn github_repo_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "private": true,
        "clone_url": format!("https://github.com/alice/{name}.git"),
        "html_url": format!("https://github.com/alice/{name}")
    })
}

pub fn github_repos_mock(page: usize, response: Value) -> Mock {
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(header("authorization", format!("Bearer {GITHUB_TOKEN}").as_str()))
        .and(header("X-GitHub-Api-Version", "2022-11-28"))
        .and(query_param("affiliation", "owner"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
}
