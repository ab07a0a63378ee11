mod mocks;

use git_transfer::{DestinationPlatform, GithubPlatform, PlatformType, TransferErrorKind};
use mocks::{github_repo_json, github_repos_mock, GITHUB_TOKEN};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn platform(server: &MockServer) -> GithubPlatform {
    GithubPlatform::new(&server.uri(), GITHUB_TOKEN.to_string()).unwrap()
}

#[tokio::test]
async fn current_user_is_the_login() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", format!("Bearer {GITHUB_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "alice",
            "id": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let github = platform(&mock_server);
    assert_eq!(github.current_username().await.unwrap(), "alice");
    assert_eq!(github.get_type(), PlatformType::Github);
}

#[tokio::test]
async fn repository_names_span_every_page() {
    let mock_server = MockServer::start().await;
    github_repos_mock(
        1,
        json!([github_repo_json(1, "alpha"), github_repo_json(2, "beta")]),
    )
    .mount(&mock_server)
    .await;
    github_repos_mock(2, json!([github_repo_json(3, "gamma")]))
        .mount(&mock_server)
        .await;
    github_repos_mock(3, json!([])).mount(&mock_server).await;

    let github = platform(&mock_server);
    let names = github.list_repository_names().await.unwrap();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn bad_credentials_are_an_authentication_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials"
        })))
        .mount(&mock_server)
        .await;

    let github = platform(&mock_server);
    let err = github.list_repository_names().await.unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(err.platform(), Some(&PlatformType::Github));
}

#[tokio::test]
async fn created_repository_is_private_and_returns_clone_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(body_json(json!({ "name": "alpha", "private": true })))
        .respond_with(ResponseTemplate::new(201).set_body_json(github_repo_json(10, "alpha")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let github = platform(&mock_server);
    let remote = github.create_repository("alpha", true).await.unwrap();
    assert_eq!(remote, "https://github.com/alice/alpha.git");
}

#[tokio::test]
async fn existing_repository_fails_creation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Repository creation failed.",
            "errors": [{ "resource": "Repository", "code": "custom", "field": "name",
                         "message": "name already exists on this account" }]
        })))
        .mount(&mock_server)
        .await;

    let github = platform(&mock_server);
    let err = github.create_repository("alpha", true).await.unwrap_err();
    assert_eq!(err.kind(), &TransferErrorKind::RepoCreation);
    assert!(err.to_string().contains("name already exists"));
}
