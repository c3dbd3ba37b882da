mod common;

use axum::http::StatusCode;
use common::{FakeIdentity, config_for};
use copilot_demo_core::{DirectoryError, UserDirectory};
use directory_client::{DirectoryConfig, GraphDirectory, TokenIssuer};
use serde_json::json;

#[tokio::test]
async fn test_lists_users_with_client_credentials() {
    let fake = FakeIdentity::new();
    let base_url = fake.spawn().await;

    let directory = GraphDirectory::new(config_for(&base_url));
    let users = directory.list_users().await.expect("users should be listed");

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].display_name.as_deref(), Some("Adele Vance"));
    assert_eq!(users[0].principal_name.as_deref(), Some("AdeleV@contoso.com"));
    assert_eq!(fake.token_requests(), 1);
    assert_eq!(fake.users_requests(), 1);
}

#[tokio::test]
async fn test_token_is_not_cached_between_calls() {
    let fake = FakeIdentity::new();
    let base_url = fake.spawn().await;

    let directory = GraphDirectory::new(config_for(&base_url));
    directory.list_users().await.expect("first call");
    directory.list_users().await.expect("second call");

    assert_eq!(fake.token_requests(), 2);
}

#[tokio::test]
async fn test_missing_credentials_skip_network() {
    let fake = FakeIdentity::new();
    let base_url = fake.spawn().await;

    let config = DirectoryConfig::new(Some("contoso".to_string()), None, None)
        .with_authority_host(&base_url)
        .with_graph_base_url(&base_url);
    let err = GraphDirectory::new(config)
        .list_users()
        .await
        .expect_err("credentials are incomplete");

    assert_eq!(err, DirectoryError::MissingCredentials);
    assert_eq!(fake.token_requests(), 0);
}

#[tokio::test]
async fn test_rejected_token_request() {
    let mut fake = FakeIdentity::new();
    fake.token_status = StatusCode::UNAUTHORIZED;
    let base_url = fake.spawn().await;

    let err = TokenIssuer::new(config_for(&base_url), reqwest::Client::new())
        .acquire()
        .await
        .expect_err("token should be rejected");

    match err {
        DirectoryError::TokenUnavailable(message) => {
            assert!(message.starts_with("HTTP 401"), "{message}");
            assert!(message.contains("Invalid client secret"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fake.users_requests(), 0);
}

#[tokio::test]
async fn test_directory_error_carries_status_and_body() {
    let mut fake = FakeIdentity::new();
    fake.users_status = StatusCode::FORBIDDEN;
    fake.users_body = json!({"error": {"code": "Authorization_RequestDenied"}});
    let base_url = fake.spawn().await;

    let err = GraphDirectory::new(config_for(&base_url))
        .list_users()
        .await
        .expect_err("listing should be denied");

    match err {
        DirectoryError::Api { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("Authorization_RequestDenied"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_issuer_reports_token_failure() {
    let err = TokenIssuer::new(
        config_for("http://127.0.0.1:1"),
        reqwest::Client::new(),
    )
    .acquire()
    .await
    .expect_err("nothing listens on port 1");

    assert!(matches!(err, DirectoryError::TokenUnavailable(_)));
}
