use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use directory_client::DirectoryConfig;
use serde_json::{Value, json};

/// Stand-in for the token issuer and the directory API on one local port.
#[derive(Clone)]
pub struct FakeIdentity {
    pub token_status: StatusCode,
    pub users_status: StatusCode,
    pub users_body: Value,
    token_requests: Arc<AtomicUsize>,
    users_requests: Arc<AtomicUsize>,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self {
            token_status: StatusCode::OK,
            users_status: StatusCode::OK,
            users_body: json!({
                "value": [
                    {"displayName": "Adele Vance", "userPrincipalName": "AdeleV@contoso.com"},
                    {"displayName": "Alex Wilber", "userPrincipalName": "AlexW@contoso.com"}
                ]
            }),
            token_requests: Arc::new(AtomicUsize::new(0)),
            users_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    pub fn users_requests(&self) -> usize {
        self.users_requests.load(Ordering::SeqCst)
    }

    /// Binds an ephemeral port and returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/{tenant}/oauth2/v2.0/token", post(issue_token))
            .route("/v1.0/users", get(list_users))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake identity server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake identity server");
        });

        format!("http://{addr}")
    }
}

pub fn config_for(base_url: &str) -> DirectoryConfig {
    DirectoryConfig::new(
        Some("contoso".to_string()),
        Some("app-id".to_string()),
        Some("s3cret".to_string()),
    )
    .with_authority_host(base_url)
    .with_graph_base_url(base_url)
}

async fn issue_token(
    State(fake): State<FakeIdentity>,
    Path(tenant): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    fake.token_requests.fetch_add(1, Ordering::SeqCst);

    if fake.token_status != StatusCode::OK {
        return (
            fake.token_status,
            Json(json!({
                "error": "invalid_client",
                "error_description": "AADSTS7000215: Invalid client secret provided."
            })),
        )
            .into_response();
    }

    let valid = tenant == "contoso"
        && form.get("grant_type").map(String::as_str) == Some("client_credentials")
        && form.get("client_id").map(String::as_str) == Some("app-id")
        && form.get("client_secret").map(String::as_str) == Some("s3cret")
        && form.get("scope").map(String::as_str) == Some("https://graph.microsoft.com/.default");

    if !valid {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_request"})))
            .into_response();
    }

    Json(json!({
        "token_type": "Bearer",
        "expires_in": 3599,
        "access_token": "fake-token"
    }))
    .into_response()
}

async fn list_users(State(fake): State<FakeIdentity>, headers: HeaderMap) -> Response {
    fake.users_requests.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer fake-token");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing bearer token").into_response();
    }

    (fake.users_status, Json(fake.users_body.clone())).into_response()
}
