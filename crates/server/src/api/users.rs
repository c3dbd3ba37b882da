//! 目录用户 API 路由。

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use copilot_demo_api_types::{ErrorResponse, UserSummary, UsersResponse};

use super::error::ApiError;
use super::state::AppState;

/// 创建目录用户 API 路由。
pub fn create_users_router() -> Router<Arc<AppState>> {
    Router::new().route("/users", get(list_users))
}

/// 列出目录服务中的用户。
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Directory users", body = UsersResponse),
        (status = 502, description = "Token or directory API failure", body = ErrorResponse),
        (status = 503, description = "Client credentials are not configured", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UsersResponse>, ApiError> {
    let users = state
        .directory
        .list_users()
        .await?
        .into_iter()
        .map(|user| UserSummary {
            name: user.display_name,
            email: user.principal_name,
        })
        .collect();

    Ok(Json(UsersResponse { users }))
}
