//! 根路径、插件清单与 OpenAPI 文档。

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use copilot_demo_api_types::{PluginManifest, RootMessage};
use utoipa::OpenApi;

use super::openapi::ApiDoc;
use super::state::AppState;

pub fn create_meta_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/.well-known/ai-plugin.json", get(plugin_manifest))
        .route("/openapi.json", get(openapi_document))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses((status = 200, description = "Greeting", body = RootMessage))
)]
pub async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "Hello from Copilot Demo API!".to_string(),
    })
}

/// 插件清单，URL 基于配置的对外地址。
pub async fn plugin_manifest(State(state): State<Arc<AppState>>) -> Json<PluginManifest> {
    Json(PluginManifest::for_base_url(&state.deployed_base_url))
}

pub async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
