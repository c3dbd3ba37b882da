//! 主机健康检查路由。

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use copilot_demo_api_types::{ErrorResponse, HealthReport};

use super::error::ApiError;
use super::state::AppState;

pub fn create_health_router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

/// 采样 CPU、内存、磁盘使用率；CPU 或内存达到 80% 时状态为 WARNING。
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Host utilization", body = HealthReport),
        (status = 500, description = "Sampling failed", body = ErrorResponse)
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthReport>, ApiError> {
    let snapshot = state.host.snapshot().await?;

    Ok(Json(HealthReport {
        status: snapshot.status().to_string(),
        cpu: format_percent(snapshot.cpu_percent),
        memory: format_percent(snapshot.memory_percent),
        disk: format_percent(snapshot.disk_percent),
    }))
}

fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
