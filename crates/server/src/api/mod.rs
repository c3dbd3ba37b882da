//! API 路由模块。

pub mod error;
pub mod events;
pub mod health;
pub mod logs;
pub mod meta;
pub mod openapi;
pub mod state;
pub mod users;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// 组装全部路由。
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(meta::create_meta_router())
        .merge(users::create_users_router())
        .merge(health::create_health_router())
        .merge(logs::create_logs_router())
        .merge(events::create_events_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
