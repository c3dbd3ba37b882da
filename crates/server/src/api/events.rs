//! 平台事件日志路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use copilot_demo_api_types::{ErrorResponse, EventEntry, EventsResponse};
use copilot_demo_core::{EventLevel, EventSource};
use serde::Deserialize;
use system_capabilities::EventRecord;

use super::error::ApiError;
use super::state::AppState;

pub fn create_events_router() -> Router<Arc<AppState>> {
    Router::new().route("/events", get(list_events))
}

/// 事件查询参数。
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// `windows` 或 `linux`，缺省为当前平台。
    source: Option<String>,
    /// `all`、`error` 或 `warning`。
    level: Option<String>,
}

/// 读取平台事件日志。
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(
        ("source" = Option<String>, Query, description = "windows or linux, defaults to the host platform"),
        ("level" = Option<String>, Query, description = "all, error or warning (default all)")
    ),
    responses(
        (status = 200, description = "Platform events", body = EventsResponse),
        (status = 400, description = "Invalid parameters or source unavailable on this host", body = ErrorResponse),
        (status = 500, description = "Event log could not be read", body = ErrorResponse)
    )
)]
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
    let Query(query) = query?;
    let source: EventSource = match query.source.as_deref() {
        Some(raw) => raw.parse()?,
        None => EventSource::default(),
    };
    let level: EventLevel = match query.level.as_deref() {
        Some(raw) => raw.parse()?,
        None => EventLevel::default(),
    };

    let records = state.events.read(source, level).await?;

    Ok(Json(EventsResponse {
        events: records.into_iter().map(to_entry).collect(),
    }))
}

fn to_entry(record: EventRecord) -> EventEntry {
    match record {
        EventRecord::SyslogLine(line) => EventEntry::Line(line),
        EventRecord::Windows {
            source,
            event_id,
            event_type,
        } => EventEntry::Record {
            source,
            event_id,
            event_type,
        },
    }
}
