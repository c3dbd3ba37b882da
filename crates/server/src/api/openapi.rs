//! OpenAPI 文档定义。

use copilot_demo_api_types::{
    AgedFileEntry, DeletionResponse, DeletionSkippedResponse, ErrorResponse, EventsResponse,
    HealthReport, LogSummaryResponse, RetentionPreviewResponse, RootMessage, UserSummary,
    UsersResponse,
};
use utoipa::OpenApi;

use super::{events, health, logs, meta, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Copilot Demo API",
        version = "2.1.0",
        description = "Cross-platform API: directory users, system health, logs, and events."
    ),
    paths(
        meta::root,
        users::list_users,
        health::health_check,
        logs::preview_delete,
        logs::delete_confirmed,
        logs::summarize_log,
        events::list_events
    ),
    components(schemas(
        RootMessage,
        UserSummary,
        UsersResponse,
        HealthReport,
        AgedFileEntry,
        RetentionPreviewResponse,
        DeletionResponse,
        DeletionSkippedResponse,
        LogSummaryResponse,
        EventsResponse,
        ErrorResponse
    )),
    tags(
        (name = "users", description = "Directory service users"),
        (name = "health", description = "Host utilization"),
        (name = "logs", description = "Log retention and summaries"),
        (name = "events", description = "Platform event logs"),
        (name = "meta", description = "Service metadata")
    )
)]
pub struct ApiDoc;
