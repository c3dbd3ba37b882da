//! 日志管理 API 路由。
//!
//! 提供过期日志预览、确认删除以及日志文件摘要。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use copilot_demo_api_types::{
    AgedFileEntry, DeletionOutcome, DeletionResponse, DeletionSkippedResponse, ErrorResponse,
    LogSummaryResponse, RetentionPreviewResponse, bytes_to_mb,
};
use copilot_demo_core::{Confirmation, RetentionWindow};
use serde::Deserialize;
use system_capabilities::{DeletionRun, FileSystemError};

use super::error::ApiError;
use super::state::AppState;

/// 创建日志管理 API 路由。
pub fn create_logs_router() -> Router<Arc<AppState>> {
    Router::new()
        // 预览将被删除的日志
        .route("/logs/preview-delete", get(preview_delete))
        // 确认后删除
        .route("/logs/delete-confirmed", delete(delete_confirmed))
        // 日志摘要
        .route("/logs/summarize", post(summarize_log))
}

/// 保留期限查询参数。
#[derive(Debug, Deserialize)]
pub struct RetentionQuery {
    /// 日志目录，缺省为配置的日志目录。
    folder: Option<String>,
    /// 保留天数。
    #[serde(default = "default_days")]
    days: i64,
}

/// 删除查询参数。
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    folder: Option<String>,
    #[serde(default = "default_days")]
    days: i64,
    /// 必须为 `yes` 才会删除。
    #[serde(default = "default_confirm")]
    confirm: String,
}

/// 摘要查询参数。
#[derive(Debug, Deserialize)]
pub struct SummarizeQuery {
    file_path: String,
}

fn default_days() -> i64 {
    i64::from(RetentionWindow::DEFAULT_DAYS)
}

fn default_confirm() -> String {
    Confirmation::DEFAULT_RAW.to_string()
}

fn resolve_folder(state: &AppState, folder: Option<String>) -> PathBuf {
    folder
        .map(PathBuf::from)
        .unwrap_or_else(|| state.filesystem.default_log_folder().to_path_buf())
}

/// 在阻塞线程池中执行文件系统操作。
async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, FileSystemError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(task).await??)
}

/// 构造确认删除的 URL，目录作为查询参数进行编码。
fn delete_url(folder: &Path, window: RetentionWindow) -> String {
    format!(
        "/logs/delete-confirmed?folder={}&days={}&confirm=yes",
        urlencoding::encode(&folder.display().to_string()),
        window.days()
    )
}

/// 预览将被删除的日志文件。
#[utoipa::path(
    get,
    path = "/logs/preview-delete",
    tag = "logs",
    params(
        ("folder" = Option<String>, Query, description = "Log folder, defaults to the configured log folder"),
        ("days" = Option<i64>, Query, description = "Files older than this many days are selected (default 30)")
    ),
    responses(
        (status = 200, description = "Files that would be deleted", body = RetentionPreviewResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Folder not found", body = ErrorResponse)
    )
)]
pub async fn preview_delete(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RetentionQuery>, QueryRejection>,
) -> Result<Json<RetentionPreviewResponse>, ApiError> {
    let Query(query) = query?;
    let window = RetentionWindow::new(query.days)?;
    let folder = resolve_folder(&state, query.folder);

    let filesystem = state.filesystem.clone();
    let scan_folder = folder.clone();
    let preview =
        run_blocking(move || filesystem.preview_aged_files(&scan_folder, window)).await?;

    Ok(Json(RetentionPreviewResponse {
        files_to_delete: preview
            .files
            .into_iter()
            .map(|file| AgedFileEntry {
                file: file.name,
                size_bytes: file.size_bytes,
            })
            .collect(),
        total_space_to_free_mb: bytes_to_mb(preview.total_bytes),
        delete_url: delete_url(&folder, window),
    }))
}

/// 删除过期日志，`confirm=yes` 时才执行。
#[utoipa::path(
    delete,
    path = "/logs/delete-confirmed",
    tag = "logs",
    params(
        ("folder" = Option<String>, Query, description = "Log folder, defaults to the configured log folder"),
        ("days" = Option<i64>, Query, description = "Files older than this many days are deleted (default 30)"),
        ("confirm" = Option<String>, Query, description = "Must be 'yes' to actually delete")
    ),
    responses(
        (status = 200, description = "Deletion report, or a no-op message when not confirmed", body = DeletionResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Folder not found", body = ErrorResponse)
    )
)]
pub async fn delete_confirmed(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let window = RetentionWindow::new(query.days)?;
    let folder = resolve_folder(&state, query.folder);
    let confirmation = Confirmation::parse(&query.confirm);

    let filesystem = state.filesystem.clone();
    let folder_name = folder.display().to_string();
    let run =
        run_blocking(move || filesystem.delete_aged_files(&folder, window, confirmation)).await?;

    let response = match run {
        DeletionRun::Skipped => {
            Json(DeletionSkippedResponse::new(folder_name, window.days())).into_response()
        }
        DeletionRun::Completed(report) => Json(DeletionResponse {
            deleted_files: report
                .entries
                .into_iter()
                .map(|entry| match entry.error {
                    None => DeletionOutcome::Deleted(entry.name),
                    Some(error) => DeletionOutcome::Failed {
                        file: entry.name,
                        error,
                    },
                })
                .collect(),
            space_freed_mb: bytes_to_mb(report.freed_bytes),
            folder: folder_name,
            days: window.days(),
        })
        .into_response(),
    };

    Ok(response)
}

/// 按关键字统计日志文件行数。
#[utoipa::path(
    post,
    path = "/logs/summarize",
    tag = "logs",
    params(
        ("file_path" = String, Query, description = "Path of the log file to summarize")
    ),
    responses(
        (status = 200, description = "Keyword line counts", body = LogSummaryResponse),
        (status = 400, description = "Missing file_path", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn summarize_log(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SummarizeQuery>, QueryRejection>,
) -> Result<Json<LogSummaryResponse>, ApiError> {
    let Query(query) = query?;
    let filesystem = state.filesystem.clone();
    let file_path = PathBuf::from(query.file_path);
    let tally = run_blocking(move || filesystem.summarize_log(&file_path)).await?;

    Ok(Json(LogSummaryResponse {
        errors: tally.errors,
        warnings: tally.warnings,
        info: tally.info,
        total_lines: tally.total_lines,
    }))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use copilot_demo_core::RetentionWindow;

    use super::delete_url;

    #[test]
    fn test_delete_url_encodes_folder() {
        let window = RetentionWindow::new(7).expect("valid window");

        assert_eq!(
            delete_url(Path::new("/var/log/my app"), window),
            "/logs/delete-confirmed?folder=%2Fvar%2Flog%2Fmy%20app&days=7&confirm=yes"
        );
    }
}
