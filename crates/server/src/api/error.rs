//! API 错误响应。

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use copilot_demo_api_types::ErrorResponse;
use copilot_demo_core::{DirectoryError, DomainError};
use system_capabilities::{EventLogError, FileSystemError, HostError};
use tokio::task::JoinError;
use tracing::warn;

/// API 错误类型。
#[derive(Debug)]
pub struct ApiError {
    message: String,
    code: &'static str,
    status: StatusCode,
    upstream_status: Option<u16>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            status,
            upstream_status: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<FileSystemError> for ApiError {
    fn from(err: FileSystemError) -> Self {
        match err {
            FileSystemError::FolderNotFound(path) => ApiError::new(
                StatusCode::NOT_FOUND,
                "FOLDER_NOT_FOUND",
                format!("Folder not found: {}", path),
            ),
            FileSystemError::FileNotFound(path) => ApiError::new(
                StatusCode::NOT_FOUND,
                "FILE_NOT_FOUND",
                format!("File not found: {}", path),
            ),
            FileSystemError::NotADirectory(path) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "NOT_A_DIRECTORY",
                format!("Not a directory: {}", path),
            ),
            FileSystemError::Io(e) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR", e.to_string())
            }
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        let message = err.to_string();
        match err {
            DirectoryError::MissingCredentials => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "MISSING_CREDENTIALS",
                message,
            ),
            DirectoryError::TokenUnavailable(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "TOKEN_UNAVAILABLE", message)
            }
            DirectoryError::Api { status, .. } => ApiError {
                upstream_status: Some(status),
                ..ApiError::new(StatusCode::BAD_GATEWAY, "DIRECTORY_API_ERROR", message)
            },
            DirectoryError::Transport(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "DIRECTORY_UNREACHABLE", message)
            }
        }
    }
}

impl From<EventLogError> for ApiError {
    fn from(err: EventLogError) -> Self {
        match err {
            EventLogError::Unavailable { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, "EVENTS_UNAVAILABLE", err.to_string())
            }
            EventLogError::Read { .. } => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "EVENTS_READ_FAILED",
                err.to_string(),
            ),
            EventLogError::Command(detail) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "EVENTS_READ_FAILED",
                format!("wevtutil failed: {}", detail),
            ),
            EventLogError::Task(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "EVENTS_READ_FAILED",
                err.to_string(),
            ),
        }
    }
}

impl From<HostError> for ApiError {
    fn from(err: HostError) -> Self {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "HEALTH_SAMPLING_FAILED",
            format!("Host sampling failed: {}", err),
        )
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "BLOCKING_TASK_FAILED",
            format!("Background task failed: {}", err),
        )
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "INVALID_QUERY", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(code = self.code, error = %self.message, "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.message,
            code: self.code.to_string(),
            status_code: self.upstream_status,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_not_found_maps_to_404() {
        let err = ApiError::from(FileSystemError::FolderNotFound("/nope".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Folder not found: /nope");
    }

    #[test]
    fn test_directory_api_error_keeps_upstream_status() {
        let err = ApiError::from(DirectoryError::Api {
            status: 403,
            body: "denied".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.upstream_status, Some(403));
        assert_eq!(err.message, "denied");
    }

    #[tokio::test]
    async fn test_failed_blocking_task_maps_to_500() {
        let join_err = tokio::task::spawn_blocking(|| -> u8 { panic!("scan crashed") })
            .await
            .expect_err("task should panic");

        let err = ApiError::from(join_err);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "BLOCKING_TASK_FAILED");
    }

    #[test]
    fn test_missing_credentials_message() {
        let err = ApiError::from(DirectoryError::MissingCredentials);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.message.starts_with("Failed to acquire token."));
    }
}
