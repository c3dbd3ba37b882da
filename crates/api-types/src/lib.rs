//! Shared request/response types used by API-facing crates.

mod manifest;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use manifest::{ManifestApi, ManifestAuth, PluginManifest};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Converts a byte count to megabytes rounded to two decimals, halves to even.
#[must_use]
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round_ties_even() / 100.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RootMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    /// `OK` or `WARNING`.
    pub status: String,
    pub cpu: String,
    pub memory: String,
    pub disk: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AgedFileEntry {
    pub file: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RetentionPreviewResponse {
    pub files_to_delete: Vec<AgedFileEntry>,
    pub total_space_to_free_mb: f64,
    pub delete_url: String,
}

/// One entry of `deleted_files`: a bare name on success, an object on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeletionOutcome {
    Deleted(String),
    Failed { file: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletionResponse {
    #[schema(value_type = Vec<Object>)]
    pub deleted_files: Vec<DeletionOutcome>,
    pub space_freed_mb: f64,
    pub folder: String,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletionSkippedResponse {
    pub message: String,
    pub folder: String,
    pub days: u32,
}

impl DeletionSkippedResponse {
    pub const MESSAGE: &'static str = "Deletion not performed. Use ?confirm=yes to proceed.";

    #[must_use]
    pub fn new(folder: impl Into<String>, days: u32) -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            folder: folder.into(),
            days,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogSummaryResponse {
    pub errors: u64,
    pub warnings: u64,
    pub info: u64,
    pub total_lines: u64,
}

/// One entry of `events`: a raw syslog line or a structured Windows record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventEntry {
    Line(String),
    Record {
        source: String,
        event_id: u32,
        event_type: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventsResponse {
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<EventEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    /// Upstream HTTP status, present only when a remote API rejected the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn megabytes_are_rounded_to_two_decimals() {
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb(1_572_864), 1.5);
        assert_eq!(bytes_to_mb(12_345), 0.01);
        assert_eq!(bytes_to_mb(4_000), 0.0);
    }

    #[test]
    fn megabyte_halves_are_rounded_to_even() {
        // 0.125 MB and 0.375 MB sit exactly on the rounding boundary
        assert_eq!(bytes_to_mb(131_072), 0.12);
        assert_eq!(bytes_to_mb(393_216), 0.38);
    }

    #[test]
    fn deletion_outcomes_serialize_as_name_or_object() {
        let outcomes = vec![
            DeletionOutcome::Deleted("old.log".to_string()),
            DeletionOutcome::Failed {
                file: "locked.log".to_string(),
                error: "Permission denied".to_string(),
            },
        ];

        let json = serde_json::to_value(&outcomes).expect("serialize outcomes");
        assert_eq!(
            json,
            serde_json::json!([
                "old.log",
                {"file": "locked.log", "error": "Permission denied"}
            ])
        );
    }

    #[test]
    fn event_entries_serialize_untagged() {
        let json = serde_json::to_value(EventsResponse {
            events: vec![
                EventEntry::Line("Oct 19 kernel: error".to_string()),
                EventEntry::Record {
                    source: "Application Error".to_string(),
                    event_id: 1000,
                    event_type: 1,
                },
            ],
        })
        .expect("serialize events");

        assert_eq!(json["events"][0], "Oct 19 kernel: error");
        assert_eq!(json["events"][1]["event_id"], 1000);
    }

    #[test]
    fn error_response_omits_missing_status_code() {
        let response = ErrorResponse {
            code: "FOLDER_NOT_FOUND".to_string(),
            error: "Folder not found: /nope".to_string(),
            status_code: None,
        };

        let json = serde_json::to_string(&response).expect("serialize error response");
        assert!(!json.contains("status_code"));

        let decoded: ErrorResponse =
            serde_json::from_str(&json).expect("deserialize error response");
        assert_eq!(decoded, response);
    }
}
