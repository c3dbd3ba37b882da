use async_trait::async_trait;
use thiserror::Error;

/// A user entry as returned by the directory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub display_name: Option<String>,
    pub principal_name: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error(
        "Failed to acquire token. Make sure TENANT_ID, CLIENT_ID, CLIENT_SECRET are set as environment variables."
    )]
    MissingCredentials,
    #[error("Failed to acquire token: {0}")]
    TokenUnavailable(String),
    #[error("{body}")]
    Api { status: u16, body: String },
    #[error("directory request failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DirectoryError>;
}
