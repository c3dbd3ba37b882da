//! 目录服务用户列表。

use async_trait::async_trait;
use copilot_demo_core::{DirectoryError, DirectoryUser, UserDirectory};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::DirectoryConfig;
use crate::token::TokenIssuer;

#[derive(Debug, Deserialize)]
struct UsersPage {
    #[serde(default)]
    value: Vec<GraphUser>,
}

#[derive(Debug, Deserialize)]
struct GraphUser {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(rename = "userPrincipalName", default)]
    user_principal_name: Option<String>,
}

impl From<GraphUser> for DirectoryUser {
    fn from(user: GraphUser) -> Self {
        Self {
            display_name: user.display_name,
            principal_name: user.user_principal_name,
        }
    }
}

/// 通过 HTTP 目录 API 列出用户，每次请求都重新获取令牌。
#[derive(Debug, Clone)]
pub struct GraphDirectory {
    config: DirectoryConfig,
    client: Client,
    issuer: TokenIssuer,
}

impl GraphDirectory {
    pub fn new(config: DirectoryConfig) -> Self {
        let client = Client::new();
        Self {
            issuer: TokenIssuer::new(config.clone(), client.clone()),
            config,
            client,
        }
    }
}

#[async_trait]
impl UserDirectory for GraphDirectory {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DirectoryError> {
        let token = self.issuer.acquire().await?;
        let users_url = self.config.users_url();

        let response = self
            .client
            .get(&users_url)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.map_err(|e| {
                DirectoryError::Transport(format!("failed to read users error body: {e}"))
            })?;
            warn!(status = status.as_u16(), url = %users_url, "directory API rejected user listing");
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let page: UsersPage = response
            .json()
            .await
            .map_err(|e| DirectoryError::Transport(format!("invalid users response: {e}")))?;

        info!(count = page.value.len(), "directory users listed");
        Ok(page.value.into_iter().map(DirectoryUser::from).collect())
    }
}
