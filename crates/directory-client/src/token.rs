//! OAuth2 client-credentials token 获取。

use copilot_demo_core::DirectoryError;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::DirectoryConfig;

/// 访问令牌，仅在单次请求内使用，不做缓存。
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Token 端点响应，失败时可能只有 `error` / `error_description`。
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Client-credentials 令牌签发方。
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: DirectoryConfig,
    client: Client,
}

impl TokenIssuer {
    pub fn new(config: DirectoryConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// 使用 client-credentials 流程获取访问令牌。
    pub async fn acquire(&self) -> Result<AccessToken, DirectoryError> {
        let creds = self
            .config
            .credentials()
            .ok_or(DirectoryError::MissingCredentials)?;

        let token_url = self.config.token_url(creds.tenant_id);
        info!(client_id = %creds.client_id, tenant = %creds.tenant_id, "requesting client-credentials token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", creds.client_id),
            ("client_secret", creds.client_secret),
            ("scope", self.config.scope.as_str()),
        ];

        let response = self
            .client
            .post(&token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| DirectoryError::TokenUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DirectoryError::TokenUnavailable(e.to_string()))?;
        let parsed: Option<TokenResponse> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let detail = parsed
                .and_then(|r| r.error_description.or(r.error))
                .unwrap_or(body);
            warn!(status = status.as_u16(), "token request rejected");
            return Err(DirectoryError::TokenUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail
            )));
        }

        parsed
            .and_then(|r| r.access_token)
            .filter(|token| !token.is_empty())
            .map(AccessToken)
            .ok_or_else(|| {
                DirectoryError::TokenUnavailable(
                    "token response did not include an access_token".to_string(),
                )
            })
    }
}
