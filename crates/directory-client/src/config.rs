use std::fmt;

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com";
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

#[derive(Clone)]
pub struct DirectoryConfig {
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub authority_host: String,
    pub graph_base_url: String,
    pub scope: String,
}

/// Complete client-credentials triple borrowed from a [`DirectoryConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientCredentials<'a> {
    pub tenant_id: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

impl DirectoryConfig {
    pub fn new(
        tenant_id: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            tenant_id,
            client_id,
            client_secret,
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    pub fn with_authority_host(mut self, host: impl Into<String>) -> Self {
        self.authority_host = host.into();
        self
    }

    pub fn with_graph_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.graph_base_url = base_url.into();
        self
    }

    /// Returns the credentials only when all three values are present and non-empty.
    pub fn credentials(&self) -> Option<ClientCredentials<'_>> {
        Some(ClientCredentials {
            tenant_id: non_empty(&self.tenant_id)?,
            client_id: non_empty(&self.client_id)?,
            client_secret: non_empty(&self.client_secret)?,
        })
    }

    pub fn token_url(&self, tenant_id: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            tenant_id
        )
    }

    pub fn users_url(&self) -> String {
        format!("{}/v1.0/users", self.graph_base_url.trim_end_matches('/'))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("authority_host", &self.authority_host)
            .field("graph_base_url", &self.graph_base_url)
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::DirectoryConfig;

    fn full() -> DirectoryConfig {
        DirectoryConfig::new(
            Some("contoso".to_string()),
            Some("app-id".to_string()),
            Some("s3cret".to_string()),
        )
    }

    #[test]
    fn test_credentials_require_all_values() {
        let config = full();
        let creds = config.credentials().expect("complete credentials");
        assert_eq!(creds.tenant_id, "contoso");
        assert_eq!(creds.client_id, "app-id");

        let mut missing_secret = full();
        missing_secret.client_secret = None;
        assert!(missing_secret.credentials().is_none());

        let mut blank_tenant = full();
        blank_tenant.tenant_id = Some("  ".to_string());
        assert!(blank_tenant.credentials().is_none());
    }

    #[test]
    fn test_urls() {
        let config = full()
            .with_authority_host("http://127.0.0.1:9000/")
            .with_graph_base_url("http://127.0.0.1:9001/");

        assert_eq!(
            config.token_url("contoso"),
            "http://127.0.0.1:9000/contoso/oauth2/v2.0/token"
        );
        assert_eq!(config.users_url(), "http://127.0.0.1:9001/v1.0/users");
        assert_eq!(
            full().token_url("contoso"),
            "https://login.microsoftonline.com/contoso/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", full());
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
