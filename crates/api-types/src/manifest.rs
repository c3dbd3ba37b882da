//! AI plugin manifest served from `/.well-known/ai-plugin.json`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    pub schema_version: String,
    pub name_for_human: String,
    pub name_for_model: String,
    pub description_for_human: String,
    pub description_for_model: String,
    pub auth: ManifestAuth,
    pub api: ManifestApi,
    pub logo_url: String,
    pub contact_email: String,
    pub legal_info_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestAuth {
    #[serde(rename = "type")]
    pub auth_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestApi {
    #[serde(rename = "type")]
    pub api_type: String,
    pub url: String,
    pub is_user_authenticated: bool,
}

impl PluginManifest {
    /// Builds the manifest for a deployment reachable at `base_url`.
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            schema_version: "v1".to_string(),
            name_for_human: "Copilot Demo API".to_string(),
            name_for_model: "copilot_demo".to_string(),
            description_for_human:
                "Cross-platform demo: directory users, health, logs, and events.".to_string(),
            description_for_model: "Use this API to fetch directory users, check system health, \
                manage logs, summarize log files, and read Windows/Linux events."
                .to_string(),
            auth: ManifestAuth {
                auth_type: "none".to_string(),
            },
            api: ManifestApi {
                api_type: "openapi".to_string(),
                url: format!("{base}/openapi.json"),
                is_user_authenticated: false,
            },
            logo_url: format!("{base}/static/logo.png"),
            contact_email: "admin@yourdomain.com".to_string(),
            legal_info_url: "https://yourdomain.com/legal".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PluginManifest;

    #[test]
    fn urls_are_built_from_base() {
        let manifest = PluginManifest::for_base_url("https://demo.example.net/");

        assert_eq!(manifest.api.url, "https://demo.example.net/openapi.json");
        assert_eq!(manifest.logo_url, "https://demo.example.net/static/logo.png");
        assert!(!manifest.api.is_user_authenticated);
    }

    #[test]
    fn type_fields_use_wire_names() {
        let json = serde_json::to_value(PluginManifest::for_base_url("http://localhost:8000"))
            .expect("serialize manifest");

        assert_eq!(json["auth"]["type"], "none");
        assert_eq!(json["api"]["type"], "openapi");
        assert_eq!(json["schema_version"], "v1");
    }
}
