//! 服务配置，启动时从环境变量读取一次。

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use directory_client::DirectoryConfig;
use system_capabilities::{FileSystemCapabilities, HostCapabilities};

type Result<T> = anyhow::Result<T>;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DEPLOYED_BASE_URL: &str = "https://copilot-fastapi-demo.azurewebsites.net";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 对外地址，用于插件清单中的 URL。
    pub deployed_base_url: String,
    /// 日志接口未指定 `folder` 时使用的目录。
    pub log_folder: PathBuf,
    pub health_sample_interval: Duration,
    pub directory: DirectoryConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过查找函数构造配置，空字符串视为未设置。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT value: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let health_sample_interval = match get("HEALTH_SAMPLE_MS") {
            Some(raw) => Duration::from_millis(
                raw.trim()
                    .parse()
                    .with_context(|| format!("invalid HEALTH_SAMPLE_MS value: {raw}"))?,
            ),
            None => HostCapabilities::DEFAULT_SAMPLE_INTERVAL,
        };

        let mut directory =
            DirectoryConfig::new(get("TENANT_ID"), get("CLIENT_ID"), get("CLIENT_SECRET"));
        if let Some(host) = get("AUTHORITY_HOST") {
            directory = directory.with_authority_host(host);
        }
        if let Some(base_url) = get("GRAPH_BASE_URL") {
            directory = directory.with_graph_base_url(base_url);
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            deployed_base_url: get("DEPLOYED_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DEPLOYED_BASE_URL.to_string()),
            log_folder: get("LOG_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(FileSystemCapabilities::detect_default_log_folder),
            health_sample_interval,
            directory,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
