//! 统一的应用状态。

use std::sync::Arc;

use copilot_demo_core::UserDirectory;
use directory_client::GraphDirectory;
use system_capabilities::{EventLogReader, FileSystemCapabilities, HostCapabilities};

use crate::config::ServerConfig;

/// 统一的应用状态，包含所有 handler 共享的只读能力。
#[derive(Clone)]
pub struct AppState {
    /// 目录服务（用户列表）。
    pub directory: Arc<dyn UserDirectory>,
    /// 文件系统能力（日志清理与摘要）。
    pub filesystem: FileSystemCapabilities,
    /// 主机资源能力。
    pub host: HostCapabilities,
    /// 平台事件日志。
    pub events: EventLogReader,
    /// 对外地址，用于插件清单。
    pub deployed_base_url: String,
}

impl AppState {
    /// 根据配置创建应用状态。
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_directory(config, Arc::new(GraphDirectory::new(config.directory.clone())))
    }

    /// 使用指定的目录服务实现创建应用状态。
    pub fn with_directory(config: &ServerConfig, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            directory,
            filesystem: FileSystemCapabilities::with_default_log_folder(&config.log_folder),
            host: HostCapabilities::with_sample_interval(config.health_sample_interval),
            events: EventLogReader::new(),
            deployed_base_url: config.deployed_base_url.clone(),
        }
    }

    /// 替换事件日志读取器。
    pub fn with_event_reader(mut self, events: EventLogReader) -> Self {
        self.events = events;
        self
    }
}
