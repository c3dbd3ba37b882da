//! System Capabilities - 系统能力封装模块。
//!
//! 该 crate 提供统一的系统能力接口，供 server 集成为 API 路由：
//! 日志保留清理、日志摘要、主机资源指标以及平台事件日志读取。

pub mod events;
pub mod filesystem;
pub mod host;
mod lines;

pub use events::{EventLogError, EventLogReader, EventRecord, platform_name};
pub use filesystem::{
    AgedFile, DeletionEntry, DeletionReport, DeletionRun, FileSystemCapabilities,
    FileSystemError, RetentionPreview,
};
pub use host::{HostCapabilities, HostError, HostSnapshot};
