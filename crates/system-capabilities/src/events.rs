//! 平台事件日志模块。
//!
//! Linux 读取 syslog 文件尾部；Windows 通过系统自带的 `wevtutil`
//! 读取 Application 日志。

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use copilot_demo_core::{EventLevel, EventSource};
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

use crate::lines::for_each_line;

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("{requested} logs not available on {platform}")]
    Unavailable {
        requested: EventSource,
        platform: &'static str,
    },

    #[error("{path}: {error}")]
    Read {
        path: String,
        error: std::io::Error,
    },

    #[error("wevtutil 执行失败: {0}")]
    Command(String),

    #[error("事件读取任务失败: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, EventLogError>;

/// 单条事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRecord {
    /// syslog 原始行（已去除首尾空白）。
    SyslogLine(String),
    /// Windows 事件，`event_type` 为 1 错误、2 警告、4 信息。
    Windows {
        source: String,
        event_id: u32,
        event_type: u32,
    },
}

/// 当前平台名称，与常见的 `platform.system()` 取值一致。
pub fn platform_name() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "linux" => "Linux",
        "macos" => "Darwin",
        other => other,
    }
}

/// 事件日志读取器。
#[derive(Debug, Clone)]
pub struct EventLogReader {
    /// syslog 候选路径，取第一个存在的；都不存在时使用最后一个。
    syslog_candidates: Vec<PathBuf>,
    /// 保留 syslog 末尾的行数。
    tail_lines: usize,
    /// Windows 最多读取的事件数（最新优先）。
    windows_max_records: usize,
}

impl EventLogReader {
    pub const DEFAULT_TAIL_LINES: usize = 200;
    pub const DEFAULT_WINDOWS_MAX_RECORDS: usize = 50;

    pub fn new() -> Self {
        Self::with_syslog_candidates(vec![
            PathBuf::from("/var/log/syslog"),
            PathBuf::from("/var/log/messages"),
        ])
    }

    pub fn with_syslog_candidates(candidates: Vec<PathBuf>) -> Self {
        Self {
            syslog_candidates: candidates,
            tail_lines: Self::DEFAULT_TAIL_LINES,
            windows_max_records: Self::DEFAULT_WINDOWS_MAX_RECORDS,
        }
    }

    /// 读取指定来源的事件，来源与当前平台不匹配时返回 `Unavailable`。
    pub async fn read(&self, source: EventSource, level: EventLevel) -> Result<Vec<EventRecord>> {
        info!(%source, %level, platform = platform_name(), "Reading platform events");

        match source {
            EventSource::Linux if cfg!(target_os = "linux") => {
                // 文件读取在阻塞线程池中执行
                let reader = self.clone();
                tokio::task::spawn_blocking(move || reader.read_syslog(level)).await?
            }
            EventSource::Windows if cfg!(target_os = "windows") => self.read_windows(level).await,
            _ => Err(EventLogError::Unavailable {
                requested: source,
                platform: platform_name(),
            }),
        }
    }

    fn syslog_path(&self) -> Option<&Path> {
        self.syslog_candidates
            .iter()
            .find(|p| p.exists())
            .or_else(|| self.syslog_candidates.last())
            .map(PathBuf::as_path)
    }

    fn read_syslog(&self, level: EventLevel) -> Result<Vec<EventRecord>> {
        let Some(path) = self.syslog_path() else {
            return Err(EventLogError::Unavailable {
                requested: EventSource::Linux,
                platform: platform_name(),
            });
        };

        let read_error = |error: std::io::Error| EventLogError::Read {
            path: path.display().to_string(),
            error,
        };

        let file = File::open(path).map_err(read_error)?;
        let mut tail = VecDeque::with_capacity(self.tail_lines);
        for_each_line(BufReader::new(file), |line| {
            if tail.len() == self.tail_lines {
                tail.pop_front();
            }
            tail.push_back(line.into_owned());
        })
        .map_err(read_error)?;

        Ok(tail
            .into_iter()
            .filter(|line| level.accepts_line(line))
            .map(|line| EventRecord::SyslogLine(line.trim().to_string()))
            .collect())
    }

    async fn read_windows(&self, level: EventLevel) -> Result<Vec<EventRecord>> {
        let output = Command::new("wevtutil")
            .args(["qe", "Application", "/rd:true", "/f:text"])
            .arg(format!("/c:{}", self.windows_max_records))
            .output()
            .await
            .map_err(|e| EventLogError::Command(e.to_string()))?;

        if !output.status.success() {
            return Err(EventLogError::Command(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(parse_wevtutil_text(&text)
            .into_iter()
            .take(self.windows_max_records)
            .filter(|record| match record {
                EventRecord::Windows { event_type, .. } => level.accepts_event_type(*event_type),
                EventRecord::SyslogLine(_) => false,
            })
            .collect())
    }
}

impl Default for EventLogReader {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析 `wevtutil qe ... /f:text` 的输出。
fn parse_wevtutil_text(text: &str) -> Vec<EventRecord> {
    let mut records = Vec::new();
    let mut current: Option<(String, u32, u32)> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("Event[") {
            if let Some((source, event_id, event_type)) = current.take() {
                records.push(EventRecord::Windows {
                    source,
                    event_id,
                    event_type,
                });
            }
            current = Some((String::new(), 0, 4));
            continue;
        }

        let Some((source, event_id, event_type)) = current.as_mut() else {
            continue;
        };
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Source" => *source = value.to_string(),
            "Event ID" => *event_id = value.parse().unwrap_or(0),
            "Level" => *event_type = windows_event_type(value),
            _ => {}
        }
    }

    if let Some((source, event_id, event_type)) = current {
        records.push(EventRecord::Windows {
            source,
            event_id,
            event_type,
        });
    }
    records
}

fn windows_event_type(level: &str) -> u32 {
    match level {
        "Critical" | "Error" => 1,
        "Warning" => 2,
        _ => 4,
    }
}
