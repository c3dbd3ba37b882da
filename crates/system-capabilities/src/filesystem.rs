//! 文件系统能力模块。
//!
//! 提供日志目录的过期文件扫描、预览、确认删除，以及日志文件关键字摘要。

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use copilot_demo_core::{Confirmation, LineTally, RetentionWindow};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::lines::for_each_line;

/// 文件系统错误类型。
#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("目录不存在: {0}")]
    FolderNotFound(String),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("路径不是目录: {0}")]
    NotADirectory(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

/// 超过保留期限的文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgedFile {
    /// 文件名（不含目录）。
    pub name: String,
    /// 完整路径。
    pub path: PathBuf,
    /// 文件大小（字节）。
    pub size_bytes: u64,
}

/// 删除预览结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPreview {
    /// 将被删除的文件，按文件名排序。
    pub files: Vec<AgedFile>,
    /// 可释放的总字节数。
    pub total_bytes: u64,
}

/// 单个文件的删除结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionEntry {
    /// 文件名。
    pub name: String,
    /// 删除失败时的错误信息。
    pub error: Option<String>,
}

impl DeletionEntry {
    pub fn is_deleted(&self) -> bool {
        self.error.is_none()
    }
}

/// 删除执行报告。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionReport {
    /// 按扫描顺序记录的每个文件结果。
    pub entries: Vec<DeletionEntry>,
    /// 实际释放的字节数，仅统计删除成功的文件。
    pub freed_bytes: u64,
}

/// 一次删除请求的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionRun {
    /// 未确认，未触碰任何文件。
    Skipped,
    /// 已确认并执行。
    Completed(DeletionReport),
}

/// 文件系统能力接口。
#[derive(Clone)]
pub struct FileSystemCapabilities {
    /// 未指定目录时使用的日志目录。
    default_log_folder: PathBuf,
}

impl FileSystemCapabilities {
    /// 创建新的文件系统能力实例，默认目录为 `./logs`（存在时）或系统临时目录。
    pub fn new() -> Self {
        Self::with_default_log_folder(Self::detect_default_log_folder())
    }

    /// 使用指定的默认日志目录创建实例。
    pub fn with_default_log_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            default_log_folder: folder.into(),
        }
    }

    /// 探测默认日志目录。
    pub fn detect_default_log_folder() -> PathBuf {
        let local = PathBuf::from("./logs");
        if local.exists() {
            local
        } else {
            std::env::temp_dir()
        }
    }

    /// 默认日志目录。
    pub fn default_log_folder(&self) -> &Path {
        &self.default_log_folder
    }

    /// 扫描目录下（不递归）超过保留期限的普通文件。
    ///
    /// 预览与删除共用此扫描，相同输入选中的文件集合一致。
    pub fn scan_aged_files(
        &self,
        folder: &Path,
        window: RetentionWindow,
        now: SystemTime,
    ) -> Result<Vec<AgedFile>> {
        if !folder.exists() {
            return Err(FileSystemError::FolderNotFound(folder.display().to_string()));
        }

        if !folder.is_dir() {
            return Err(FileSystemError::NotADirectory(folder.display().to_string()));
        }

        let mut aged = Vec::new();

        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };

            // 跟随符号链接判断类型与修改时间
            let metadata = match std::fs::metadata(entry.path()) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if !metadata.is_file() {
                continue;
            }

            let Ok(modified) = metadata.modified() else {
                continue;
            };

            if window.is_aged(modified, now) {
                aged.push(AgedFile {
                    name: entry.file_name().to_string_lossy().to_string(),
                    path: entry.path().to_path_buf(),
                    size_bytes: metadata.len(),
                });
            }
        }

        Ok(aged)
    }

    /// 预览将被删除的文件。
    pub fn preview_aged_files(
        &self,
        folder: &Path,
        window: RetentionWindow,
    ) -> Result<RetentionPreview> {
        info!(folder = %folder.display(), days = window.days(), "Previewing aged log files");

        let files = self.scan_aged_files(folder, window, SystemTime::now())?;
        let total_bytes = files.iter().map(|f| f.size_bytes).sum();

        Ok(RetentionPreview { files, total_bytes })
    }

    /// 删除过期文件，仅在确认后执行。
    ///
    /// 确认检查先于目录检查；单个文件删除失败会被记录，循环继续。
    pub fn delete_aged_files(
        &self,
        folder: &Path,
        window: RetentionWindow,
        confirmation: Confirmation,
    ) -> Result<DeletionRun> {
        if !confirmation.is_confirmed() {
            info!(folder = %folder.display(), "Deletion skipped without confirmation");
            return Ok(DeletionRun::Skipped);
        }

        let files = self.scan_aged_files(folder, window, SystemTime::now())?;
        info!(
            folder = %folder.display(),
            days = window.days(),
            count = files.len(),
            "Deleting aged log files"
        );

        Ok(DeletionRun::Completed(remove_files(files)))
    }

    /// 统计日志文件中 error / warning / info 关键字所在行数。
    pub fn summarize_log(&self, path: &Path) -> Result<LineTally> {
        if !path.exists() {
            return Err(FileSystemError::FileNotFound(path.display().to_string()));
        }

        info!(path = %path.display(), "Summarizing log file");

        let file = File::open(path)?;
        let mut tally = LineTally::default();
        for_each_line(BufReader::new(file), |line| tally.record(&line))?;

        Ok(tally)
    }
}

impl Default for FileSystemCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

/// 逐个删除文件，失败的文件记录错误后继续，只统计删除成功的字节数。
fn remove_files(files: Vec<AgedFile>) -> DeletionReport {
    let mut entries = Vec::with_capacity(files.len());
    let mut freed_bytes = 0;

    for file in files {
        match std::fs::remove_file(&file.path) {
            Ok(()) => {
                freed_bytes += file.size_bytes;
                entries.push(DeletionEntry {
                    name: file.name,
                    error: None,
                });
            }
            Err(e) => {
                warn!(file = %file.path.display(), error = %e, "Failed to delete log file");
                entries.push(DeletionEntry {
                    name: file.name,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    DeletionReport {
        entries,
        freed_bytes,
    }
}
