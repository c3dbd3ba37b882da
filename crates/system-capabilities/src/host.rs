//! 主机资源监控模块。
//!
//! 使用 sysinfo 采样全局 CPU、内存以及系统盘使用率。

use std::path::{Path, PathBuf};
use std::time::Duration;

use copilot_demo_core::HealthStatus;
use sysinfo::{Disks, MINIMUM_CPU_UPDATE_INTERVAL, System};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("资源采样任务失败: {0}")]
    Sampler(#[from] tokio::task::JoinError),
}

/// 一次资源采样的结果（百分比）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
}

impl HostSnapshot {
    pub fn status(&self) -> HealthStatus {
        HealthStatus::classify(self.cpu_percent, self.memory_percent)
    }
}

/// 主机资源能力接口。
#[derive(Debug, Clone)]
pub struct HostCapabilities {
    sample_interval: Duration,
    disk_root: PathBuf,
}

impl HostCapabilities {
    pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::with_sample_interval(Self::DEFAULT_SAMPLE_INTERVAL)
    }

    /// 采样间隔不会低于 sysinfo 要求的最小 CPU 刷新间隔。
    pub fn with_sample_interval(interval: Duration) -> Self {
        Self {
            sample_interval: interval.max(MINIMUM_CPU_UPDATE_INTERVAL),
            disk_root: Self::system_root(),
        }
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    /// 系统盘根路径：Windows 为 `C:\`，其他平台为 `/`。
    pub fn system_root() -> PathBuf {
        if cfg!(target_os = "windows") {
            PathBuf::from("C:\\")
        } else {
            PathBuf::from("/")
        }
    }

    /// 采样一次主机资源，CPU 使用率在采样间隔内计算。
    pub async fn snapshot(&self) -> Result<HostSnapshot, HostError> {
        let interval = self.sample_interval;
        let disk_root = self.disk_root.clone();

        let snapshot = tokio::task::spawn_blocking(move || {
            let mut system = System::new();
            system.refresh_cpu();
            std::thread::sleep(interval);
            system.refresh_cpu();
            system.refresh_memory();

            HostSnapshot {
                cpu_percent: f64::from(system.global_cpu_info().cpu_usage()),
                memory_percent: used_percent(system.total_memory(), system.available_memory()),
                disk_percent: disk_usage_percent(&disk_root),
            }
        })
        .await?;

        debug!(
            cpu = snapshot.cpu_percent,
            memory = snapshot.memory_percent,
            disk = snapshot.disk_percent,
            "Host snapshot sampled"
        );
        Ok(snapshot)
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

fn used_percent(total: u64, available: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    total.saturating_sub(available) as f64 / total as f64 * 100.0
}

/// 取挂载点为 `root` 最长前缀的磁盘；找不到时退化为所有磁盘的合计。
fn disk_usage_percent(root: &Path) -> f64 {
    let disks = Disks::new_with_refreshed_list();

    let best = disks
        .list()
        .iter()
        .filter(|disk| root.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len());

    if let Some(disk) = best {
        return used_percent(disk.total_space(), disk.available_space());
    }

    let (total, available) = disks
        .list()
        .iter()
        .fold((0u64, 0u64), |(total, available), disk| {
            (total + disk.total_space(), available + disk.available_space())
        });

    if total == 0 {
        warn!(root = %root.display(), "No disk found for system root");
    }
    used_percent(total, available)
}
