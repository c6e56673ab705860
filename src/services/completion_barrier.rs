//! 下载完成屏障
//!
//! 浏览器下载是异步的，驱动层拿不到"下载完成"信号。
//! 唯一能观察到的是下载目录中是否还有未完成的临时文件（`.crdownload`），
//! 因此在整批处理完后轮询下载目录，直到临时文件全部消失或超时。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::CompletionPolicy;
use crate::error::AppError;

/// 屏障结束状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierOutcome {
    /// 所有下载已完成
    Settled { waited: Duration },
    /// 超时，仍有未完成的下载
    TimedOut { waited: Duration, pending: usize },
}

impl BarrierOutcome {
    pub fn waited(&self) -> Duration {
        match self {
            BarrierOutcome::Settled { waited } | BarrierOutcome::TimedOut { waited, .. } => *waited,
        }
    }
}

/// 下载目录能力
///
/// 只暴露"列出未完成下载"这一能力，便于测试时替换
#[async_trait]
pub trait DownloadDir: Send + Sync {
    /// 目录路径
    fn path(&self) -> &Path;

    /// 列出文件名以 `suffix` 结尾的文件
    async fn in_progress_files(&self, suffix: &str) -> std::io::Result<Vec<String>>;
}

/// 本地文件系统上的下载目录
#[derive(Debug, Clone)]
pub struct LocalDownloadDir {
    path: PathBuf,
}

impl LocalDownloadDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DownloadDir for LocalDownloadDir {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn in_progress_files(&self, suffix: &str) -> std::io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.path).await?;
        let mut pending = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(suffix) {
                pending.push(name);
            }
        }

        Ok(pending)
    }
}

/// 等待下载目录静止
///
/// 每隔 `poll_interval` 检查一次，没有未完成的下载即返回；
/// 超过 `timeout` 后放弃等待。先等待再检查，给浏览器留出创建临时文件的时间。
pub async fn await_quiescence(
    dir: &dyn DownloadDir,
    policy: &CompletionPolicy,
) -> Result<BarrierOutcome, AppError> {
    info!(
        "⏳ 等待所有下载完成（直到 {} 中没有 {} 文件）...",
        dir.path().display(),
        policy.in_progress_suffix
    );

    let started = Instant::now();
    loop {
        sleep(policy.poll_interval).await;

        let pending = list_pending(dir, policy).await?;
        let waited = started.elapsed();

        if pending.is_empty() {
            info!("✓ 所有下载已完成，等待 {} 秒", waited.as_secs());
            return Ok(BarrierOutcome::Settled { waited });
        }

        if waited >= policy.timeout {
            warn!(
                "⚠️ 等待下载超时 ({} 秒)，仍有 {} 个文件未完成: {:?}",
                policy.timeout.as_secs(),
                pending.len(),
                pending
            );
            return Ok(BarrierOutcome::TimedOut {
                waited,
                pending: pending.len(),
            });
        }

        debug!("仍有 {} 个下载未完成: {:?}", pending.len(), pending);
    }
}

/// 开始前检查是否残留旧的未完成文件，残留文件会让屏障一直等到超时
///
/// 只做提示：读取目录失败时记录警告并返回 0
pub async fn warn_stale_downloads(dir: &dyn DownloadDir, policy: &CompletionPolicy) -> usize {
    let stale = match dir.in_progress_files(&policy.in_progress_suffix).await {
        Ok(stale) => stale,
        Err(e) => {
            warn!(
                "⚠️ 无法检查下载目录 {} 中的旧文件: {}",
                dir.path().display(),
                e
            );
            return 0;
        }
    };
    if !stale.is_empty() {
        warn!(
            "⚠️ 下载目录 {} 中已有 {} 个旧的 {} 文件，请确认后清理: {:?}",
            dir.path().display(),
            stale.len(),
            policy.in_progress_suffix,
            stale
        );
    }
    stale.len()
}

async fn list_pending(
    dir: &dyn DownloadDir,
    policy: &CompletionPolicy,
) -> Result<Vec<String>, AppError> {
    dir.in_progress_files(&policy.in_progress_suffix)
        .await
        .map_err(|source| AppError::Barrier {
            path: dir.path().to_path_buf(),
            source,
        })
}
