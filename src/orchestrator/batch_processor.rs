//! 批量下载处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量录像的处理和浏览器资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动浏览器（失败即中止）
//! 2. **顺序处理**：按输入顺序逐个委托 `RetrievalFlow` 触发下载
//! 3. **失败收集**：单个录像失败只记入失败列表，继续处理下一个
//! 4. **完成屏障**：全部触发后等待下载目录中没有未完成的文件
//! 5. **资源释放**：无论成功与否，浏览器都只关闭一次

use crate::browser;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::PageDriver;
use crate::models::{FailureLog, WorkItem};
use crate::services::{
    await_quiescence, warn_stale_downloads, BarrierOutcome, DownloadDir, LocalDownloadDir,
    TerminalResolver,
};
use crate::workflow::{ItemState, RetrievalCtx, RetrievalFlow};
use tracing::{debug, error, info, warn};

/// 应用主结构
///
/// 唯一持有浏览器会话的模块
pub struct App {
    config: Config,
    driver: Box<dyn PageDriver>,
    flow: RetrievalFlow,
    download_dir: Box<dyn DownloadDir>,
}

/// 整批处理结果
#[derive(Debug)]
pub struct RunReport {
    /// 尝试的录像数量
    pub attempted: usize,
    /// 成功触发下载的数量
    pub triggered: usize,
    pub failures: FailureLog,
    pub barrier: BarrierOutcome,
}

impl App {
    /// 初始化应用：启动浏览器
    pub async fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let driver = browser::launch_download_browser(&config).await?;
        let download_dir = LocalDownloadDir::new(config.download_dir.clone());
        let flow = RetrievalFlow::new(&config, Box::new(TerminalResolver));

        Ok(Self::with_parts(
            config,
            Box::new(driver),
            flow,
            Box::new(download_dir),
        ))
    }

    /// 使用已有的组件创建应用
    pub fn with_parts(
        config: Config,
        driver: Box<dyn PageDriver>,
        flow: RetrievalFlow,
        download_dir: Box<dyn DownloadDir>,
    ) -> Self {
        Self {
            config,
            driver,
            flow,
            download_dir,
        }
    }

    /// 运行应用主逻辑
    ///
    /// 消耗 `self`：返回前（包括出错时）关闭浏览器
    pub async fn run(mut self, items: Vec<WorkItem>) -> AppResult<RunReport> {
        let outcome = self.process_all(&items).await;

        if let Err(e) = self.driver.close().await {
            warn!("⚠️ 关闭浏览器失败: {}", e);
        }

        outcome
    }

    /// 处理所有录像
    async fn process_all(&mut self, items: &[WorkItem]) -> AppResult<RunReport> {
        info!("开始处理 {} 个录像...", items.len());
        warn_stale_downloads(self.download_dir.as_ref(), &self.config.completion).await;

        let total = items.len();
        let mut failures = FailureLog::default();
        let mut triggered = 0;

        for (index, item) in items.iter().enumerate() {
            let ctx = RetrievalCtx::new(index + 1, total);
            log_item_start(&ctx, item);

            match self.flow.retrieve(self.driver.as_mut(), item, &ctx).await {
                Ok(retrieved) => {
                    triggered += 1;
                    info!("{} ✓ 已触发 {} 下载", ctx, retrieved.site);
                }
                Err(reason) => {
                    debug!("{} 状态: {}", ctx, ItemState::Failed);
                    error!("{} 错误: {}", ctx, reason);
                    error!("{} ❌ 无法下载", ctx);
                    failures.push(item.url.clone(), reason);
                }
            }
        }

        let barrier = await_quiescence(self.download_dir.as_ref(), &self.config.completion).await?;

        let report = RunReport {
            attempted: total,
            triggered,
            failures,
            barrier,
        };
        report_failures(&report.failures);
        print_final_stats(&report);

        Ok(report)
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量下载会议录像");
    info!("📁 下载目录: {}", config.download_dir.display());
    info!(
        "🤖 模式: {}",
        if config.unattended {
            "无人值守（遇到验证码直接跳过）"
        } else {
            "交互（遇到验证码等待人工处理）"
        }
    );
    info!("{}", "=".repeat(60));
}

fn log_item_start(ctx: &RetrievalCtx, item: &WorkItem) {
    info!("\n{} {}", ctx, "─".repeat(30));
    info!("{} 处理: {}", ctx, item);
    debug!("{} 状态: {}", ctx, ItemState::Pending);
}

fn report_failures(failures: &FailureLog) {
    if failures.is_empty() {
        return;
    }
    error!("\n无法下载以下链接:");
    for failed in failures.iter() {
        error!("    - {}", failed.url);
    }
}

fn print_final_stats(report: &RunReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已触发下载: {}/{}", report.triggered, report.attempted);
    info!("❌ 失败: {}", report.failures.len());
    match report.barrier {
        BarrierOutcome::Settled { waited } => {
            info!("⏱️ 等待下载完成: {} 秒", waited.as_secs())
        }
        BarrierOutcome::TimedOut { waited, pending } => {
            warn!(
                "⏱️ 等待 {} 秒后仍有 {} 个下载未完成",
                waited.as_secs(),
                pending
            )
        }
    }
    info!("{}", "=".repeat(60));
}
