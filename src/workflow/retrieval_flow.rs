//! 录像下载流程 - 流程层
//!
//! 核心职责：定义"一个录像"的完整下载流程
//!
//! 流程顺序：
//! 1. 打开链接 → 读取跳转后的链接 → 识别网站
//! 2. 输入密码 → 点击确认
//! 3. 查找下载按钮（找不到时按模式决定：直接失败 / 等待人工处理）
//! 4. 点击下载
//!
//! 只负责触发下载，下载是否完成由编排层在整批结束后统一等待。

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::{Config, SettleDelays};
use crate::error::RetrievalError;
use crate::infrastructure::PageDriver;
use crate::models::{SiteKind, SiteProfile, WorkItem};
use crate::services::{classify, ChallengeResolver};
use crate::workflow::retrieval_ctx::{ItemState, RetrievalCtx};

/// 下载触发结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieved {
    pub site: SiteKind,
    /// 跳转后的链接
    pub current_url: String,
    /// 是否经过人工处理
    pub resolved_manually: bool,
}

/// 录像下载流程
///
/// - 不持有浏览器会话，由调用方传入
/// - 每个录像只尝试一次，出错直接返回 `Err`
pub struct RetrievalFlow {
    settle: SettleDelays,
    unattended: bool,
    resolver: Box<dyn ChallengeResolver>,
}

impl RetrievalFlow {
    pub fn new(config: &Config, resolver: Box<dyn ChallengeResolver>) -> Self {
        Self {
            settle: config.settle,
            unattended: config.unattended,
            resolver,
        }
    }

    pub async fn retrieve(
        &self,
        driver: &mut dyn PageDriver,
        item: &WorkItem,
        ctx: &RetrievalCtx,
    ) -> Result<Retrieved, RetrievalError> {
        driver.goto(&item.url).await?;
        log_state(ctx, ItemState::Navigated);

        let current_url = driver.current_url().await?;
        let site = classify(&current_url)?;
        log_state(ctx, ItemState::Classified(site));
        info!("{} 访问 {} 链接: {}", ctx, site, current_url);

        let profile = site.profile();
        self.submit_password(driver, profile, item).await?;
        log_state(ctx, ItemState::Authenticated);

        let found = driver.count(profile.download_button).await?;
        let resolved_manually = if found == 1 {
            false
        } else {
            self.resolve_challenge(driver, profile, item, ctx, found)
                .await?;
            true
        };

        info!("{} 📥 开始下载", ctx);
        driver.click(profile.download_button).await?;
        debug!("等待浏览器开始下载");
        sleep(self.settle.after_download).await;
        log_state(ctx, ItemState::DownloadTriggered);

        Ok(Retrieved {
            site,
            current_url,
            resolved_manually,
        })
    }

    /// 输入密码并点击确认
    async fn submit_password(
        &self,
        driver: &mut dyn PageDriver,
        profile: &SiteProfile,
        item: &WorkItem,
    ) -> Result<(), RetrievalError> {
        sleep(self.settle.before_password).await;
        driver
            .type_into(profile.password_field, &item.password)
            .await?;
        driver.click(profile.submit_button).await?;

        debug!("点击确认后等待页面加载");
        sleep(self.settle.after_submit).await;
        Ok(())
    }

    /// 下载按钮不是唯一的：可能是验证码，也可能是密码错误
    async fn resolve_challenge(
        &self,
        driver: &mut dyn PageDriver,
        profile: &SiteProfile,
        item: &WorkItem,
        ctx: &RetrievalCtx,
        found: usize,
    ) -> Result<(), RetrievalError> {
        error!(
            "{} 找到 {} 个下载按钮，{} 页面可能需要验证码或密码错误",
            ctx, found, profile.kind
        );

        if self.unattended {
            return Err(RetrievalError::AuthOrChallenge {
                site: profile.kind,
                found,
            });
        }

        self.resolver.await_resolution(item).await?;

        let found = driver.count(profile.download_button).await?;
        match found {
            0 => Err(RetrievalError::AuthOrChallenge {
                site: profile.kind,
                found,
            }),
            1 => Ok(()),
            _ => {
                warn!("{} 找到 {} 个下载按钮，点击第一个", ctx, found);
                Ok(())
            }
        }
    }
}

fn log_state(ctx: &RetrievalCtx, state: ItemState) {
    debug!("{} 状态: {}", ctx, state);
}
