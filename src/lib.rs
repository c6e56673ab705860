//! # Download Meeting Recordings
//!
//! 批量下载有密码保护的 Webex / Zoom 会议录像
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动浏览器，写入下载偏好设置
//! - `infrastructure/` - `PageDriver`，唯一的 page owner，提供导航 / 输入 / 点击能力
//!
//! ### ② 业务能力层（Services）
//! - `site_classifier` - 识别 Webex / Zoom
//! - `challenge_resolver` - 等待人工处理验证码
//! - `completion_barrier` - 等待下载目录中的临时文件消失
//!
//! ### ③ 流程层（Workflow）
//! - `RetrievalFlow` - 一个录像的完整流程（打开 → 识别 → 输入密码 → 下载）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 顺序处理所有录像，收集失败，关闭浏览器

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod testing;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, RetrievalError};
pub use infrastructure::PageDriver;
pub use models::{SiteKind, WorkItem};
pub use orchestrator::{App, RunReport};
pub use workflow::{RetrievalCtx, RetrievalFlow};
