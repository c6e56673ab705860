//! 单个录像的处理上下文
//!
//! 封装"我正在处理第几个录像"这一信息

use std::fmt::Display;

use crate::models::SiteKind;

/// 录像处理上下文
#[derive(Debug, Clone, Copy)]
pub struct RetrievalCtx {
    /// 录像序号（从1开始，仅用于日志显示）
    pub item_index: usize,
    /// 录像总数
    pub total: usize,
}

impl RetrievalCtx {
    pub fn new(item_index: usize, total: usize) -> Self {
        Self { item_index, total }
    }
}

impl Display for RetrievalCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[录像 {}/{}]", self.item_index, self.total)
    }
}

/// 单个录像的处理状态，只前进不重试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    Navigated,
    Classified(SiteKind),
    Authenticated,
    DownloadTriggered,
    Failed,
}

impl Display for ItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemState::Pending => write!(f, "待处理"),
            ItemState::Navigated => write!(f, "已打开页面"),
            ItemState::Classified(site) => write!(f, "已识别为 {}", site),
            ItemState::Authenticated => write!(f, "已提交密码"),
            ItemState::DownloadTriggered => write!(f, "已开始下载"),
            ItemState::Failed => write!(f, "失败"),
        }
    }
}
