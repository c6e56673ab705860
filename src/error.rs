//! 错误类型定义
//!
//! 分为两类：
//! - `AppError`：致命错误（初始化、输入文件、下载目录轮询），直接中止整个运行
//! - `RetrievalError`：单个录像的下载失败，只记入失败列表，不影响后续条目

use std::path::PathBuf;

use crate::models::SiteKind;

/// 应用程序错误类型（致命）
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 会话初始化错误
    #[error("初始化错误: {0}")]
    Init(#[from] InitError),
    /// 输入文件错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 轮询下载目录失败
    #[error("无法读取下载目录 {}: {source}", path.display())]
    Barrier {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 浏览器会话初始化错误
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// 浏览器可执行文件不存在
    #[error("{} 不存在，请提供有效的浏览器驱动路径", path.display())]
    DriverNotFound { path: PathBuf },
    /// 下载目录不存在
    #[error("下载目录不存在或不是目录: {}", path.display())]
    DownloadDirMissing { path: PathBuf },
    /// 浏览器配置失败
    #[error("浏览器配置失败: {0}")]
    BrowserConfig(String),
    /// 浏览器启动失败
    #[error("浏览器启动失败: {source}")]
    BrowserLaunch {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 写入浏览器配置文件失败
    #[error("写入浏览器配置文件失败 ({}): {source}", path.display())]
    Profile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 输入文件错误
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// CSV 解析失败
    #[error("CSV解析失败 ({}): {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// 没有可用的数据行
    #[error("无法从源文件中找到需要的信息: {}", path.display())]
    EmptyInput { path: PathBuf },
}

/// 单个录像下载失败的原因
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetrievalError {
    /// 无法识别的网站
    #[error("未知网站: {url}")]
    UnknownPlatform { url: String },
    /// 没有找到唯一的下载按钮（密码错误或者需要验证码）
    #[error("{site} 页面找到 {found} 个下载按钮，可能需要验证码或密码错误")]
    AuthOrChallenge { site: SiteKind, found: usize },
    /// 页面元素不存在
    #[error("找不到页面元素 {locator}: {message}")]
    ElementNotFound { locator: String, message: String },
    /// 导航失败
    #[error("导航到 {url} 失败: {message}")]
    Navigation { url: String, message: String },
    /// 其他浏览器自动化错误
    #[error("浏览器自动化错误: {0}")]
    Automation(String),
    /// 等待人工处理时出错
    #[error("等待人工确认失败: {0}")]
    Resolver(String),
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
