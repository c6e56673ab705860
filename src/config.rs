use std::path::PathBuf;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 录像链接和密码所在的 CSV 文件
    pub source_file: PathBuf,
    /// 下载目录
    pub download_dir: PathBuf,
    /// 浏览器可执行文件路径
    pub browser_executable: PathBuf,
    /// 浏览器用户数据目录（写入下载偏好设置）
    pub profile_dir: PathBuf,
    /// 无人值守模式：不等待人工处理验证码，直接记为失败
    pub unattended: bool,
    /// 是否以无头模式启动浏览器
    pub headless: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 页面操作之间的等待时间
    pub settle: SettleDelays,
    /// 下载完成屏障
    pub completion: CompletionPolicy,
}

/// 页面渲染等待时间
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleDelays {
    /// 打开页面后，输入密码前
    pub before_password: Duration,
    /// 点击确认后，查找下载按钮前
    pub after_submit: Duration,
    /// 点击下载后，等待浏览器开始下载
    pub after_download: Duration,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            before_password: Duration::from_secs(2),
            after_submit: Duration::from_secs(5),
            after_download: Duration::from_secs(3),
        }
    }
}

/// 下载完成屏障的轮询策略
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
    /// 浏览器未完成下载的文件后缀
    pub in_progress_suffix: String,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(600),
            in_progress_suffix: ".crdownload".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from("recordings.csv"),
            download_dir: PathBuf::from("."),
            browser_executable: PathBuf::from("utilities").join(default_browser_name()),
            profile_dir: std::env::temp_dir().join("download_meeting_recordings_profile"),
            unattended: false,
            headless: false,
            verbose_logging: false,
            settle: SettleDelays::default(),
            completion: CompletionPolicy::default(),
        }
    }
}

fn default_browser_name() -> &'static str {
    if cfg!(windows) {
        "chrome.exe"
    } else {
        "chrome"
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        let completion = CompletionPolicy {
            timeout: std::env::var("COMPLETION_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).map(Duration::from_secs).unwrap_or(default.completion.timeout),
            ..default.completion
        };
        Self {
            source_file: default.source_file,
            download_dir: std::env::var("DOWNLOAD_DIR").map(PathBuf::from).unwrap_or(default.download_dir),
            browser_executable: std::env::var("BROWSER_EXECUTABLE").map(PathBuf::from).unwrap_or(default.browser_executable),
            profile_dir: std::env::var("PROFILE_DIR").map(PathBuf::from).unwrap_or(default.profile_dir),
            unattended: std::env::var("UNATTENDED").ok().and_then(|v| v.parse().ok()).unwrap_or(default.unattended),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            settle: default.settle,
            completion,
        }
    }
}
