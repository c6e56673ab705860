use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// 批量下载 Webex / Zoom 会议录像
///
/// 如果浏览器提示验证码或密码错误：
/// - 交互模式：在浏览器中手动处理后，回到终端按回车继续
/// - 无人值守模式（--no-prompt）：直接跳过该链接
///
/// 所有失败的链接会在最后统一列出
#[derive(Parser, Debug)]
#[command(name = "download_meeting_recordings", version, about, long_about)]
pub struct Cli {
    /// 包含录像链接和密码的 CSV 文件
    #[arg(short, long)]
    pub source: PathBuf,

    /// 下载目录，默认为当前目录
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// 浏览器可执行文件路径，默认为 utilities/chrome
    #[arg(short = 'c', long)]
    pub driver: Option<PathBuf>,

    /// 不提示人工处理，适合自动化运行
    #[arg(short = 'n', long)]
    pub no_prompt: bool,

    /// 以无头模式启动浏览器
    #[arg(long)]
    pub headless: bool,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// 命令行参数覆盖环境变量和默认值
    pub fn into_config(self, base: Config) -> Config {
        Config {
            source_file: self.source,
            download_dir: self.destination.unwrap_or(base.download_dir),
            browser_executable: self.driver.unwrap_or(base.browser_executable),
            unattended: self.no_prompt || base.unattended,
            headless: self.headless || base.headless,
            verbose_logging: self.verbose || base.verbose_logging,
            ..base
        }
    }
}
