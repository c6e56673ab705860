use anyhow::{Context, Result};
use download_meeting_recordings::cli::Cli;
use download_meeting_recordings::models::load_work_items;
use download_meeting_recordings::utils::logging;
use download_meeting_recordings::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // 加载配置：命令行 > 环境变量 > 默认值
    let config = cli.into_config(Config::from_env());

    // 初始化日志
    logging::init(config.verbose_logging);

    // 先读取链接列表，失败时不启动浏览器
    let items = load_work_items(&config.source_file)
        .await
        .with_context(|| format!("无法加载链接列表: {}", config.source_file.display()))?;

    // 初始化并运行应用
    let _report = App::initialize(config).await?.run(items).await?;

    Ok(())
}
