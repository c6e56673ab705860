/// 日志工具模块
///
/// 初始化 tracing 输出，默认 info 级别，可通过 `RUST_LOG` 覆盖
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// # 参数
/// - `verbose`: 是否显示详细日志（debug 级别）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 只放开本程序的日志级别，浏览器协议库保持 warn
fn default_filter(level: &str) -> String {
    format!("warn,download_meeting_recordings={}", level)
}
