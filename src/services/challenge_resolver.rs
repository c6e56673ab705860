//! 人工处理验证码 / 密码错误
//!
//! 找不到下载按钮时，交互模式下暂停并等待操作员在浏览器中手动处理，
//! 操作员确认后流程继续。

use async_trait::async_trait;
use std::io::{BufRead, Write};
use tracing::warn;

use crate::error::RetrievalError;
use crate::models::WorkItem;

/// 人工处理回调
#[async_trait]
pub trait ChallengeResolver: Send + Sync {
    /// 阻塞直到操作员确认已处理完成
    async fn await_resolution(&self, item: &WorkItem) -> Result<(), RetrievalError>;
}

/// 终端确认：等待操作员按回车
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalResolver;

#[async_trait]
impl ChallengeResolver for TerminalResolver {
    async fn await_resolution(&self, item: &WorkItem) -> Result<(), RetrievalError> {
        warn!(
            "请在浏览器中手动输入验证码或正确的密码，进入下载页面后按回车: {}",
            item.url
        );

        tokio::task::spawn_blocking(|| {
            let mut stdout = std::io::stdout();
            write!(stdout, "按回车继续: ")?;
            stdout.flush()?;

            let mut line = String::new();
            let read = std::io::stdin().lock().read_line(&mut line)?;
            if read == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "标准输入已关闭",
                ));
            }
            Ok(())
        })
        .await
        .map_err(|e| RetrievalError::Resolver(e.to_string()))?
        .map_err(|e| RetrievalError::Resolver(e.to_string()))
    }
}
