//! 页面驱动 - 基础设施层
//!
//! 持有唯一的浏览器会话（Browser + Page），只暴露"导航 / 查找 / 输入 / 点击"能力，
//! 不认识 Webex / Zoom，也不处理下载流程。

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::RetrievalError;

/// 浏览器自动化能力
///
/// 所有定位符均为 XPath
#[async_trait]
pub trait PageDriver: Send {
    /// 导航到指定链接
    async fn goto(&mut self, url: &str) -> Result<(), RetrievalError>;

    /// 当前页面链接（跳转之后）
    async fn current_url(&mut self) -> Result<String, RetrievalError>;

    /// 统计匹配定位符的元素数量
    async fn count(&mut self, locator: &str) -> Result<usize, RetrievalError>;

    /// 向第一个匹配的元素输入文本
    async fn type_into(&mut self, locator: &str, text: &str) -> Result<(), RetrievalError>;

    /// 点击第一个匹配的元素
    async fn click(&mut self, locator: &str) -> Result<(), RetrievalError>;

    /// 关闭浏览器会话
    async fn close(&mut self) -> Result<()>;
}

/// 基于 chromiumoxide 的页面驱动
pub struct ChromePageDriver {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromePageDriver {
    pub fn new(browser: Browser, page: Page, handler_task: JoinHandle<()>) -> Self {
        Self {
            browser,
            page,
            handler_task,
        }
    }

    async fn find(&self, locator: &str) -> Result<Element, RetrievalError> {
        self.page
            .find_xpath(locator)
            .await
            .map_err(|e| RetrievalError::ElementNotFound {
                locator: locator.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl PageDriver for ChromePageDriver {
    async fn goto(&mut self, url: &str) -> Result<(), RetrievalError> {
        debug!("导航到: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| RetrievalError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, RetrievalError> {
        self.page
            .url()
            .await
            .map_err(|e| RetrievalError::Automation(e.to_string()))?
            .ok_or_else(|| RetrievalError::Automation("无法获取当前页面链接".to_string()))
    }

    async fn count(&mut self, locator: &str) -> Result<usize, RetrievalError> {
        // 用 JS 统计，零个匹配时不会报错
        let js_code = format!(
            "document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength",
            serde_json::to_string(locator).map_err(|e| RetrievalError::Automation(e.to_string()))?
        );

        let result = self
            .page
            .evaluate(js_code)
            .await
            .map_err(|e| RetrievalError::Automation(e.to_string()))?;
        let count: usize = result
            .into_value()
            .map_err(|e| RetrievalError::Automation(e.to_string()))?;

        debug!("定位符 {} 匹配到 {} 个元素", locator, count);
        Ok(count)
    }

    async fn type_into(&mut self, locator: &str, text: &str) -> Result<(), RetrievalError> {
        let element = self.find(locator).await?;
        element
            .focus()
            .await
            .map_err(|e| RetrievalError::Automation(e.to_string()))?;
        element
            .type_str(text)
            .await
            .map_err(|e| RetrievalError::Automation(e.to_string()))?;
        Ok(())
    }

    async fn click(&mut self, locator: &str) -> Result<(), RetrievalError> {
        let element = self.find(locator).await?;
        element
            .click()
            .await
            .map_err(|e| RetrievalError::Automation(e.to_string()))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        info!("🔒 关闭浏览器");
        let closed = self.browser.close().await;
        match &closed {
            Ok(_) => {
                if let Err(e) = self.browser.wait().await {
                    warn!("等待浏览器进程退出失败: {}", e);
                }
            }
            // 连接已断开时进程可能还在，wait 会一直阻塞
            Err(e) => {
                warn!("⚠️ 无法正常关闭浏览器 ({})，强制结束进程", e);
                if let Some(Err(kill_err)) = self.browser.kill().await {
                    warn!("强制结束浏览器进程失败: {}", kill_err);
                }
            }
        }
        self.handler_task.abort();
        closed?;
        Ok(())
    }
}
