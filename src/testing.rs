//! 测试用的假浏览器和假人工处理

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::error::RetrievalError;
use crate::infrastructure::PageDriver;
use crate::models::WorkItem;
use crate::services::{classify, ChallengeResolver};

/// 一个假页面的行为
#[derive(Debug, Clone)]
pub struct FakePage {
    redirect_to: Option<String>,
    fail_navigation: bool,
    has_password_field: bool,
    download_buttons: usize,
    buttons_after_resolution: usize,
}

impl FakePage {
    /// 输入密码后正好有一个下载按钮
    pub fn ready() -> Self {
        Self {
            redirect_to: None,
            fail_navigation: false,
            has_password_field: true,
            download_buttons: 1,
            buttons_after_resolution: 1,
        }
    }

    /// 输入密码后没有下载按钮，人工处理后出现 `after_resolution` 个
    pub fn challenged(after_resolution: usize) -> Self {
        Self {
            download_buttons: 0,
            buttons_after_resolution: after_resolution,
            ..Self::ready()
        }
    }

    /// 打不开的页面
    pub fn broken() -> Self {
        Self {
            fail_navigation: true,
            ..Self::ready()
        }
    }

    pub fn redirect_to(mut self, url: &str) -> Self {
        self.redirect_to = Some(url.to_string());
        self
    }

    pub fn buttons(mut self, count: usize) -> Self {
        self.download_buttons = count;
        self
    }

    pub fn without_password_field(mut self) -> Self {
        self.has_password_field = false;
        self
    }
}

/// 假浏览器记录下的操作
#[derive(Debug, Default)]
pub struct FakeState {
    pub visited: Vec<String>,
    pub typed: Vec<(String, String)>,
    pub clicks: Vec<String>,
    /// 点击了下载按钮的页面链接
    pub downloads: Vec<String>,
    pub resolved: bool,
    pub closes: usize,
}

/// 按链接返回预设页面的假浏览器，未登记的链接当作没有下载按钮的页面
pub struct FakeDriver {
    pages: HashMap<String, FakePage>,
    current: Option<(String, FakePage)>,
    state: Arc<Mutex<FakeState>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            current: None,
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn state(&self) -> Arc<Mutex<FakeState>> {
        Arc::clone(&self.state)
    }

    fn current(&self) -> Result<&(String, FakePage), RetrievalError> {
        self.current
            .as_ref()
            .ok_or_else(|| RetrievalError::Automation("没有打开的页面".to_string()))
    }

    fn download_button_count(&self) -> Result<usize, RetrievalError> {
        let (_, page) = self.current()?;
        if self.state.lock().unwrap().resolved {
            Ok(page.buttons_after_resolution)
        } else {
            Ok(page.download_buttons)
        }
    }

    fn is_download_button(&self, locator: &str) -> bool {
        self.current
            .as_ref()
            .and_then(|(url, _)| classify(url).ok())
            .is_some_and(|site| site.profile().download_button == locator)
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn goto(&mut self, url: &str) -> Result<(), RetrievalError> {
        self.state.lock().unwrap().visited.push(url.to_string());
        let page = self
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| FakePage::ready().buttons(0));
        if page.fail_navigation {
            return Err(RetrievalError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        let current_url = page.redirect_to.clone().unwrap_or_else(|| url.to_string());
        self.current = Some((current_url, page));
        self.state.lock().unwrap().resolved = false;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, RetrievalError> {
        Ok(self.current()?.0.clone())
    }

    async fn count(&mut self, locator: &str) -> Result<usize, RetrievalError> {
        if self.is_download_button(locator) {
            self.download_button_count()
        } else {
            Ok(1)
        }
    }

    async fn type_into(&mut self, locator: &str, text: &str) -> Result<(), RetrievalError> {
        let (_, page) = self.current()?;
        if !page.has_password_field {
            return Err(RetrievalError::ElementNotFound {
                locator: locator.to_string(),
                message: "no node found".to_string(),
            });
        }
        self.state
            .lock()
            .unwrap()
            .typed
            .push((locator.to_string(), text.to_string()));
        Ok(())
    }

    async fn click(&mut self, locator: &str) -> Result<(), RetrievalError> {
        if self.is_download_button(locator) {
            if self.download_button_count()? == 0 {
                return Err(RetrievalError::ElementNotFound {
                    locator: locator.to_string(),
                    message: "no node found".to_string(),
                });
            }
            let url = self.current()?.0.clone();
            self.state.lock().unwrap().downloads.push(url);
        }
        self.state.lock().unwrap().clicks.push(locator.to_string());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.state.lock().unwrap().closes += 1;
        Ok(())
    }
}

/// 假人工处理：调用即视为操作员已在浏览器中处理完毕
pub struct FakeResolver {
    state: Arc<Mutex<FakeState>>,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl FakeResolver {
    pub fn new(state: Arc<Mutex<FakeState>>) -> Self {
        Self {
            state,
            calls: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    /// 模拟标准输入已关闭
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ChallengeResolver for FakeResolver {
    async fn await_resolution(&self, _item: &WorkItem) -> Result<(), RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RetrievalError::Resolver("标准输入已关闭".to_string()));
        }
        self.state.lock().unwrap().resolved = true;
        Ok(())
    }
}
