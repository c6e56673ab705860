use crate::error::RetrievalError;

/// 一个下载失败的录像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub url: String,
    pub reason: RetrievalError,
}

/// 失败列表：按处理顺序追加，整批结束后统一输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureLog {
    entries: Vec<FailedItem>,
}

impl FailureLog {
    pub fn push(&mut self, url: impl Into<String>, reason: RetrievalError) {
        self.entries.push(FailedItem {
            url: url.into(),
            reason,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FailedItem> {
        self.entries.iter()
    }

    /// 失败链接，保持处理顺序
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.url.as_str()).collect()
    }
}
