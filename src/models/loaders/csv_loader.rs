use crate::error::InputError;
use crate::models::work_item::WorkItem;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// 注释行前缀
const COMMENT_MARKER: char = '#';

/// 从 CSV 文件加载所有待下载的录像
///
/// 第一行为表头，每行前两列依次为链接和密码
pub async fn load_work_items(csv_path: &Path) -> Result<Vec<WorkItem>, InputError> {
    let content = fs::read_to_string(csv_path)
        .await
        .map_err(|source| InputError::Read {
            path: csv_path.to_path_buf(),
            source,
        })?;

    parse_work_items(&content, csv_path)
}

/// 解析 CSV 内容
///
/// - 跳过以 `#` 开头的行和空行
/// - 链接或密码为空的行跳过并给出警告
/// - 重复的链接保留，按出现顺序分别下载
///
/// # 参数
/// - `content`: CSV 文本
/// - `source`: 来源文件路径（仅用于错误信息）
pub fn parse_work_items(content: &str, source: &Path) -> Result<Vec<WorkItem>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut items = Vec::new();
    let mut seen = HashSet::new();

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source_err| InputError::Csv {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        // 表头占第 1 行
        let line = index + 2;

        let url = record.get(0).unwrap_or_default().trim();
        if url.is_empty() && record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if url.starts_with(COMMENT_MARKER) {
            debug!("第 {} 行为注释，跳过", line);
            continue;
        }

        let password = record.get(1).unwrap_or_default().trim();
        if url.is_empty() || password.is_empty() {
            warn!("⚠️ 第 {} 行缺少链接或密码，跳过", line);
            continue;
        }

        if !seen.insert(url.to_string()) {
            warn!("⚠️ 第 {} 行的链接重复出现，将再次下载: {}", line, url);
        }

        items.push(WorkItem::new(url, password));
    }

    if items.is_empty() {
        return Err(InputError::EmptyInput {
            path: source.to_path_buf(),
        });
    }

    Ok(items)
}
