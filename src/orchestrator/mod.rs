//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和资源管理，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<WorkItem>，持有浏览器会话)
//!     ↓
//! workflow::RetrievalFlow (处理单个录像)
//!     ↓
//! services (能力层：网站识别 / 人工处理 / 完成屏障)
//!     ↓
//! infrastructure (基础设施：PageDriver)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有浏览器会话
//! 2. **失败隔离**：单个录像失败不影响其他录像
//! 3. **只关闭一次**：`App::run` 消耗 `self`，返回前关闭浏览器

pub mod batch_processor;

pub use batch_processor::{App, RunReport};
