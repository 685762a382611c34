//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量导入和结果输出，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_importer (处理 Vec<文件>)
//!     ↓
//! workflow::QuestionImporter (处理单个文件：按扩展名分发)
//!     ↓
//! services (能力层：解码 / 表格提取 / 文档提取 / 归一化 / warn)
//! ```
//!
//! ## 设计原则
//!
//! 1. **向下依赖**：编排层 → workflow → services → models
//! 2. **无业务逻辑**：只做调度、统计和输出，不做具体解析判断

pub mod batch_importer;

pub use batch_importer::{App, BatchSummary};
