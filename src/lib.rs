//! # Question Import
//!
//! 题库导入工具：把格式各异的电子表格和 Word 文档统一解析为题目记录
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - `Question` 记录、导入统计、同义词表，以及文件加载器
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，彼此独立、无共享可变状态
//! - `FieldNormalizer` - 题型 / 难度 / 分值归一化
//! - `document_decoder` - xlsx / xls / docx 二进制解码
//! - `TabularExtractor` - 表头模糊匹配 + 按行提取
//! - `FlowDocumentExtractor` - 题号切分 + 标签字段提取
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个文件"的导入流程
//! - `QuestionImporter` - 按扩展名分发到对应提取器
//! - `ImportCtx` - 上下文封装（文件名 + 文件序号）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_importer` - 批量导入，管理并发和结果输出
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{ImportError, ImportResult};
pub use models::{Difficulty, ImportReport, ImportStats, Question, QuestionType, SynonymTables};
pub use orchestrator::{App, BatchSummary};
pub use workflow::{ImportCtx, QuestionExtractor, QuestionImporter, SourceFormat};
