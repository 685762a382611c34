//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::models::question::Question;
use crate::utils::logging::truncate_text;
use crate::workflow::ImportCtx;

/// 警告写入服务
///
/// 职责：
/// - 将无效记录（题干为空）和整个文件的失败写入 warn.txt
/// - 一次只写一条
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.warn_file_path
    }

    /// 写入一条无效记录
    ///
    /// # 参数
    /// - `ctx`: 所在文件
    /// - `record_index`: 记录在文件中的序号（从1开始）
    /// - `question`: 记录本身，写入其余字段的预览以便定位
    pub fn write_invalid(&self, ctx: &ImportCtx, record_index: usize, question: &Question) -> Result<()> {
        debug!("写入警告: {} | 记录 {}", ctx, record_index);

        let preview = [
            question.options.join(" / "),
            question.correct_answer.clone(),
            question.explanation.clone(),
        ]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" | ");

        self.append(&format!(
            "文件 {} | 记录 {} | 题干为空 | 其余内容: {}\n",
            ctx.file_name,
            record_index,
            truncate_text(&preview, 80)
        ))
    }

    /// 写入整个文件的失败
    pub fn write_file_error(&self, ctx: &ImportCtx, error: &str) -> Result<()> {
        debug!("写入警告: {} | 文件失败", ctx);
        self.append(&format!("文件 {} | 导入失败: {}\n", ctx.file_name, error))
    }

    fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)
            .with_context(|| format!("无法打开警告文件: {}", self.warn_file_path))?;

        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
