//! 批量导入器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文件的导入和结果输出。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化日志文件、加载同义词表、创建 `QuestionImporter`
//! 2. **文件收集**：扫描输入目录，合并命令行指定的文件
//! 3. **并发控制**：使用 Semaphore 限制同时解析的文件数量
//! 4. **失败隔离**：单个文件失败只记录到报告和 warn.txt，不影响其他文件
//! 5. **结果输出**：JSON 报告、警告文件、运行日志、全局统计
//!
//! 解析本身是同步的 CPU 任务，放在 `spawn_blocking` 中执行；
//! 导入器只持有只读的同义词表，通过 `Arc` 在任务间共享。

use crate::config::Config;
use crate::error::ImportError;
use crate::models::question::{ImportReport, ImportStats, Question};
use crate::models::{collect_import_files, load_import_file, load_optional_synonym_tables};
use crate::services::WarnWriter;
use crate::utils::logging::{
    append_log_line, init_log_file, log_file_complete, log_files_loaded, log_startup,
    print_final_stats,
};
use crate::workflow::{ImportCtx, QuestionImporter, SourceFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 预览中题干的最大显示长度
const PREVIEW_LEN: usize = 40;

/// 应用主结构
pub struct App {
    config: Config,
    importer: Arc<QuestionImporter>,
    warn_writer: WarnWriter,
}

/// 一次批量导入的结果
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// 按文件顺序排列的报告（包括失败的文件）
    pub reports: Vec<ImportReport>,
    /// 所有成功文件的记录统计
    pub stats: ImportStats,
    pub failed_files: usize,
}

impl BatchSummary {
    pub fn total_files(&self) -> usize {
        self.reports.len()
    }
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.log_file))?;

        log_startup(config.max_concurrent_files);

        let tables = load_optional_synonym_tables(config.synonyms_file.as_deref()).await?;
        let importer = QuestionImporter::new(Arc::new(tables))?;
        let warn_writer = WarnWriter::with_path(config.warn_file.clone());

        Ok(Self {
            config,
            importer: Arc::new(importer),
            warn_writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchSummary> {
        let files = self.collect_files().await?;

        if files.is_empty() {
            warn!("⚠️ 没有找到待导入的文件，程序结束");
            self.write_report(&[]).await?;
            return Ok(BatchSummary::default());
        }

        log_files_loaded(files.len(), self.config.max_concurrent_files);

        let reports = self.import_all(files).await?;
        let summary = self.summarize(reports)?;

        self.write_report(&summary.reports).await?;

        print_final_stats(
            &summary.stats,
            summary.failed_files,
            summary.total_files(),
            &self.config.output_file,
        );

        if summary.failed_files > 0 || summary.stats.invalid > 0 {
            info!("⚠️ 无效记录和失败文件已写入: {}", self.warn_writer.path());
        }

        Ok(summary)
    }

    /// 收集文件：输入目录 + 命令行指定的文件（去重，保持顺序）
    async fn collect_files(&self) -> Result<Vec<PathBuf>> {
        info!("\n📁 正在扫描待导入的文件...");

        let mut files = match collect_import_files(&self.config.input_folder).await {
            Ok(files) => files,
            // 只给了命令行文件时，输入目录可以不存在
            Err(e) if !self.config.input_files.is_empty() => {
                warn!("⚠️ {}，只处理命令行指定的文件", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        for path in &self.config.input_files {
            if !files.contains(path) {
                files.push(path.clone());
            }
        }

        Ok(files)
    }

    /// 并发导入所有文件，结果按输入顺序返回
    async fn import_all(&self, files: Vec<PathBuf>) -> Result<Vec<(ImportCtx, ImportReport)>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_files.max(1)));
        let mut handles = Vec::new();

        for (idx, path) in files.into_iter().enumerate() {
            let ctx = ImportCtx::new(&path, idx + 1);
            let permit = semaphore.clone().acquire_owned().await?;
            let importer = self.importer.clone();
            let max_size = self.config.max_file_size_bytes;
            let task_ctx = ctx.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                import_file(importer, &task_ctx, max_size).await
            });
            handles.push((ctx, handle));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (ctx, handle) in handles {
            let report = match handle.await {
                Ok(Ok(questions)) => ImportReport::parsed(&ctx.file_name, questions),
                Ok(Err(e)) => {
                    error!("{} ❌ 导入失败: {:#}", ctx, e);
                    ImportReport::failed(&ctx.file_name, format!("{:#}", e))
                }
                Err(e) => {
                    error!("{} 任务执行失败: {}", ctx, e);
                    ImportReport::failed(&ctx.file_name, e.to_string())
                }
            };
            reports.push((ctx, report));
        }

        Ok(reports)
    }

    /// 汇总统计，写 warn.txt 和运行日志
    fn summarize(&self, reports: Vec<(ImportCtx, ImportReport)>) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for (ctx, report) in reports {
            match &report.error {
                Some(err) => {
                    summary.failed_files += 1;
                    self.warn_writer.write_file_error(&ctx, err)?;
                    append_log_line(
                        &self.config.log_file,
                        &format!("{} 导入失败: {}", ctx, err),
                    )?;
                }
                None => {
                    for (i, question) in report.questions.iter().enumerate() {
                        if !question.is_valid() {
                            self.warn_writer.write_invalid(&ctx, i + 1, question)?;
                        }
                    }
                    summary.stats.merge(&report.stats);
                    log_file_complete(&ctx, &report.stats);
                    for line in report.preview_lines(PREVIEW_LEN) {
                        tracing::debug!("{} {}", ctx, line);
                    }
                    append_log_line(&self.config.log_file, &format!("{} {}", ctx, report.stats))?;
                }
            }
            summary.reports.push(report);
        }

        Ok(summary)
    }

    async fn write_report(&self, reports: &[ImportReport]) -> Result<()> {
        let json = serde_json::to_string_pretty(reports)?;
        tokio::fs::write(&self.config.output_file, json)
            .await
            .map_err(|e| ImportError::file_write_failed(&self.config.output_file, e))?;
        Ok(())
    }
}

/// 导入单个文件：先按扩展名判断格式，再检查大小并读取，最后解析
async fn import_file(
    importer: Arc<QuestionImporter>,
    ctx: &ImportCtx,
    max_size: u64,
) -> Result<Vec<Question>> {
    SourceFormat::from_file_name(&ctx.file_name)?;

    let bytes = load_import_file(&ctx.path, max_size).await?;
    let file_name = ctx.file_name.clone();

    let questions =
        tokio::task::spawn_blocking(move || importer.parse(&file_name, &bytes)).await??;

    Ok(questions)
}
