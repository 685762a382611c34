//! 格式分发 - 流程层
//!
//! 导入的唯一入口：根据文件扩展名选定格式，再交给对应的提取器。
//! 扩展名不受支持时在任何解码之前直接失败。

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ImportError, ImportResult};
use crate::models::question::Question;
use crate::models::synonyms::SynonymTables;
use crate::services::{FieldNormalizer, FlowDocumentExtractor, TabularExtractor};

/// 源文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// 电子表格（xlsx / xls）
    Tabular,
    /// Word 文档（docx / doc）
    FlowDocument,
}

impl SourceFormat {
    /// 根据文件名的扩展名（不区分大小写）选定格式
    pub fn from_file_name(file_name: &str) -> ImportResult<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match extension.as_str() {
            "xlsx" | "xls" => Ok(SourceFormat::Tabular),
            "docx" | "doc" => Ok(SourceFormat::FlowDocument),
            _ => Err(ImportError::unsupported_format(extension)),
        }
    }

    /// 文件名是否带有受支持的扩展名
    pub fn is_supported(file_name: &str) -> bool {
        Self::from_file_name(file_name).is_ok()
    }
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Tabular => write!(f, "电子表格"),
            SourceFormat::FlowDocument => write!(f, "Word文档"),
        }
    }
}

/// 提取能力：字节流 → 题目列表
///
/// 每次调用互不影响，提取器本身只持有只读的同义词表。
pub trait QuestionExtractor {
    fn extract(&self, bytes: &[u8]) -> ImportResult<Vec<Question>>;
}

/// 题目导入器
#[derive(Debug, Clone)]
pub struct QuestionImporter {
    tabular: TabularExtractor,
    flow: FlowDocumentExtractor,
}

impl QuestionImporter {
    /// 用给定的同义词表创建导入器（标签模式在此编译）
    pub fn new(tables: Arc<SynonymTables>) -> ImportResult<Self> {
        let normalizer = FieldNormalizer::new(tables);
        Ok(Self {
            tabular: TabularExtractor::new(normalizer.clone()),
            flow: FlowDocumentExtractor::new(normalizer)?,
        })
    }

    /// 解析一个文件
    ///
    /// 返回的列表中包含无效记录（题干为空），由调用方统计和展示。
    pub fn parse(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Vec<Question>> {
        let format = SourceFormat::from_file_name(file_name)?;
        debug!("{} 按{}解析，{} 字节", file_name, format, bytes.len());
        self.extractor(format).extract(bytes)
    }

    fn extractor(&self, format: SourceFormat) -> &dyn QuestionExtractor {
        match format {
            SourceFormat::Tabular => &self.tabular,
            SourceFormat::FlowDocument => &self.flow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn importer() -> QuestionImporter {
        QuestionImporter::new(Arc::new(SynonymTables::default())).unwrap()
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(
            SourceFormat::from_file_name("bank.xlsx").unwrap(),
            SourceFormat::Tabular
        );
        assert_eq!(
            SourceFormat::from_file_name("BANK.XLS").unwrap(),
            SourceFormat::Tabular
        );
        assert_eq!(
            SourceFormat::from_file_name("quiz.docx").unwrap(),
            SourceFormat::FlowDocument
        );
        assert_eq!(
            SourceFormat::from_file_name("dir/old.Doc").unwrap(),
            SourceFormat::FlowDocument
        );
        assert!(SourceFormat::is_supported("a.xlsx"));
        assert!(!SourceFormat::is_supported("a.csv"));
    }

    #[test]
    fn test_unsupported_extension_names_it() {
        // 内容不是任何合法格式，若尝试解码会得到 Decode 错误
        let err = importer().parse("bank.pdf", b"%PDF-1.7").unwrap_err();
        match err {
            ImportError::UnsupportedFormat { extension } => assert_eq!(extension, "pdf"),
            other => panic!("unexpected error: {other}"),
        }

        let err = importer().parse("README", b"").unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnsupportedFormat { ref extension } if extension.is_empty()
        ));
    }

    #[test]
    fn test_corrupt_file_is_a_decode_error() {
        let err = importer().parse("bank.xlsx", b"not a zip").unwrap_err();
        assert!(matches!(
            err,
            ImportError::Decode {
                format: SourceFormat::Tabular,
                ..
            }
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceFormat::Tabular.to_string(), "电子表格");
        assert_eq!(SourceFormat::FlowDocument.to_string(), "Word文档");
    }
}
