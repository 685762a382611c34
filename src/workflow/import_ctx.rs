//! 文件导入上下文
//!
//! 封装"我正在导入第几个文件、叫什么"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 文件导入上下文
#[derive(Debug, Clone)]
pub struct ImportCtx {
    /// 文件路径
    pub path: PathBuf,

    /// 文件名（用于判断格式和报告显示）
    pub file_name: String,

    /// 文件索引（从1开始，仅用于日志显示）
    pub file_index: usize,
}

impl ImportCtx {
    /// 创建新的导入上下文
    pub fn new(path: impl AsRef<Path>, file_index: usize) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            path,
            file_name,
            file_index,
        }
    }
}

impl Display for ImportCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文件 #{} {}]", self.file_index, self.file_name)
    }
}
