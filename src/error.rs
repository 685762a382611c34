use thiserror::Error;

use crate::workflow::SourceFormat;

/// 导入错误类型
///
/// 只有文件级别的失败才会成为错误；单条记录不完整不算错误，
/// 而是以无效记录的形式返回给调用方。
#[derive(Debug, Error)]
pub enum ImportError {
    /// 不支持的文件扩展名（在任何解码之前返回）
    #[error("不支持的文件格式: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// 文件无法解码为工作簿或纯文本
    #[error("文件解码失败 ({format}): {source}")]
    Decode {
        format: SourceFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },

    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 文件超过大小上限，不做解码
    #[error("文件过大 ({path}): {size} 字节，上限 {limit} 字节")]
    TooLarge { path: String, size: u64, limit: u64 },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 同义词表生成的正则无效
    #[error("无效的标签模式 '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ImportError {
    /// 创建不支持格式错误
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        ImportError::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// 创建解码错误
    pub fn decode(
        format: SourceFormat,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ImportError::Decode {
            format,
            source: source.into(),
        }
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ImportError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ImportError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 导入结果类型
pub type ImportResult<T> = Result<T, ImportError>;
