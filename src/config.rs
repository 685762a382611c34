use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 待导入文件所在目录
    pub input_folder: String,
    /// 命令行显式指定的文件（与目录扫描结果合并）
    pub input_files: Vec<PathBuf>,
    /// JSON 导入报告
    pub output_file: String,
    /// 无效记录和失败文件的警告文件
    pub warn_file: String,
    /// 运行日志文件
    pub log_file: String,
    /// 追加同义词的 TOML 文件（可选）
    pub synonyms_file: Option<String>,
    /// 同时解析的文件数量
    pub max_concurrent_files: usize,
    /// 单个文件大小上限（字节），超过时不解码
    pub max_file_size_bytes: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: "input".to_string(),
            input_files: Vec::new(),
            output_file: "import_result.json".to_string(),
            warn_file: "warn.txt".to_string(),
            log_file: "import_log.txt".to_string(),
            synonyms_file: None,
            max_concurrent_files: 8,
            max_file_size_bytes: 20 * 1024 * 1024,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_folder: std::env::var("IMPORT_INPUT_FOLDER").unwrap_or(default.input_folder),
            input_files: default.input_files,
            output_file: std::env::var("IMPORT_OUTPUT_FILE").unwrap_or(default.output_file),
            warn_file: std::env::var("IMPORT_WARN_FILE").unwrap_or(default.warn_file),
            log_file: std::env::var("IMPORT_LOG_FILE").unwrap_or(default.log_file),
            synonyms_file: std::env::var("IMPORT_SYNONYMS_FILE").ok().filter(|v| !v.trim().is_empty()),
            max_concurrent_files: env_or("MAX_CONCURRENT_FILES", default.max_concurrent_files).max(1),
            max_file_size_bytes: env_or("MAX_FILE_SIZE_BYTES", default.max_file_size_bytes),
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging),
        }
    }

    /// 追加命令行指定的文件
    pub fn with_input_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.input_files.extend(files.into_iter().map(Into::into));
        self
    }
}

/// 解析环境变量；未设置时使用默认值
pub fn parse_env<T: FromStr>(var_name: &str) -> Result<Option<T>, ConfigError> {
    let Ok(value) = std::env::var(var_name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.clone(),
            expected_type: std::any::type_name::<T>().to_string(),
        })
}

/// 解析失败时记录警告并回退到默认值
fn env_or<T: FromStr>(var_name: &str, default: T) -> T {
    match parse_env(var_name) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("⚠️ {}，使用默认值", e);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.input_folder, "input");
        assert_eq!(config.output_file, "import_result.json");
        assert_eq!(config.max_concurrent_files, 8);
        assert_eq!(config.max_file_size_bytes, 20 * 1024 * 1024);
        assert!(config.synonyms_file.is_none());
    }

    #[test]
    fn test_parse_env_reports_bad_value() {
        std::env::set_var("QUESTION_IMPORT_TEST_LIMIT", "many");
        let err = parse_env::<usize>("QUESTION_IMPORT_TEST_LIMIT").unwrap_err();
        assert!(err.to_string().contains("QUESTION_IMPORT_TEST_LIMIT"));
        assert!(err.to_string().contains("'many'"));

        std::env::set_var("QUESTION_IMPORT_TEST_LIMIT", " 12 ");
        assert_eq!(parse_env::<usize>("QUESTION_IMPORT_TEST_LIMIT").unwrap(), Some(12));
        std::env::remove_var("QUESTION_IMPORT_TEST_LIMIT");

        assert_eq!(parse_env::<u64>("QUESTION_IMPORT_TEST_UNSET").unwrap(), None);
    }

    #[test]
    fn test_verbose_logging_from_env() {
        std::env::set_var("VERBOSE_LOGGING", "true");
        assert!(Config::from_env().verbose_logging);
        std::env::set_var("VERBOSE_LOGGING", "loud");
        assert!(!Config::from_env().verbose_logging);
        std::env::remove_var("VERBOSE_LOGGING");
    }

    #[test]
    fn test_with_input_files() {
        let config = Config::default().with_input_files(["a.xlsx", "b.docx"]);
        assert_eq!(
            config.input_files,
            vec![PathBuf::from("a.xlsx"), PathBuf::from("b.docx")]
        );
    }
}
