use crate::error::FileError;
use crate::models::synonyms::{SynonymOverrides, SynonymTables};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载追加的同义词，在默认表的基础上扩展
///
/// 文件中没有出现的字段保持默认值，已有别名不会被删除。
pub async fn load_synonym_tables(toml_file_path: &Path) -> Result<SynonymTables> {
    if !toml_file_path.exists() {
        return Err(FileError::NotFound {
            path: toml_file_path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取同义词文件: {}", toml_file_path.display()))?;

    let overrides = parse_synonym_overrides(&content).map_err(|e| FileError::TomlParseFailed {
        path: toml_file_path.display().to_string(),
        source: Box::new(e),
    })?;

    Ok(SynonymTables::default().extended(overrides))
}

/// 解析同义词 TOML 文本
pub fn parse_synonym_overrides(content: &str) -> Result<SynonymOverrides, toml::de::Error> {
    toml::from_str(content)
}

/// 可选的同义词文件：未配置时使用默认表
pub async fn load_optional_synonym_tables(toml_file_path: Option<&str>) -> Result<SynonymTables> {
    match toml_file_path {
        Some(path) => {
            let tables = load_synonym_tables(Path::new(path)).await?;
            tracing::info!("✓ 已加载同义词文件: {}", path);
            Ok(tables)
        }
        None => Ok(SynonymTables::default()),
    }
}
