use crate::error::{FileError, ImportError};
use crate::workflow::SourceFormat;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 扫描文件夹中所有受支持的导入文件（不递归），按文件名排序
pub async fn collect_import_files(folder_path: &str) -> Result<Vec<PathBuf>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        // Office 打开文件时留下的锁文件
        if name.starts_with("~$") {
            continue;
        }
        if SourceFormat::is_supported(&name) {
            files.push(path);
        } else {
            tracing::debug!("跳过不支持的文件: {}", name);
        }
    }

    files.sort();
    Ok(files)
}

/// 读取单个导入文件，超过大小上限时不读取内容直接失败
pub async fn load_import_file(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path).await.map_err(|_| FileError::NotFound {
        path: path.display().to_string(),
    })?;

    if metadata.len() > max_size {
        return Err(FileError::TooLarge {
            path: path.display().to_string(),
            size: metadata.len(),
            limit: max_size,
        }
        .into());
    }

    let bytes = fs::read(path)
        .await
        .map_err(|e| ImportError::file_read_failed(path.display().to_string(), e))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_supported_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.docx", "a.xlsx", "notes.txt", "~$a.xlsx", "c.XLS"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.docx")).unwrap();

        let files = collect_import_files(&dir.path().to_string_lossy()).await.unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.xlsx", "b.docx", "c.XLS"]);
    }

    #[tokio::test]
    async fn test_missing_folder() {
        let err = collect_import_files("definitely/not/here").await.unwrap_err();
        assert!(err.to_string().contains("目录不存在"));
    }

    #[tokio::test]
    async fn test_size_bound_checked_before_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.xlsx");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let err = load_import_file(&path, 16).await.unwrap_err();
        assert!(err.to_string().contains("文件过大"));

        let bytes = load_import_file(&path, 64).await.unwrap();
        assert_eq!(bytes.len(), 64);
    }
}
