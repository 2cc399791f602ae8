use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{AppError, AppResult, FileError};
use crate::models::staged_file::StagedFile;

/// 从文件夹中收集所有可接受扩展名的简历文件（按文件名排序）
pub async fn collect_resume_files(folder: &Path, extensions: &[String]) -> AppResult<Vec<StagedFile>> {
    let folder_display = folder.display().to_string();
    if !folder.is_dir() {
        return Err(FileError::NotFound { path: folder_display }.into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_display.clone(), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_display.clone(), e))?
    {
        let path = entry.path();
        if path.is_file() && has_accepted_extension(&path, extensions) {
            paths.push(path);
        } else {
            tracing::debug!("跳过非简历文件: {}", path.display());
        }
    }

    paths.sort();
    tracing::info!("📁 {} 中找到 {} 份简历", folder_display, paths.len());

    Ok(paths.into_iter().map(StagedFile::new).collect())
}

/// 把命令行给出的路径转换为暂存文件
///
/// - 文件夹：展开为其中可接受的简历文件
/// - 文件：原样保留（不过滤扩展名，也不去重）
pub async fn stage_paths(paths: &[PathBuf], extensions: &[String]) -> AppResult<Vec<StagedFile>> {
    let mut staged = Vec::new();
    for path in paths {
        if path.is_dir() {
            staged.extend(collect_resume_files(path, extensions).await?);
        } else if path.exists() {
            staged.push(StagedFile::new(path.clone()));
        } else {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }
    }
    Ok(staged)
}

fn has_accepted_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|accepted| accepted.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
