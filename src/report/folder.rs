// ==========================================
// Nesting-Report - 输出目录
// ==========================================
// 目录结构: <report_path>/Report_new/<项目名>/
// 已存在: delete_folder=true 时先删除，否则复用
// ==========================================

use crate::config::ReportConfig;
use crate::report::error::{ReportError, ReportResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 报告根目录名
pub const REPORT_ROOT_DIR: &str = "Report_new";

/// 项目输出目录路径
pub fn output_folder_path(config: &ReportConfig, project_stem: &str) -> PathBuf {
    config.report_path.join(REPORT_ROOT_DIR).join(project_stem)
}

/// 准备项目输出目录
pub fn prepare_output_folder(config: &ReportConfig, project_stem: &str) -> ReportResult<PathBuf> {
    let folder = output_folder_path(config, project_stem);

    if folder.exists() {
        if config.delete_folder {
            if config.show_warning_delete_folder {
                warn!(folder = %folder.display(), "报告目录已存在，将删除旧内容");
            }
            fs::remove_dir_all(&folder).map_err(|e| folder_error(&folder, e))?;
        } else {
            info!(folder = %folder.display(), "复用已存在的报告目录");
        }
    }

    fs::create_dir_all(&folder).map_err(|e| folder_error(&folder, e))?;
    Ok(folder)
}

/// 写入文本文件
pub fn write_file(path: &Path, content: &str) -> ReportResult<()> {
    fs::write(path, content).map_err(|e| ReportError::WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// 复制预览图到输出目录，目标文件名为 <file_stem>.<源扩展名>
///
/// 返回相对输出目录的文件名；目标已存在时覆盖
pub fn copy_preview(folder: &Path, source: &Path, file_stem: &str) -> ReportResult<PathBuf> {
    let file_name = match source.extension() {
        Some(ext) => format!("{}.{}", file_stem, ext.to_string_lossy()),
        None => file_stem.to_string(),
    };

    let target = folder.join(&file_name);
    if target != source {
        fs::copy(source, &target).map_err(|e| ReportError::WriteError {
            path: target.display().to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(PathBuf::from(file_name))
}

fn folder_error(folder: &Path, e: std::io::Error) -> ReportError {
    ReportError::FolderError {
        path: folder.display().to_string(),
        message: e.to_string(),
    }
}
