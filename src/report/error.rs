// ==========================================
// Nesting-Report - 报告层错误类型
// ==========================================
// 职责: 汇总各层错误，所有错误信息必须包含显式原因
// ==========================================

use crate::config::ConfigError;
use crate::engine::NestingError;
use crate::source::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    // ==========================================
    // 下层错误
    // ==========================================
    #[error(transparent)]
    Nesting(#[from] NestingError),

    #[error("板材数据读取失败: {0}")]
    Source(#[from] SourceError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("没有可用于报告的板材")]
    NoSheets,

    // ==========================================
    // 文件系统错误
    // ==========================================
    #[error("报告目录处理失败 ({path}): {message}")]
    FolderError { path: String, message: String },

    #[error("报告文件写入失败 ({path}): {message}")]
    WriteError { path: String, message: String },

    // ==========================================
    // PDF 转换错误
    // ==========================================
    #[error("无法启动 PDF 转换程序 {executable}: {message}")]
    ConverterSpawn { executable: String, message: String },

    #[error("PDF 转换失败 ({html}): 退出码 {code}")]
    ConverterExit { html: String, code: i32 },
}

pub type ReportResult<T> = Result<T, ReportError>;
