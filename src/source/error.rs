// ==========================================
// Nesting-Report - 数据源错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 板材数据源（导出表）错误类型
#[derive(Error, Debug)]
pub enum SourceError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("板材标识缺失 (行 {0}): 板材列为空或不存在")]
    SheetIdMissing(usize),

    #[error("板材标识重复 (行 {row}): {sheet}")]
    DuplicateSheet { row: usize, sheet: String },

    #[error("零件缺少所属板材 (行 {0})")]
    PieceSheetMissing(usize),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for SourceError {
    fn from(err: csv::Error) -> Self {
        SourceError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for SourceError {
    fn from(err: calamine::Error) -> Self {
        SourceError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type SourceResult<T> = Result<T, SourceError>;
