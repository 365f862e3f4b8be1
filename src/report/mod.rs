// ==========================================
// Nesting-Report - 报告层
// ==========================================
// 职责: HTML 渲染 / 输出目录 / PDF 转换 / 自动打开 / 流程编排
// 依赖: engine（统计） + source（数据） + config（报告配置）
// ==========================================

pub mod browser;
pub mod error;
pub mod folder;
pub mod html;
pub mod naming;
pub mod pdf;
pub mod service;
pub mod style;
pub mod summary;

// 重导出核心类型
pub use error::{ReportError, ReportResult};
pub use naming::ReportScope;
pub use pdf::{convert_all, PdfConverter, PdfJob, PdfOutcome, WkhtmltopdfConverter};
pub use service::{compute_statistics, ReportOptions, ReportService};
pub use summary::{ConversionFailure, ReportSummary, ScopeReport, ScopeStatistics, StatisticsReport};
