// ==========================================
// Nesting-Report - 核心库
// ==========================================
// 职责: 排版板材按 (材料, 厚度) 分组统计，生成 HTML/PDF 效率报告
// 数据流: SheetSource → engine（采集/分组/统计） → report（渲染/转换）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "de");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 板材与材料分组类型
pub mod domain;

// 数据源层 - 外部 CAD 能力边界
pub mod source;

// 引擎层 - 采集/分组/统计
pub mod engine;

// 配置层 - 报告配置
pub mod config;

// 报告层 - 渲染/转换/编排
pub mod report;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    MaterialGroup, MaterialGroupKey, MaterialStats, PieceInfo, PropertyPolicy, PropertyValue,
    SheetDetails, SheetId, SheetMetrics, SheetProperty, SkippedSheet,
};

// 数据源
pub use source::{SheetSource, SourceError, TableSheetSource};

// 引擎
pub use engine::{MaterialStatsAggregator, NestingError, SheetGrouper};

// 配置
pub use config::{ConfigManager, ReportConfig};

// 报告
pub use report::{
    PdfConverter, ReportError, ReportOptions, ReportService, ReportSummary, WkhtmltopdfConverter,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Nesting-Report";
