// ==========================================
// Nesting-Report - 引擎层
// ==========================================
// 职责: 板材属性采集 / 材料分组 / 材料统计
// 红线: 纯计算，单线程，无副作用（日志除外）
// ==========================================
// 数据流: 板材列表 → 属性采集 → (材料, 厚度) 分组 → 每组统计
// ==========================================

pub mod aggregator;
pub mod collector;
pub mod error;
pub mod grouper;

// 重导出核心引擎
pub use aggregator::MaterialStatsAggregator;
pub use collector::{
    collect_sheet_metrics, numeric_property, read_sheet_details, read_sheet_metrics,
    text_property, CollectedSheets,
};
pub use error::{NestingError, NestingResult, UnavailableReason};
pub use grouper::{GroupingOutcome, SheetGrouper};
