// ==========================================
// Nesting-Report - 领域模型层
// ==========================================
// 职责: 定义板材、材料分组与统计的领域类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod material;
pub mod sheet;
pub mod types;

// 重导出核心类型
pub use material::{MaterialGroup, MaterialGroupKey, MaterialStats};
pub use sheet::{PieceInfo, SheetDetails, SheetId, SheetMetrics, SkippedSheet, MM2_PER_M2};
pub use types::{PropertyPolicy, PropertyValue, SheetProperty};
