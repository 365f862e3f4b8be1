// ==========================================
// Nesting-Report - 板材数据源 Trait
// ==========================================
// 外部 CAD 系统能力边界:
// - 板材枚举（有序）
// - 板材属性查询
// - 零件清单与预览图
// ==========================================

use crate::domain::sheet::{PieceInfo, SheetId};
use crate::domain::types::{PropertyValue, SheetProperty};
use std::path::PathBuf;

// ==========================================
// SheetSource Trait
// ==========================================
// 实现者: TableSheetSource（CAD 导出表）
pub trait SheetSource: Send + Sync {
    /// 按排版顺序返回全部板材
    fn sheets(&self) -> Vec<SheetId>;

    /// 查询板材属性
    ///
    /// # 返回
    /// - Some(PropertyValue): 原始属性值（未数值化）
    /// - None: 属性不存在
    fn sheet_property(&self, sheet: &SheetId, property: SheetProperty) -> Option<PropertyValue>;

    /// 板材上的零件（按排版顺序）
    fn pieces(&self, sheet: &SheetId) -> Vec<PieceInfo>;

    /// CAD 系统已渲染的板材预览图
    fn preview_image(&self, sheet: &SheetId) -> Option<PathBuf>;
}
