// ==========================================
// Nesting-Report - 材料统计引擎
// ==========================================
// 输入: 一组板材（非空）
// 输出: MaterialStats
// ==========================================
// 口径:
// - total_area      = Σ 面积（m²）
// - total_reusable  = Σ 可复用率（%，非面积加权）
// - total_garbage   = Σ 废料率（%，非面积加权）
// - average_*       = total_* / n
// - total_*_material = total_area × total_* / 100 / n
// 聚合阶段不舍入
// ==========================================

use crate::domain::material::{MaterialGroup, MaterialStats};
use crate::domain::sheet::SheetMetrics;
use crate::engine::error::{NestingError, NestingResult};
use tracing::debug;

// ==========================================
// MaterialStatsAggregator - 材料统计引擎
// ==========================================
pub struct MaterialStatsAggregator {}

impl MaterialStatsAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算一组板材的统计
    ///
    /// # 返回
    /// - Err(EmptyGroup): 输入为空
    pub fn aggregate(&self, sheets: &[SheetMetrics]) -> NestingResult<MaterialStats> {
        if sheets.is_empty() {
            return Err(NestingError::EmptyGroup);
        }

        let mut total_area = 0.0;
        let mut total_reusable = 0.0;
        let mut total_garbage = 0.0;
        for sheet in sheets {
            total_area += sheet.area_m2;
            total_reusable += sheet.reusable_pct;
            total_garbage += sheet.leftover_pct;
        }

        let n = sheets.len() as f64;
        let stats = MaterialStats {
            number_of_sheets: sheets.len(),
            total_area,
            total_reusable,
            total_garbage,
            average_reusable: total_reusable / n,
            average_garbage: total_garbage / n,
            total_reusable_material: total_area * total_reusable / 100.0 / n,
            total_non_reusable_material: total_area * total_garbage / 100.0 / n,
        };

        debug!(
            sheets = stats.number_of_sheets,
            total_area = stats.total_area,
            total_reusable = stats.total_reusable,
            total_garbage = stats.total_garbage,
            "材料统计计算完成"
        );

        Ok(stats)
    }

    /// 计算材料分组的统计
    pub fn aggregate_group(&self, group: &MaterialGroup) -> NestingResult<MaterialStats> {
        self.aggregate(&group.sheets)
    }
}

impl Default for MaterialStatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}
