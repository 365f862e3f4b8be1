// ==========================================
// Nesting-Report - 板材分组引擎
// ==========================================
// 按 (材料, 厚度) 精确值分组
// 红线: 组内保持板材发现顺序
// 红线: 组的创建顺序 = 各键首次出现顺序
// ==========================================

use crate::domain::material::{MaterialGroup, MaterialGroupKey};
use crate::domain::sheet::{SheetId, SheetMetrics, SkippedSheet};
use crate::domain::types::PropertyPolicy;
use crate::engine::collector::collect_sheet_metrics;
use crate::engine::error::NestingResult;
use crate::source::SheetSource;
use std::collections::HashMap;
use tracing::{debug, info};

/// 分组结果
#[derive(Debug, Clone, Default)]
pub struct GroupingOutcome {
    pub groups: Vec<MaterialGroup>,
    pub skipped: Vec<SkippedSheet>,
}

// ==========================================
// SheetGrouper - 板材分组引擎
// ==========================================
// 无状态引擎
pub struct SheetGrouper {}

impl SheetGrouper {
    pub fn new() -> Self {
        Self {}
    }

    /// 将已采集的板材按材料与厚度分组
    pub fn group_by_material(&self, sheets: Vec<SheetMetrics>) -> Vec<MaterialGroup> {
        let mut index: HashMap<MaterialGroupKey, usize> = HashMap::new();
        let mut groups: Vec<MaterialGroup> = Vec::new();

        for sheet in sheets {
            let key = MaterialGroupKey::new(sheet.material.clone(), sheet.thickness_mm);
            match index.get(&key) {
                Some(&pos) => groups[pos].sheets.push(sheet),
                None => {
                    debug!(group = %key, first_sheet = %sheet.sheet, "新建材料分组");
                    index.insert(key.clone(), groups.len());
                    groups.push(MaterialGroup {
                        key,
                        sheets: vec![sheet],
                    });
                }
            }
        }

        groups
    }

    /// 从数据源读取并分组
    ///
    /// # 参数
    /// - source: 外部板材数据源
    /// - sheets: 待分组的板材（有序）
    /// - policy: 属性缺失处理策略
    pub fn group_sheets(
        &self,
        source: &dyn SheetSource,
        sheets: &[SheetId],
        policy: PropertyPolicy,
    ) -> NestingResult<GroupingOutcome> {
        let collected = collect_sheet_metrics(source, sheets, policy)?;
        let groups = self.group_by_material(collected.metrics);

        info!(
            sheets = sheets.len(),
            groups = groups.len(),
            skipped = collected.skipped.len(),
            "板材按材料与厚度分组完成"
        );

        Ok(GroupingOutcome {
            groups,
            skipped: collected.skipped,
        })
    }
}

impl Default for SheetGrouper {
    fn default() -> Self {
        Self::new()
    }
}
