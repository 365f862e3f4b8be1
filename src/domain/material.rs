// ==========================================
// Nesting-Report - 材料分组领域模型
// ==========================================
// MaterialGroupKey: (材料, 厚度) 值相等键
// MaterialGroup:    同键板材的有序列表（分组后不可变）
// MaterialStats:    每组派生统计（计算一次后只读）
// ==========================================

use crate::domain::sheet::{SheetId, SheetMetrics};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

// ==========================================
// MaterialGroupKey - 分组键
// ==========================================
// 厚度按精确值比较；-0.0 与 0.0 视为同一厚度
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialGroupKey {
    pub material: String,
    pub thickness_mm: f64,
}

impl MaterialGroupKey {
    pub fn new(material: impl Into<String>, thickness_mm: f64) -> Self {
        Self {
            material: material.into(),
            thickness_mm,
        }
    }

    fn thickness_bits(&self) -> u64 {
        if self.thickness_mm == 0.0 {
            0.0_f64.to_bits()
        } else {
            self.thickness_mm.to_bits()
        }
    }
}

impl PartialEq for MaterialGroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.material == other.material && self.thickness_bits() == other.thickness_bits()
    }
}

impl Eq for MaterialGroupKey {}

impl Hash for MaterialGroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.material.hash(state);
        self.thickness_bits().hash(state);
    }
}

impl fmt::Display for MaterialGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.material, self.thickness_mm)
    }
}

// ==========================================
// MaterialGroup - 材料分组
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialGroup {
    pub key: MaterialGroupKey,
    pub sheets: Vec<SheetMetrics>,
}

impl MaterialGroup {
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn sheet_ids(&self) -> impl Iterator<Item = &SheetId> {
        self.sheets.iter().map(|s| &s.sheet)
    }
}

// ==========================================
// MaterialStats - 材料统计
// ==========================================
// 百分比字段为各板材百分比的直接累加（非面积加权）
// 聚合阶段不做舍入，舍入属于展示层
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialStats {
    pub number_of_sheets: usize,
    pub total_area: f64,     // m²
    pub total_reusable: f64, // Σ 可复用余料率（%）
    pub total_garbage: f64,  // Σ 废料率（%）
    pub average_reusable: f64,
    pub average_garbage: f64,
    pub total_reusable_material: f64,     // m²
    pub total_non_reusable_material: f64, // m²
}

impl MaterialStats {
    /// 平均每张板的可复用余料面积（m²）
    pub fn average_reusable_material(&self) -> f64 {
        self.total_area * self.average_reusable / 100.0 / self.number_of_sheets as f64
    }

    /// 平均每张板的废料面积（m²）
    pub fn average_non_reusable_material(&self) -> f64 {
        self.total_area * self.average_garbage / 100.0 / self.number_of_sheets as f64
    }
}
