// ==========================================
// Nesting-Report - 板材领域模型
// ==========================================
// 板材标识由外部 CAD 系统持有，本系统只读
// ==========================================

use crate::domain::types::SheetProperty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// mm² → m² 换算系数
pub const MM2_PER_M2: f64 = 1_000_000.0;

// ==========================================
// SheetId - 板材标识
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(String);

impl SheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SheetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ==========================================
// SheetMetrics - 板材统计口径
// ==========================================
// 分组与汇总所需的全部属性，一次读取后不再变更
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetMetrics {
    pub sheet: SheetId,
    pub material: String,  // 材料
    pub thickness_mm: f64, // 厚度（mm）
    pub area_m2: f64,      // 面积（m²，原始 mm² / 1 000 000）
    pub reusable_pct: f64, // 可复用余料率（%）
    pub leftover_pct: f64, // 废料率（%）
}

impl SheetMetrics {
    /// 可复用余料面积（m²）
    pub fn reusable_area_m2(&self) -> f64 {
        self.reusable_pct * self.area_m2 / 100.0
    }

    /// 不可复用废料面积（m²）
    pub fn leftover_area_m2(&self) -> f64 {
        self.leftover_pct * self.area_m2 / 100.0
    }
}

// ==========================================
// PieceInfo - 板材上的零件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceInfo {
    pub label: String,
    pub width_mm: Option<f64>,
    pub height_mm: Option<f64>,
}

// ==========================================
// SheetDetails - 渲染用附加信息
// ==========================================
// 仅报告展示使用，缺失时显示占位符，不参与统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetDetails {
    pub width_mm: Option<f64>,
    pub height_mm: Option<f64>,
    pub pieces_number: Option<f64>,
    pub pieces: Vec<PieceInfo>,
    pub preview: Option<std::path::PathBuf>,
}

impl SheetDetails {
    /// 宽板（宽 > 3 × 高）按宽度缩放预览图，否则按高度
    pub fn is_wide(&self) -> bool {
        match (self.width_mm, self.height_mm) {
            (Some(w), Some(h)) => w > 3.0 * h,
            _ => false,
        }
    }

    /// 合格零件数：优先使用属性值，缺失时回退为零件清单长度
    pub fn good_parts(&self) -> usize {
        match self.pieces_number {
            Some(n) if n >= 0.0 => n as usize,
            _ => self.pieces.len(),
        }
    }
}

// ==========================================
// SkippedSheet - 被跳过的板材
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSheet {
    pub sheet: SheetId,
    pub property: SheetProperty,
    pub reason: String,
}
