// ==========================================
// Nesting-Report - 字段映射器
// ==========================================
// 职责: 导出表列名（中/英/德别名） → 板材属性
// 数值保持原始文本，由引擎层统一数值化
// ==========================================

use crate::domain::sheet::{PieceInfo, SheetId};
use crate::domain::types::{PropertyValue, SheetProperty};
use crate::source::error::{SourceError, SourceResult};
use crate::source::file_parser::RawRecord;
use std::collections::HashMap;
use tracing::warn;

/// 板材列别名（比较时忽略大小写）
const SHEET_ALIASES: &[&str] = &["sheet", "sheet_id", "platte", "blech", "板材", "板材号"];
const PREVIEW_ALIASES: &[&str] = &["preview", "image", "vorschau", "bild", "预览图"];
const LABEL_ALIASES: &[&str] = &["label", "name", "bezeichnung", "名称"];

/// 属性列别名
fn property_aliases(property: SheetProperty) -> &'static [&'static str] {
    match property {
        SheetProperty::Material => &["material", "werkstoff", "材料"],
        SheetProperty::Thickness => &["thickness", "stärke", "dicke", "厚度"],
        SheetProperty::Area => &["area", "fläche", "面积"],
        SheetProperty::RateReusable => &[
            "rate_reusable",
            "reusable",
            "wiederverwendbar",
            "可复用率",
        ],
        SheetProperty::RateLeftover => &[
            "rate_leftover",
            "rate_left_over",
            "leftover",
            "abfall",
            "废料率",
        ],
        SheetProperty::PiecesNumber => &["pieces", "pieces_number", "gutteile", "零件数"],
        SheetProperty::Width => &["width", "breite", "宽度"],
        SheetProperty::Height => &["height", "höhe", "hoehe", "高度"],
    }
}

const ALL_PROPERTIES: [SheetProperty; 8] = [
    SheetProperty::Material,
    SheetProperty::Thickness,
    SheetProperty::Area,
    SheetProperty::RateReusable,
    SheetProperty::RateLeftover,
    SheetProperty::PiecesNumber,
    SheetProperty::Width,
    SheetProperty::Height,
];

// ==========================================
// SheetRecord - 板材表映射结果
// ==========================================
#[derive(Debug, Clone)]
pub struct SheetRecord {
    pub sheet: SheetId,
    pub properties: HashMap<SheetProperty, PropertyValue>,
    pub preview: Option<String>,
    pub row_number: usize,
}

// ==========================================
// PieceRecord - 零件表映射结果
// ==========================================
#[derive(Debug, Clone)]
pub struct PieceRecord {
    pub sheet: SheetId,
    pub piece: PieceInfo,
    pub row_number: usize,
}

pub struct FieldMapper;

impl FieldMapper {
    /// 映射板材表一行
    pub fn map_sheet(&self, row: &RawRecord, row_number: usize) -> SourceResult<SheetRecord> {
        let sheet = self
            .get_string(row, SHEET_ALIASES)
            .map(SheetId::new)
            .ok_or(SourceError::SheetIdMissing(row_number))?;

        let mut properties = HashMap::new();
        for property in ALL_PROPERTIES {
            if let Some(value) = self.get_string(row, property_aliases(property)) {
                properties.insert(property, PropertyValue::Text(value));
            }
        }

        Ok(SheetRecord {
            sheet,
            properties,
            preview: self.get_string(row, PREVIEW_ALIASES),
            row_number,
        })
    }

    /// 映射零件表一行；尺寸无法解析时记为缺失
    pub fn map_piece(&self, row: &RawRecord, row_number: usize) -> SourceResult<PieceRecord> {
        let sheet = self
            .get_string(row, SHEET_ALIASES)
            .map(SheetId::new)
            .ok_or(SourceError::PieceSheetMissing(row_number))?;

        let piece = PieceInfo {
            label: self.get_string(row, LABEL_ALIASES).unwrap_or_default(),
            width_mm: self.get_number(row, SheetProperty::Width, row_number),
            height_mm: self.get_number(row, SheetProperty::Height, row_number),
        };

        Ok(PieceRecord {
            sheet,
            piece,
            row_number,
        })
    }

    /// 提取非空字符串字段，按别名顺序尝试，列名忽略大小写
    fn get_string(&self, row: &RawRecord, aliases: &[&str]) -> Option<String> {
        for alias in aliases {
            let found = row
                .iter()
                .find(|(header, _)| header.trim().to_lowercase() == *alias);
            if let Some((_, value)) = found {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    fn get_number(&self, row: &RawRecord, property: SheetProperty, row_number: usize) -> Option<f64> {
        let raw = self.get_string(row, property_aliases(property))?;
        let parsed = PropertyValue::Text(raw.clone()).as_number();
        if parsed.is_none() {
            warn!(row = row_number, field = %property, value = %raw, "零件尺寸无法解析为数值");
        }
        parsed
    }
}
