// ==========================================
// Nesting-Report - 导出表数据源
// ==========================================
// 板材表: 每行一张板材
// 零件表: 每行一个零件，按 sheet 列归属（可选）
// ==========================================

use crate::domain::sheet::{PieceInfo, SheetId};
use crate::domain::types::{PropertyValue, SheetProperty};
use crate::source::error::{SourceError, SourceResult};
use crate::source::field_mapper::{FieldMapper, SheetRecord};
use crate::source::file_parser::{RawRecord, UniversalFileParser};
use crate::source::sheet_source_trait::SheetSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct TableSheetSource {
    order: Vec<SheetId>,
    sheets: HashMap<SheetId, SheetRecord>,
    pieces: HashMap<SheetId, Vec<PieceInfo>>,
    base_dir: Option<PathBuf>,
}

impl TableSheetSource {
    /// 从导出文件加载
    ///
    /// # 参数
    /// - sheets_path: 板材表（.csv/.xlsx/.xls）
    /// - pieces_path: 零件表（可选）
    ///
    /// 预览图相对路径以板材表所在目录为基准
    pub fn from_files(sheets_path: &Path, pieces_path: Option<&Path>) -> SourceResult<Self> {
        let parser = UniversalFileParser;
        let sheet_rows = parser.parse(sheets_path)?;
        let piece_rows = match pieces_path {
            Some(path) => parser.parse(path)?,
            None => Vec::new(),
        };

        let source = Self::from_records(&sheet_rows, &piece_rows)?;

        info!(
            file = %sheets_path.display(),
            sheets = source.len(),
            pieces = piece_rows.len(),
            "板材导出表加载完成"
        );

        Ok(source.with_base_dir(sheets_path.parent().map(Path::to_path_buf)))
    }

    /// 从原始行记录构建
    pub fn from_records(sheet_rows: &[RawRecord], piece_rows: &[RawRecord]) -> SourceResult<Self> {
        let mapper = FieldMapper;
        let mut order = Vec::with_capacity(sheet_rows.len());
        let mut sheets = HashMap::with_capacity(sheet_rows.len());

        for (idx, row) in sheet_rows.iter().enumerate() {
            let record = mapper.map_sheet(row, idx + 1)?;
            if sheets.contains_key(&record.sheet) {
                return Err(SourceError::DuplicateSheet {
                    row: record.row_number,
                    sheet: record.sheet.to_string(),
                });
            }
            order.push(record.sheet.clone());
            sheets.insert(record.sheet.clone(), record);
        }

        let mut pieces: HashMap<SheetId, Vec<PieceInfo>> = HashMap::new();
        for (idx, row) in piece_rows.iter().enumerate() {
            let record = mapper.map_piece(row, idx + 1)?;
            if !sheets.contains_key(&record.sheet) {
                warn!(
                    row = record.row_number,
                    sheet = %record.sheet,
                    "零件所属板材不在板材表中，已忽略"
                );
                continue;
            }
            pieces.entry(record.sheet).or_default().push(record.piece);
        }

        debug!(sheets = order.len(), "板材表映射完成");

        Ok(Self {
            order,
            sheets,
            pieces,
            base_dir: None,
        })
    }

    /// 设置预览图相对路径的基准目录
    pub fn with_base_dir(mut self, base_dir: Option<PathBuf>) -> Self {
        self.base_dir = base_dir;
        self
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl SheetSource for TableSheetSource {
    fn sheets(&self) -> Vec<SheetId> {
        self.order.clone()
    }

    fn sheet_property(&self, sheet: &SheetId, property: SheetProperty) -> Option<PropertyValue> {
        self.sheets
            .get(sheet)
            .and_then(|record| record.properties.get(&property))
            .cloned()
    }

    fn pieces(&self, sheet: &SheetId) -> Vec<PieceInfo> {
        self.pieces.get(sheet).cloned().unwrap_or_default()
    }

    fn preview_image(&self, sheet: &SheetId) -> Option<PathBuf> {
        let raw = self.sheets.get(sheet)?.preview.as_ref()?;
        let path = PathBuf::from(raw);
        if path.is_absolute() {
            return Some(path);
        }
        Some(match &self.base_dir {
            Some(dir) => dir.join(path),
            None => path,
        })
    }
}
